//! JSON API for user records.
//!
//! Payloads are validated before any storage call; repository failures are
//! turned into responses by [`AppError`].

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use usercrud_core::storage::RepositoryError;
use usercrud_core::user::{NewUser, RawUser, User};

use crate::handlers::error::{AppError, IdMismatch};
use crate::state::AppState;

/// Create a new user (POST /api/users).
///
/// Assigns the id and both timestamps; answers 201 with the stored user.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let Json(new_user) = payload?;
    let user = User::new(&state.rules, new_user)?;

    let created = state.user_repo.create_user(&user).await?;

    tracing::info!(user_id = %created.id, "Created new user");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a single user by ID (GET /api/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Path(id) = id?;

    match state.user_repo.get_user(id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(RepositoryError::NotFound {
            entity_type: "User",
            id: id.to_string(),
        }
        .into()),
    }
}

/// Update a user (PUT /api/users/{id}).
///
/// The body is a full user record as returned by the other endpoints; its
/// `id` must match the path. `createdAt` and `lastModified` in the body are
/// validated but the stored values win.
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RawUser>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let Path(id) = id?;
    let Json(raw) = payload?;
    let user = User::parse(&state.rules, raw)?;

    if user.id != id {
        return Err(IdMismatch {
            path: id,
            body: user.id,
        }
        .into());
    }

    let updated = state.user_repo.update_user(&user).await?;

    tracing::info!(user_id = %id, "Updated user");
    Ok(Json(updated))
}

/// Delete a user by ID (DELETE /api/users/{id}).
///
/// Answers with the deleted id.
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Path(id) = id?;

    state.user_repo.delete_user(id).await?;

    tracing::info!(user_id = %id, "Deleted user");
    Ok(Json(serde_json::json!({ "id": id })))
}
