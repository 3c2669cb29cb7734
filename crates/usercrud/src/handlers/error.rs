use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use usercrud_core::storage::{
    repository_error_to_status_code, RepositoryError, VALIDATION_ERROR_STATUS,
};
use usercrud_core::user::ValidationError;

/// The id in an update path and the id in its body disagree.
#[derive(Debug, Error)]
#[error("Path id {path} does not match body id {body}")]
pub struct IdMismatch {
    pub path: Uuid,
    pub body: Uuid,
}

/// Application error type that wraps `anyhow::Error`.
///
/// The status code is picked by downcasting to the error types handlers
/// produce. Server-side failures are logged in full but answered with a
/// generic message.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else if self.0.is::<ValidationError>() {
            VALIDATION_ERROR_STATUS
        } else if self.0.is::<JsonRejection>()
            || self.0.is::<PathRejection>()
            || self.0.is::<IdMismatch>()
        {
            400
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::GATEWAY_TIMEOUT {
            tracing::error!(error = %self.0, "Request timed out");
            "The request timed out".to_string()
        } else if status.is_server_error() {
            tracing::error!(error = %self.0, "Application error");
            "An internal error occurred".to_string()
        } else {
            tracing::warn!(status = %status, error = %self.0, "Request rejected");
            self.0.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
