use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::health,
        users::{create_user, delete_user, get_user, update_user},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/users", post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(cors);

    // Main application router
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use usercrud_core::storage::{Result, UserRepository};
    use usercrud_core::user::User;

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn fred(email: &str) -> Value {
        json!({
            "firstName": "Fred",
            "lastName": "Flintstone",
            "email": email,
            "dateOfBirth": "1970-12-09T00:00:00Z"
        })
    }

    async fn create(app: &Router, email: &str) -> Value {
        let (status, user) = send(app, json_request("POST", "/api/users", fred(email))).await;
        assert_eq!(status, StatusCode::CREATED);
        user
    }

    // ==================== Health ====================

    #[tokio::test]
    async fn test_health() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    // ==================== Create ====================

    #[tokio::test]
    async fn test_create_and_get_user() {
        let app = create_app(AppState::default());

        let user = create(&app, "fred@example.com").await;

        assert_eq!(user["firstName"], "Fred");
        assert_eq!(user["email"], "fred@example.com");
        assert_eq!(user["dateOfBirth"], "1970-12-09T00:00:00Z");
        assert_eq!(user["createdAt"], user["lastModified"]);

        let id = user["id"].as_str().unwrap();
        let (status, fetched) = send(&app, empty_request("GET", &format!("/api/users/{id}"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_create_accepts_dob_alias() {
        let app = create_app(AppState::default());

        let (status, user) = send(
            &app,
            json_request(
                "POST",
                "/api/users",
                json!({
                    "firstName": "Fred",
                    "lastName": "Flintstone",
                    "email": "fred@example.com",
                    "DOB": "1970-12-09T00:00:00Z"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user["dateOfBirth"], "1970-12-09T00:00:00Z");
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let app = create_app(AppState::default());
        create(&app, "a@x.com").await;

        let (status, body) = send(&app, json_request("POST", "/api/users", fred("a@x.com"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("a@x.com"));
    }

    #[tokio::test]
    async fn test_create_invalid_email() {
        let app = create_app(AppState::default());

        let (status, body) =
            send(&app, json_request("POST", "/api/users", fred("not-an-email"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let app = create_app(AppState::default());

        let (status, body) = send(
            &app,
            json_request("POST", "/api/users", json!({ "lastName": "Flintstone" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("firstName"));
    }

    #[tokio::test]
    async fn test_create_malformed_json() {
        let app = create_app(AppState::default());

        let request = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    // ==================== Get ====================

    #[tokio::test]
    async fn test_get_nonexistent_user() {
        let app = create_app(AppState::default());

        let (status, body) = send(
            &app,
            empty_request("GET", "/api/users/00000000-0000-0000-0000-000000000000"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_get_invalid_id() {
        let app = create_app(AppState::default());

        let (status, _) = send(&app, empty_request("GET", "/api/users/not-a-uuid")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ==================== Update ====================

    #[tokio::test]
    async fn test_update_user() {
        let app = create_app(AppState::default());
        let mut user = create(&app, "fred@example.com").await;
        let id = user["id"].as_str().unwrap().to_string();

        user["firstName"] = json!("Wilma");
        let (status, updated) =
            send(&app, json_request("PUT", &format!("/api/users/{id}"), user.clone())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["firstName"], "Wilma");
        assert_eq!(updated["createdAt"], user["createdAt"]);
        assert_ne!(updated["lastModified"], user["lastModified"]);

        let (_, fetched) = send(&app, empty_request("GET", &format!("/api/users/{id}"))).await;
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_id_mismatch() {
        let app = create_app(AppState::default());
        let user = create(&app, "fred@example.com").await;

        let other = Uuid::new_v4();
        let (status, _) =
            send(&app, json_request("PUT", &format!("/api/users/{other}"), user)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_nonexistent_user() {
        let app = create_app(AppState::default());
        let mut user = create(&app, "fred@example.com").await;

        let ghost = Uuid::new_v4();
        user["id"] = json!(ghost.to_string());
        user["email"] = json!("ghost@example.com");
        let (status, _) =
            send(&app, json_request("PUT", &format!("/api/users/{ghost}"), user)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let app = create_app(AppState::default());
        create(&app, "fred@example.com").await;
        let mut barney = create(&app, "barney@example.com").await;
        let id = barney["id"].as_str().unwrap().to_string();

        barney["email"] = json!("fred@example.com");
        let (status, _) =
            send(&app, json_request("PUT", &format!("/api/users/{id}"), barney)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, stored) = send(&app, empty_request("GET", &format!("/api/users/{id}"))).await;
        assert_eq!(stored["email"], "barney@example.com");
    }

    #[tokio::test]
    async fn test_update_invalid_payload() {
        let app = create_app(AppState::default());
        let mut user = create(&app, "fred@example.com").await;
        let id = user["id"].as_str().unwrap().to_string();

        user["createdAt"] = json!("last tuesday");
        let (status, body) =
            send(&app, json_request("PUT", &format!("/api/users/{id}"), user)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("createdAt"));
    }

    // ==================== Delete ====================

    #[tokio::test]
    async fn test_delete_user() {
        let app = create_app(AppState::default());
        let user = create(&app, "fred@example.com").await;
        let id = user["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, empty_request("DELETE", &format!("/api/users/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);

        let (status, _) = send(&app, empty_request("GET", &format!("/api/users/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_user() {
        let app = create_app(AppState::default());

        let (status, _) = send(
            &app,
            empty_request("DELETE", &format!("/api/users/{}", Uuid::new_v4())),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ==================== Deadline ====================

    /// Repository that never answers within the request timeout.
    struct StalledRepository;

    #[async_trait]
    impl UserRepository for StalledRepository {
        async fn get_user(&self, _id: Uuid) -> Result<Option<User>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(None)
        }

        async fn get_user_by_email(&self, _email: &str) -> Result<Option<User>> {
            Ok(None)
        }

        async fn create_user(&self, user: &User) -> Result<User> {
            Ok(user.clone())
        }

        async fn update_user(&self, user: &User) -> Result<User> {
            Ok(user.clone())
        }

        async fn delete_user(&self, _id: Uuid) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_slow_store_answers_504() {
        let app = create_app(AppState::with_repository(Arc::new(StalledRepository)));

        let (status, body) = send(
            &app,
            empty_request("GET", &format!("/api/users/{}", Uuid::new_v4())),
        )
        .await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "The request timed out");
    }
}
