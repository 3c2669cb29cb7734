use axum::http::StatusCode;

/// GET /health - Basic liveness probe.
///
/// Returns 200 immediately without touching storage.
#[axum::debug_handler]
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
