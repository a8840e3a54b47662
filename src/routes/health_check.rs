use axum::http::StatusCode;

/// Liveness check. Does not touch the database.
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
