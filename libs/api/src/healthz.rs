use axum::http::StatusCode;

/// Liveness only; the database is not consulted.
pub(super) async fn get_health() -> StatusCode {
    StatusCode::OK
}
