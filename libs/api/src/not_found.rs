use axum::http::StatusCode;

/// Answer for unmatched paths, missing public files and unrouted methods.
pub(super) async fn get_404() -> StatusCode {
    StatusCode::NOT_FOUND
}
