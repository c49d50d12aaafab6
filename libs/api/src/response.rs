use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, "Post not found").into_response()
            }
            ApiError::ServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                    .into_response()
            }
        }
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

/// Logs a failure under `task` and hides it behind a generic server error.
pub trait IntoApiResponse<T> {
    fn into_response(self, task: &str) -> ApiResponse<T>;
}

impl<T, E: std::error::Error> IntoApiResponse<T> for Result<T, E> {
    fn into_response(self, task: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(task = task, error = e.to_string());
            ApiError::ServerError
        })
    }
}
