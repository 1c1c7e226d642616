use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dispatcher::DispatcherError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not valid JSON or does not match the request shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatcherError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidBody(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Dispatch(DispatcherError::QueueClosed) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
