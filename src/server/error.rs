use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Why a create or delete could not be carried out. Clients only ever see the
/// 422 envelope; the cause goes to the log.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("invalid payload: {0}")]
    Validation(String),
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable")]
    Unprocessable(#[source] ProcessingError),
    #[error("internal server error")]
    Internal(#[from] sqlx::Error),
}

impl From<ProcessingError> for ApiError {
    fn from(error: ProcessingError) -> Self {
        ApiError::Unprocessable(error)
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Unprocessable(cause) => tracing::warn!(error = %cause, "Unprocessable request"),
            ApiError::Internal(cause) => tracing::error!(error = %cause, "Storage error"),
            _ => tracing::debug!(error = %self, "Request rejected"),
        }
        let status = self.status();
        let body = ErrorEnvelope {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
