use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shorturl_core::RegistryError;
use shorturl_validator::ValidationError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

pub const NOT_FOUND_MESSAGE: &str = "No short URL found for the given input";
pub const INVALID_BODY_MESSAGE: &str = "invalid request body";
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("unsupported content type: {0}")]
    UnsupportedMediaType(String),
    #[error("stored url cannot be used as a redirect target: {0}")]
    InvalidRedirect(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Rejected submissions are a normal outcome, reported in the body.
            AppError::Validation(reason) => (StatusCode::OK, reason.to_string()),
            AppError::Registry(RegistryError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
            }
            AppError::InvalidBody(_) => (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE.to_string()),
            AppError::UnsupportedMediaType(_) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                INVALID_BODY_MESSAGE.to_string(),
            ),
            other @ (AppError::Registry(_) | AppError::InvalidRedirect(_)) => {
                error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
