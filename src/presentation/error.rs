// HTTP error mapping
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::reading_repository::RepositoryError;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub message: String,
}

/// Handler-level error. Every failure degrades to an error payload; nothing
/// in this service is fatal.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unavailable(String),
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::PeriodNotFound(period) => {
                AppError::NotFound(format!("period `{period}` not found"))
            }
            RepositoryError::Unavailable(message) => AppError::Unavailable(message),
            RepositoryError::Malformed(file, source) => {
                AppError::Unavailable(format!("malformed data in `{file}`: {source}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ApiError {
                    code: "NOT_FOUND",
                    message,
                },
            ),
            AppError::Unavailable(message) => {
                tracing::error!("data source failure: {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiError {
                        code: "SOURCE_UNAVAILABLE",
                        message,
                    },
                )
            }
        };
        (status, Json(error)).into_response()
    }
}
