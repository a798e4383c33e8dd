use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every error response: `{"error": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad client input (400 Bad Request)
    #[error("{0}")]
    Validation(String),
    /// Resource not found (404 Not Found)
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    /// Anything else (500 Internal Server Error). `message` goes to the
    /// client, `cause` only to the log.
    #[error("{message}: {cause}")]
    Internal {
        message: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(message: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        ApiError::Internal {
            message,
            cause: cause.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::Internal { message, cause } => {
                tracing::error!(error = ?cause, "{message}");
                message.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Extension trait to turn a `DbErr` into a generic 500
pub trait DbErrorExt {
    fn into_api_error(self, message: &'static str) -> ApiError;
}

impl DbErrorExt for DbErr {
    fn into_api_error(self, message: &'static str) -> ApiError {
        ApiError::internal(message, self)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
