use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::protocol::ErrorBody;
use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::routing::RouteError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Fatal at startup: bad settings or an inconsistent route table.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("authentication required")]
    AuthenticationRequired,

    #[error("enrollment lookup failed: {0}")]
    TransientLookup(String),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<RouteError> for AppError {
    fn from(err: RouteError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) | AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            AppError::TransientLookup(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "configuration",
            AppError::NotFound(_) => "not_found",
            AppError::AuthenticationRequired => "authentication_required",
            AppError::TransientLookup(_) => "transient_lookup",
            AppError::Forbidden(_) => "forbidden",
            AppError::Conflict(_) => "conflict",
            AppError::Validation(_) => "validation",
            AppError::Repository(_) => "storage",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        // Storage details stay in the logs
        let message = match &self {
            AppError::Repository(_) => "internal storage error".to_string(),
            other => other.to_string(),
        };
        let body = ErrorBody {
            error: message,
            code: Some(self.code().to_string()),
        };
        (status, Json(body)).into_response()
    }
}
