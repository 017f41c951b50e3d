//! Boundary errors and their HTTP status mapping.

use super::response::{ErrorEntry, ErrorEnvelope};
use crate::todo::{domain::TodoDomainError, services::TodoServiceError};
use axum::{
    Json,
    extract::rejection::{BytesRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed or failed validation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The todo service reported a failure.
    #[error(transparent)]
    Service(#[from] TodoServiceError),
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Service(TodoServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(TodoServiceError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Service(TodoServiceError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code reported in the envelope.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Service(TodoServiceError::NotFound(_)) => "not_found",
            Self::Service(TodoServiceError::Conflict(_)) => "conflict",
            Self::Service(TodoServiceError::Storage(_)) => "internal_server_error",
        }
    }

    /// Returns the client-facing message. Storage details are never exposed.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(message) => message.clone(),
            Self::Service(TodoServiceError::NotFound(_)) => "todo not found".to_owned(),
            Self::Service(TodoServiceError::Conflict(_)) => {
                "todo was modified concurrently, retry the update".to_owned()
            }
            Self::Service(TodoServiceError::Storage(_)) => "internal server error".to_owned(),
        }
    }
}

impl From<TodoDomainError> for ApiError {
    fn from(err: TodoDomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "todo request failed");
        }
        let body = ErrorEnvelope {
            errors: vec![ErrorEntry {
                code: self.code(),
                message: self.public_message(),
            }],
        };
        (status, Json(body)).into_response()
    }
}
