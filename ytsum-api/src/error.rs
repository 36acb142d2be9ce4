//! HTTP error type for ytsum-api
//!
//! Every failure is rendered as `{"status": "error", "message": ...}` with
//! the status code of its kind. Nothing escapes the request boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use ytsum_common::api::StatusResponse;

use crate::store::AuthError;
use crate::summarizer::SummarizeError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request body or field (400)
    #[error("{0}")]
    BadRequest(String),

    /// Credentials rejected (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Conflict (409), e.g. username taken
    #[error("{0}")]
    Conflict(String),

    /// Upstream quota exhausted (429)
    #[error("{0}")]
    TooManyRequests(String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::InvalidInput(_) => ApiError::BadRequest(message),
            AuthError::AlreadyExists => ApiError::Conflict(message),
            AuthError::NotFound => ApiError::NotFound(message),
            AuthError::WrongPassword => ApiError::Unauthorized(message),
            AuthError::Internal(_) => ApiError::Internal(message),
        }
    }
}

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        let message = err.to_string();
        match err {
            SummarizeError::InvalidInput(_) => ApiError::BadRequest(message),
            SummarizeError::QuotaExceeded(_) => ApiError::TooManyRequests(message),
            SummarizeError::ServiceUnavailable
            | SummarizeError::Internal(_)
            | SummarizeError::ExternalService(_) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(StatusResponse::error(self.to_string()));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
