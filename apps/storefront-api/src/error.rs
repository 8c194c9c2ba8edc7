//! # API Error Type
//!
//! Maps service failures onto HTTP responses.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  CoreError ──┐                                                          │
//! │              ├──► ServiceError ──► ApiError ──► (status, {"error"})    │
//! │  DbError ────┘                                                          │
//! │                                                                         │
//! │  CoreError (bad input)    → 400, message echoed verbatim               │
//! │  Malformed JSON body      → 400, parser message                        │
//! │  DbError (anything)       → 500 "Internal Server Error", logged        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error body has the same shape:
//! ```json
//! { "error": "Cart cannot be empty" }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use storefront_core::CoreError;
use storefront_db::DbError;

/// Message sent for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

// =============================================================================
// Service Error
// =============================================================================

/// Failures raised by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client input broke a business rule.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 with the message shown to the client.
    #[error("{0}")]
    BadRequest(String),

    /// 500; the detail is logged, never sent.
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(core) => ApiError::from(core),
            ServiceError::Db(db) => ApiError::from(db),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
