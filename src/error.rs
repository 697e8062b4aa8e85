//! Server error types with HTTP status code mapping.
//!
//! [`PostboxError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "code": 1001,
///   "message": "address must not be empty",
///   "fields": ["address"]
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Numeric error code (see code ranges on [`PostboxError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Request fields that failed validation, if any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 3000–3999 | Server     | 500 / 503                 |
#[derive(Debug, thiserror::Error)]
pub enum PostboxError {
    /// The request body failed schema checks.
    #[error("{message}")]
    Validation {
        /// Description of what was wrong.
        message: String,
        /// Names of the offending fields.
        fields: Vec<String>,
    },

    /// The store was unreachable or rejected the operation.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// The storage backend did not answer a health probe.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PostboxError {
    /// Builds a [`PostboxError::Validation`] for the given fields.
    pub fn validation<I, S>(message: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            message: message.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the fields implicated in a validation failure.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        match self {
            Self::Validation { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation { .. } => 1001,
            Self::Internal(_) => 3000,
            Self::StorageFailure(_) => 3001,
            Self::Unavailable(_) => 3002,
        }
    }

    /// Message shown to clients for server-side failures. Driver and
    /// connection detail stays in the logs.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "invalid request",
            Self::StorageFailure(_) => "storage failure",
            Self::Unavailable(_) => "storage unavailable",
            Self::Internal(_) => "internal error",
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::StorageFailure(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<JsonRejection> for PostboxError {
    fn from(rejection: JsonRejection) -> Self {
        let fields = match &rejection {
            JsonRejection::JsonDataError(_) => vec!["address".to_string()],
            _ => Vec::new(),
        };
        Self::Validation {
            message: rejection.body_text(),
            fields,
        }
    }
}

impl From<sqlx::Error> for PostboxError {
    fn from(err: sqlx::Error) -> Self {
        Self::StorageFailure(err.to_string())
    }
}

impl IntoResponse for PostboxError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let (message, fields) = match self {
            Self::Validation { message, fields } => (message, fields),
            other => {
                tracing::error!(code, error = %other, "request failed");
                (other.public_message().to_string(), Vec::new())
            }
        };
        let body = ErrorResponse {
            code,
            message,
            fields,
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
