//! Application error type shared by the store, services, and HTTP layer.
//!
//! Services return typed outcomes; only [`IntoResponse`] decides which HTTP
//! status a failure maps to.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned to HTTP clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced while shortening or resolving URLs.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input. Never retried.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The requested short code does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The store rejected an insert because the short code is taken.
    #[error("{message}")]
    DuplicateCode { message: String, details: Value },

    /// Every generation attempt collided with an existing code.
    #[error("{message}")]
    CodeSpaceExhausted { message: String, details: Value },

    /// The durable store failed or did not answer in time.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_code(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateCode {
            message: message.into(),
            details,
        }
    }

    pub fn code_space_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CodeSpaceExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for the transient collision signal the shorten retry loop handles.
    pub fn is_duplicate_code(&self) -> bool {
        matches!(self, Self::DuplicateCode { .. })
    }

    /// Converts the error into the public payload.
    ///
    /// Server-side failures are collapsed into a generic `internal_error` so
    /// store details never reach clients.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::Validation { message, details } => {
                ("validation_error", message.clone(), details.clone())
            }
            Self::NotFound { message, details } => ("not_found", message.clone(), details.clone()),
            Self::DuplicateCode { message, details } => {
                ("conflict", message.clone(), details.clone())
            }
            Self::CodeSpaceExhausted { .. }
            | Self::StoreUnavailable { .. }
            | Self::Internal { .. } => (
                "internal_error",
                "Internal server error".to_string(),
                json!({}),
            ),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateCode { .. } => StatusCode::CONFLICT,
            Self::CodeSpaceExhausted { .. }
            | Self::StoreUnavailable { .. }
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, details = ?details_of(&self), "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

fn details_of(error: &AppError) -> &Value {
    match error {
        AppError::Validation { details, .. }
        | AppError::NotFound { details, .. }
        | AppError::DuplicateCode { details, .. }
        | AppError::CodeSpaceExhausted { details, .. }
        | AppError::StoreUnavailable { details, .. }
        | AppError::Internal { details, .. } => details,
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::store_unavailable("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Request validation failed", Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("bad", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::code_space_exhausted("full", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::store_unavailable("down", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let info = AppError::store_unavailable("pool timed out", json!({ "host": "db" }))
            .to_error_info();

        assert_eq!(info.code, "internal_error");
        assert_eq!(info.message, "Internal server error");
        assert_eq!(info.details, json!({}));
    }

    #[test]
    fn test_client_errors_keep_details() {
        let info = AppError::not_found("Short link not found", json!({ "code": "abc123" }))
            .to_error_info();

        assert_eq!(info.code, "not_found");
        assert_eq!(info.details["code"], "abc123");
    }

    #[test]
    fn test_is_duplicate_code() {
        assert!(AppError::duplicate_code("taken", json!({})).is_duplicate_code());
        assert!(!AppError::internal("boom", json!({})).is_duplicate_code());
    }
}
