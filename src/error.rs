//! Application error taxonomy and its HTTP mapping.
//!
//! Every failure path in the service ends up as one [`AppError`] variant, and
//! every variant maps to a stable status code and machine-readable `code`
//! string in the JSON error body.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

use crate::utils::db_error::{is_transient, is_unique_violation_on_code};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description embedded in every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed URL or short code. User-correctable.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Operation on a code that has no live link.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The short code is already taken by a live link.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// No free generated code was found within the retry bound.
    /// Transient: the whole creation request may be retried.
    #[error("{message}")]
    AllocationExhausted { message: String, details: Value },

    /// Persistence failure. Storage-engine detail is logged, never returned.
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
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn allocation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::AllocationExhausted {
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

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::AllocationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code string used in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::AllocationExhausted { .. } => "allocation_exhausted",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict { .. })
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::AllocationExhausted { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_code(&e) {
            return AppError::conflict("Short code is already in use", json!({}));
        }

        tracing::error!(error = %e, "Database error");

        if is_transient(&e) {
            AppError::internal("Storage unavailable", json!({ "retryable": true }))
        } else {
            AppError::internal("Database error", json!({}))
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query string",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .iter()
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

        AppError::bad_request("Validation failed", Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_stable() {
        let cases = [
            (AppError::bad_request("x", json!({})), 400, "validation_error"),
            (AppError::not_found("x", json!({})), 404, "not_found"),
            (AppError::conflict("x", json!({})), 409, "conflict"),
            (
                AppError::allocation_exhausted("x", json!({})),
                503,
                "allocation_exhausted",
            ),
            (AppError::internal("x", json!({})), 500, "internal_error"),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status_code().as_u16(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::conflict("Short code is already in use", json!({ "code": "abc" }));
        assert_eq!(err.to_string(), "Short code is already in use");
        assert!(err.is_conflict());
    }

    #[test]
    fn test_error_info_carries_details() {
        let err = AppError::not_found("Short link not found", json!({ "code": "zzz" }));
        let info = err.to_error_info();

        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "Short link not found");
        assert_eq!(info.details["code"], "zzz");
    }

    #[test]
    fn test_non_database_sqlx_error_is_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Database error");
    }

    #[test]
    fn test_pool_timeout_is_reported_retryable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.to_error_info().details["retryable"], true);
    }

    #[test]
    fn test_dropped_connection_is_reported_retryable() {
        let err: AppError = sqlx::Error::Io(std::io::Error::other("broken pipe")).into();
        assert_eq!(err.to_string(), "Storage unavailable");
        assert_eq!(err.to_error_info().details["retryable"], true);
    }
}
