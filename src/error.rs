//! Application error type and its HTTP rendering.
//!
//! Every layer returns [`AppError`]. Expected outcomes (a rejected URL, an
//! unknown code) are ordinary variants; only [`AppError::Store`] represents a
//! server-side failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Public message for rejected URLs. Never includes resolver detail.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL";

/// Public message for unknown short codes.
pub const NOT_FOUND_MESSAGE: &str = "Name not found";

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors produced by the shortener.
///
/// `details` is internal context for logs and is never serialized to clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL, missing hostname, or hostname that does not resolve.
    #[error("Invalid URL")]
    InvalidUrl { details: Value },

    /// No mapping exists for the requested code.
    #[error("Name not found")]
    NotFound { details: Value },

    /// The short code is already taken.
    #[error("Short code already taken")]
    Conflict { details: Value },

    /// Persistence layer failure.
    #[error("{message}")]
    Store { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(details: Value) -> Self {
        Self::InvalidUrl { details }
    }

    pub fn not_found(details: Value) -> Self {
        Self::NotFound { details }
    }

    pub fn conflict(details: Value) -> Self {
        Self::Conflict { details }
    }

    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    /// Returns the HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message exposed to clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => INVALID_URL_MESSAGE,
            AppError::NotFound { .. } => NOT_FOUND_MESSAGE,
            AppError::Conflict { .. } => "Short code already taken",
            AppError::Store { .. } => "Internal server error",
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict { .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store { message, details } = &self {
            tracing::error!(%message, %details, "Request failed with storage error");
        }

        let body = ErrorBody {
            error: self.public_message().to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(json!({ "constraint": db.constraint() }));
        }

        AppError::store("Database error", json!({ "cause": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::invalid_url(json!({ "fields": errors.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_url(json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found(json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict(json!({})).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::store("boom", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_hides_message_from_clients() {
        let err = AppError::store("connection reset by peer", json!({}));
        assert_eq!(err.to_string(), "connection reset by peer");
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_invalid_url_message() {
        let err = AppError::invalid_url(json!({ "reason": "dns lookup failed" }));
        assert_eq!(err.public_message(), "Invalid URL");
        assert_eq!(err.to_string(), "Invalid URL");
    }

    #[test]
    fn test_non_database_sqlx_error_maps_to_store() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Store { .. }));
    }

    #[test]
    fn test_is_conflict() {
        assert!(AppError::conflict(json!({})).is_conflict());
        assert!(!AppError::not_found(json!({})).is_conflict());
    }
}
