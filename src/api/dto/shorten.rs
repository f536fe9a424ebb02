//! DTOs for the short URL endpoints.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use validator::Validate;

use crate::error::AppError;

/// Longest URL accepted for shortening, in characters.
pub const MAX_URL_LENGTH: u64 = 2048;

/// Request to shorten a URL.
///
/// Accepted as `application/x-www-form-urlencoded` (the HTML form) or as
/// `application/json`. A missing `url` field deserializes to an empty string
/// and fails validation like any other rejected URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_URL_LENGTH))]
    pub url: String,
}

impl<S> FromRequest<S> for ShortenRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("application/json"));

        let payload = if is_json {
            Json::<Self>::from_request(req, state)
                .await
                .map(|Json(payload)| payload)
                .map_err(|e| rejected_body(e.body_text()))?
        } else {
            Form::<Self>::from_request(req, state)
                .await
                .map(|Form(payload)| payload)
                .map_err(|e| rejected_body(e.body_text()))?
        };

        payload.validate()?;
        Ok(payload)
    }
}

fn rejected_body(reason: String) -> AppError {
    debug!(reason = %reason, "Rejected shorten request body");
    AppError::invalid_url(json!({ "reason": reason }))
}

/// Response for a created short code.
///
/// `short_url` carries the bare code; clients build the redirect path as
/// `/api/shorturl/{short_url}`.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
}
