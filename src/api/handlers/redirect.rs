//! Handler for short code redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /api/shorturl/{code}`
///
/// # Response
///
/// `302 Found` with `Location` set to the stored URL.
///
/// # Errors
///
/// Returns 404 `{"error": "Name not found"}` if the code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.redirect_service.resolve(&code).await?;
    let location = location_header(&url)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value for a stored URL.
///
/// URLs are stored verbatim, so one may contain raw non-ASCII or control
/// bytes. Those fall back to the percent-encoded serialization.
fn location_header(url: &str) -> Result<HeaderValue, AppError> {
    if url.is_ascii()
        && let Ok(value) = HeaderValue::from_str(url)
    {
        return Ok(value);
    }

    Url::parse(url)
        .ok()
        .and_then(|parsed| HeaderValue::from_str(parsed.as_str()).ok())
        .ok_or_else(|| {
            AppError::store(
                "Stored URL cannot be used as a Location header",
                json!({ "url": url }),
            )
        })
}
