//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::entities::ExpireIn;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /api/v1`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/very/long/path",
///   "expire_in": 24
/// }
/// ```
///
/// `expire_in` is the validity window in hours (1 to 8760).
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "short_code": "aB3dE8",
///   "short_url": "https://s.example.com/aB3dE8",
///   "original_url": "https://example.com/very/long/path",
///   "expire_in": 24,
///   "expires_at": "2026-01-02T10:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body fails validation or the URL is not HTTP(S).
/// Returns 500 Internal Server Error if the store is unavailable or no unique
/// code could be generated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let expire_in = ExpireIn::from_hours(payload.expire_in).ok_or_else(|| {
        AppError::bad_request(
            "Invalid expiry",
            json!({ "expire_in": payload.expire_in }),
        )
    })?;

    let record = state
        .shorten_service
        .shorten(&payload.original_url, expire_in)
        .await?;

    let short_url = state.shorten_service.short_url(&record.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::from_record(record, short_url)),
    ))
}
