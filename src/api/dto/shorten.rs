//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Longest validity a client may request: one year, in hours.
pub const MAX_EXPIRE_IN_HOURS: u32 = 8760;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub original_url: String,

    /// Validity window in whole hours.
    #[validate(range(
        min = 1,
        max = MAX_EXPIRE_IN_HOURS,
        message = "expire_in must be between 1 and 8760 hours"
    ))]
    pub expire_in: u32,
}

/// Created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    /// Validity window in hours, as requested.
    pub expire_in: u64,
    pub expires_at: DateTime<Utc>,
}

impl ShortenResponse {
    pub fn from_record(record: UrlRecord, short_url: String) -> Self {
        let expires_at = record.expires_at();

        Self {
            id: record.id,
            short_code: record.short_code.into_inner(),
            short_url,
            original_url: record.original_url,
            expire_in: record.expire_in.as_hours(),
            expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str, hours: u32) -> ShortenRequest {
        ShortenRequest {
            original_url: url.to_string(),
            expire_in: hours,
        }
    }

    #[test]
    fn test_expire_in_bounds() {
        assert!(request("https://example.com", 1).validate().is_ok());
        assert!(request("https://example.com", MAX_EXPIRE_IN_HOURS).validate().is_ok());
        assert!(request("https://example.com", 0).validate().is_err());
        assert!(request("https://example.com", MAX_EXPIRE_IN_HOURS + 1).validate().is_err());
    }

    #[test]
    fn test_empty_url_rejected() {
        let errors = request("", 24).validate().unwrap_err();

        assert!(errors.field_errors().contains_key("original_url"));
    }
}
