//! URL record entity representing a persisted short link.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

use super::ShortCode;

/// How long a record stays valid after creation.
///
/// The single duration type carried from request input through storage to the
/// cache TTL. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExpireIn(Duration);

impl ExpireIn {
    const SECONDS_PER_HOUR: u64 = 3600;

    /// Wraps a duration, rejecting zero.
    pub fn new(duration: Duration) -> Option<Self> {
        (!duration.is_zero()).then_some(Self(duration))
    }

    /// Builds a validity window from whole hours, the unit clients send.
    pub fn from_hours(hours: u32) -> Option<Self> {
        Self::new(Duration::from_secs(u64::from(hours) * Self::SECONDS_PER_HOUR))
    }

    /// Builds a validity window from whole seconds, the unit the store keeps.
    pub fn from_secs(seconds: i64) -> Option<Self> {
        u64::try_from(seconds)
            .ok()
            .and_then(|s| Self::new(Duration::from_secs(s)))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Whole seconds, rounded down. Never zero for windows built from hours or seconds.
    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }

    /// Whole hours, rounded down.
    pub fn as_hours(&self) -> u64 {
        self.0.as_secs() / Self::SECONDS_PER_HOUR
    }
}

/// A persisted mapping from a short code to its original URL.
///
/// Created exactly once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRecord {
    pub id: i64,
    pub short_code: ShortCode,
    pub original_url: String,
    pub expire_in: ExpireIn,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    pub fn new(
        id: i64,
        short_code: ShortCode,
        original_url: String,
        expire_in: ExpireIn,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            expire_in,
            created_at,
        }
    }

    /// Absolute expiry: `created_at + expire_in`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        let window = TimeDelta::from_std(self.expire_in.as_duration()).unwrap_or(TimeDelta::MAX);
        self.created_at
            .checked_add_signed(window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at()
    }

    /// Time left until expiry, zero once expired.
    pub fn remaining_validity(&self) -> Duration {
        (self.expires_at() - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Input for creating a new record. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlRecord {
    pub short_code: ShortCode,
    pub original_url: String,
    pub expire_in: ExpireIn,
}
