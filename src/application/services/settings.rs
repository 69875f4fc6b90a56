//! Tunables shared by the shorten and resolve services.

use std::time::Duration;

use crate::config::Config;

/// Timeouts, cache TTL, and retry budget applied by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Upper bound on how long a cache entry lives.
    pub cache_ttl: Duration,
    /// Deadline for each record store call.
    pub store_timeout: Duration,
    /// Deadline for each cache call.
    pub cache_timeout: Duration,
    /// Insert attempts before giving up with `CodeSpaceExhausted`.
    pub max_code_attempts: usize,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cache_ttl: Duration::from_secs(config.cache_ttl_seconds),
            store_timeout: Duration::from_millis(config.store_timeout_ms),
            cache_timeout: Duration::from_millis(config.cache_timeout_ms),
            max_code_attempts: config.max_code_attempts,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(60),
            store_timeout: Duration::from_secs(2),
            cache_timeout: Duration::from_millis(250),
            max_code_attempts: 5,
        }
    }
}
