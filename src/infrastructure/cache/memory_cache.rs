//! In-process cache with per-entry deadlines.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::ShortCode;
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Clone, Debug)]
struct CachedEntry {
    url: String,
    expires_at: Instant,
}

/// Thread-safe lookup cache with TTL-based expiry.
///
/// Deadlines use the tokio clock, so tests can advance time with
/// `tokio::time::advance`. Expired entries are dropped lazily on read.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, CachedEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_code: &ShortCode) -> CacheResult<Option<String>> {
        if let Some(entry) = self.entries.get(short_code.as_str()) {
            if Instant::now() < entry.expires_at {
                debug!("Memory cache HIT: {}", short_code);
                return Ok(Some(entry.url.clone()));
            }
            // Release the read guard before removing.
            drop(entry);
            self.entries
                .remove_if(short_code.as_str(), |_, e| Instant::now() >= e.expires_at);
        }

        debug!("Memory cache MISS: {}", short_code);
        Ok(None)
    }

    async fn set_url(
        &self,
        short_code: &ShortCode,
        original_url: &str,
        ttl: Duration,
    ) -> CacheResult<()> {
        self.entries.insert(
            short_code.as_str().to_string(),
            CachedEntry {
                url: original_url.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
