//! Short code resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use super::ServiceSettings;
use super::cache_policy::{cached_url, health_probe, populate_cache, store_call};
use crate::domain::entities::ShortCode;
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Service for resolving short codes to their original URLs.
///
/// Implements cache-aside: the cache is consulted first, the record store on a
/// miss, and the store's answer is written back to the cache. The cache only
/// affects latency; a cache outage degrades every lookup to a store lookup.
pub struct ResolveService {
    repository: Arc<dyn RecordRepository>,
    cache: Arc<dyn CacheService>,
    settings: ServiceSettings,
}

impl ResolveService {
    /// Creates a new resolve service.
    pub fn new(
        repository: Arc<dyn RecordRepository>,
        cache: Arc<dyn CacheService>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            settings,
        }
    }

    /// Resolves `raw_code` to its original URL.
    ///
    /// # Flow
    ///
    /// 1. Cache hit: return immediately, no store access
    /// 2. Cache miss (or cache failure): look the code up in the store
    /// 3. Store hit: repopulate the cache (best-effort) and return
    /// 4. Store miss: `NotFound`, without retrying or re-probing the cache
    ///
    /// A string that is not a well-formed short code is `NotFound` without any I/O.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::StoreUnavailable`] if the cache missed and the store
    /// failed or timed out.
    pub async fn resolve(&self, raw_code: &str) -> Result<String, AppError> {
        let Some(code) = ShortCode::parse(raw_code) else {
            debug!("Rejecting malformed short code {:?}", raw_code);
            return Err(not_found(raw_code));
        };

        if let Some(url) = cached_url(self.cache.as_ref(), &self.settings, &code).await {
            metrics::counter!("shortlink_cache_hits_total").increment(1);
            debug!("Cache HIT for {}", code);
            return Ok(url);
        }

        metrics::counter!("shortlink_cache_misses_total").increment(1);
        debug!("Cache MISS for {}", code);

        let record = store_call(
            self.settings.store_timeout,
            "find_by_code",
            self.repository.find_by_code(&code),
        )
        .await?
        .ok_or_else(|| not_found(code.as_str()))?;

        populate_cache(self.cache.as_ref(), &self.settings, &record).await;

        Ok(record.original_url)
    }

    /// Reports whether the record store answers within the store deadline.
    pub async fn store_healthy(&self) -> bool {
        health_probe(
            self.settings.store_timeout,
            "Record store",
            self.repository.health_check(),
        )
        .await
    }

    /// Reports whether the cache backend answers within the cache deadline.
    pub async fn cache_healthy(&self) -> bool {
        health_probe(
            self.settings.cache_timeout,
            "Cache",
            self.cache.health_check(),
        )
        .await
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "short_code": code }))
}
