//! Bounded, best-effort access to the record store and lookup cache.

use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::ServiceSettings;
use crate::domain::entities::{ShortCode, UrlRecord};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Awaits a store call, turning an elapsed deadline into `StoreUnavailable`.
pub(super) async fn store_call<T, F>(
    deadline: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(AppError::store_unavailable(
            "Record store did not respond in time",
            json!({ "operation": operation, "timeout_ms": deadline.as_millis() as u64 }),
        )),
    }
}

/// Awaits a health probe; an elapsed deadline counts as unhealthy.
pub(super) async fn health_probe<F>(deadline: Duration, component: &'static str, probe: F) -> bool
where
    F: Future<Output = bool>,
{
    match timeout(deadline, probe).await {
        Ok(healthy) => healthy,
        Err(_) => {
            warn!("{} health check timed out after {}ms", component, deadline.as_millis());
            false
        }
    }
}

/// TTL for a cache entry derived from `record`.
///
/// Never outlives the record's own validity; `None` once the record has expired.
pub(super) fn cache_ttl_for(cache_ttl: Duration, record: &UrlRecord) -> Option<Duration> {
    let ttl = cache_ttl.min(record.remaining_validity());
    (!ttl.is_zero()).then_some(ttl)
}

/// Reads the cache, degrading every failure to a miss.
pub(super) async fn cached_url(
    cache: &dyn CacheService,
    settings: &ServiceSettings,
    code: &ShortCode,
) -> Option<String> {
    match timeout(settings.cache_timeout, cache.get_url(code)).await {
        Ok(Ok(hit)) => hit,
        Ok(Err(e)) => {
            metrics::counter!("shortlink_cache_errors_total").increment(1);
            warn!("Cache read failed for {}, falling back to store: {}", code, e);
            None
        }
        Err(_) => {
            metrics::counter!("shortlink_cache_errors_total").increment(1);
            warn!("Cache read timed out for {}, falling back to store", code);
            None
        }
    }
}

/// Writes `record` to the cache. Failures are logged and never propagated.
pub(super) async fn populate_cache(
    cache: &dyn CacheService,
    settings: &ServiceSettings,
    record: &UrlRecord,
) {
    let Some(ttl) = cache_ttl_for(settings.cache_ttl, record) else {
        debug!("Skipping cache write for expired record {}", record.short_code);
        return;
    };

    let write = cache.set_url(&record.short_code, &record.original_url, ttl);
    match timeout(settings.cache_timeout, write).await {
        Ok(Ok(())) => debug!("Cached {} (TTL: {}ms)", record.short_code, ttl.as_millis()),
        Ok(Err(e)) => {
            metrics::counter!("shortlink_cache_errors_total").increment(1);
            warn!("Cache write failed for {}: {}", record.short_code, e);
        }
        Err(_) => {
            metrics::counter!("shortlink_cache_errors_total").increment(1);
            warn!("Cache write timed out for {}", record.short_code);
        }
    }
}
