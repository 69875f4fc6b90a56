//! Short link creation service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tracing::{debug, info};

use super::ServiceSettings;
use super::cache_policy::{populate_cache, store_call};
use crate::domain::entities::{ExpireIn, NewUrlRecord, ShortCode, UrlRecord};
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::validate_original_url;

/// Service for creating short links.
///
/// Generates a candidate code, inserts the record, regenerates on collision,
/// then primes the lookup cache. Only the insert must succeed; the cache write
/// is best-effort.
pub struct ShortenService {
    repository: Arc<dyn RecordRepository>,
    cache: Arc<dyn CacheService>,
    generator: Arc<dyn CodeGenerator>,
    settings: ServiceSettings,
    base_url: String,
}

impl ShortenService {
    /// Creates a new shorten service.
    ///
    /// `base_url` is the public prefix short URLs are composed from, e.g.
    /// `https://s.example.com`.
    pub fn new(
        repository: Arc<dyn RecordRepository>,
        cache: Arc<dyn CacheService>,
        generator: Arc<dyn CodeGenerator>,
        settings: ServiceSettings,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            cache,
            generator,
            settings,
            base_url: base_url.into(),
        }
    }

    /// Creates a short link for `original_url`, valid for `expire_in`.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL
    /// 2. Generate a code and insert; on `DuplicateCode` regenerate, up to
    ///    `max_code_attempts` inserts in total
    /// 3. Prime the cache (failures are logged, not returned)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or not HTTP(S).
    /// Returns [`AppError::CodeSpaceExhausted`] if every attempt collided.
    /// Returns [`AppError::StoreUnavailable`] if the store fails or times out.
    pub async fn shorten(
        &self,
        original_url: &str,
        expire_in: ExpireIn,
    ) -> Result<UrlRecord, AppError> {
        let original_url = validate_original_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let record = self.insert_with_unique_code(original_url, expire_in).await?;

        metrics::counter!("shortlink_records_created_total").increment(1);
        info!(
            "Created short link {} (id: {}, expires in {}h)",
            record.short_code,
            record.id,
            record.expire_in.as_hours()
        );

        populate_cache(self.cache.as_ref(), &self.settings, &record).await;

        Ok(record)
    }

    /// Composes the public short URL for a code.
    pub fn short_url(&self, code: &ShortCode) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    async fn insert_with_unique_code(
        &self,
        original_url: &str,
        expire_in: ExpireIn,
    ) -> Result<UrlRecord, AppError> {
        let attempts = self.settings.max_code_attempts.max(1);
        let retries = std::iter::repeat_n(Duration::ZERO, attempts - 1);

        let result = RetryIf::spawn(
            retries,
            move || self.try_insert(original_url, expire_in),
            |e: &AppError| {
                if e.is_duplicate_code() {
                    metrics::counter!("shortlink_code_collisions_total").increment(1);
                    debug!("Short code collision, regenerating");
                }
                e.is_duplicate_code()
            },
        )
        .await;

        match result {
            Err(e) if e.is_duplicate_code() => Err(AppError::code_space_exhausted(
                "Failed to generate a unique short code",
                json!({ "attempts": attempts }),
            )),
            other => other,
        }
    }

    async fn try_insert(
        &self,
        original_url: &str,
        expire_in: ExpireIn,
    ) -> Result<UrlRecord, AppError> {
        let new_record = NewUrlRecord {
            short_code: self.generator.generate(),
            original_url: original_url.to_string(),
            expire_in,
        };

        store_call(
            self.settings.store_timeout,
            "insert",
            self.repository.insert(new_record),
        )
        .await
    }
}
