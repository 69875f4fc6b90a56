//! PostgreSQL implementation of the record repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::{ExpireIn, NewUrlRecord, ShortCode, UrlRecord};
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

/// Row shape shared by every `short_urls` query.
#[derive(Debug, sqlx::FromRow)]
struct UrlRecordRow {
    id: i64,
    short_code: String,
    original_url: String,
    expire_in_seconds: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<UrlRecordRow> for UrlRecord {
    type Error = AppError;

    fn try_from(row: UrlRecordRow) -> Result<Self, Self::Error> {
        let short_code = ShortCode::parse(&row.short_code).ok_or_else(|| {
            AppError::internal(
                "Stored short code is malformed",
                json!({ "id": row.id, "short_code": row.short_code }),
            )
        })?;

        let expire_in = ExpireIn::from_secs(row.expire_in_seconds).ok_or_else(|| {
            AppError::internal(
                "Stored validity window is not positive",
                json!({ "id": row.id, "expire_in_seconds": row.expire_in_seconds }),
            )
        })?;

        Ok(UrlRecord::new(
            row.id,
            short_code,
            row.original_url,
            expire_in,
            row.created_at,
        ))
    }
}

/// PostgreSQL repository for URL records.
///
/// Uniqueness is enforced by the `short_urls_short_code_key` constraint, whose
/// index also serves `find_by_code`.
pub struct PgRecordRepository {
    pool: Arc<PgPool>,
}

impl PgRecordRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Counts every stored record, expired or not.
    pub async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    /// Counts records that `purge_expired` would remove.
    pub async fn count_expired(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM short_urls WHERE expires_at <= NOW()")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    /// Deletes records whose validity window has passed.
    ///
    /// Returns the number of rows removed. Called by the expiry sweeper; not part
    /// of the [`RecordRepository`] contract.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE expires_at <= NOW()")
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let expire_in_seconds = i64::try_from(new_record.expire_in.as_secs()).map_err(|_| {
            AppError::bad_request(
                "Validity window is too large",
                json!({ "expire_in_seconds": new_record.expire_in.as_secs() }),
            )
        })?;

        let row = sqlx::query_as::<_, UrlRecordRow>(
            r#"
            INSERT INTO short_urls (short_code, original_url, expire_in_seconds, expires_at)
            VALUES ($1, $2, $3, NOW() + make_interval(secs => $3::double precision))
            RETURNING id, short_code, original_url, expire_in_seconds, created_at
            "#,
        )
        .bind(new_record.short_code.as_str())
        .bind(&new_record.original_url)
        .bind(expire_in_seconds)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                debug!("Short code collision on insert: {}", new_record.short_code);
                AppError::duplicate_code(
                    "Short code already exists",
                    json!({ "short_code": new_record.short_code.as_str() }),
                )
            } else {
                AppError::from(e)
            }
        })?;

        row.try_into()
    }

    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRecordRow>(
            r#"
            SELECT id, short_code, original_url, expire_in_seconds, created_at
            FROM short_urls
            WHERE short_code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(UrlRecord::try_from).transpose()
    }

    async fn health_check(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self.pool.as_ref()).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        }
    }
}
