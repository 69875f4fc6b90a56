//! Repository trait for durable URL record storage.

use crate::domain::entities::{NewUrlRecord, ShortCode, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// The authoritative store of short code → URL records.
///
/// Records are insert-only: there are no update or delete operations here.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecordRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryRecordRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Persists a new record and returns it with its assigned `id` and `created_at`.
    ///
    /// The uniqueness check and the insert are one atomic operation: of two
    /// concurrent inserts with the same code, at most one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if the short code already exists.
    /// Returns [`AppError::StoreUnavailable`] on storage errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Point lookup by short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on storage errors.
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<UrlRecord>, AppError>;

    /// Checks whether the store is reachable.
    async fn health_check(&self) -> bool;
}
