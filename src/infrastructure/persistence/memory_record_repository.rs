//! In-process implementation of the record repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewUrlRecord, ShortCode, UrlRecord};
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;

/// Record store backed by a sharded concurrent map.
///
/// Inserts go through the map's entry API, so the existence check and the
/// write happen under the same shard lock. Records live until the process exits.
#[derive(Debug)]
pub struct MemoryRecordRepository {
    records: DashMap<String, UrlRecord>,
    next_id: AtomicI64,
}

impl MemoryRecordRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordRepository for MemoryRecordRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        match self.records.entry(new_record.short_code.as_str().to_string()) {
            Entry::Occupied(_) => Err(AppError::duplicate_code(
                "Short code already exists",
                json!({ "short_code": new_record.short_code.as_str() }),
            )),
            Entry::Vacant(slot) => {
                let record = UrlRecord::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    new_record.short_code,
                    new_record.original_url,
                    new_record.expire_in,
                    Utc::now(),
                );
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.records.get(code.as_str()).map(|r| r.value().clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
