//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for durable record storage
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! See integration tests in `tests/repository_record.rs` for the PostgreSQL
//! implementation.

pub mod record_repository;

pub use record_repository::RecordRepository;

#[cfg(test)]
pub use record_repository::MockRecordRepository;
