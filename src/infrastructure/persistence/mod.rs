//! Record store implementations.
//!
//! # Repositories
//!
//! - [`PgRecordRepository`] - PostgreSQL storage, used in production
//! - [`MemoryRecordRepository`] - In-process storage for tests and local runs
//!
//! [`expiry_sweeper`] is the store-side background task that removes records
//! past their validity window.

pub mod expiry_sweeper;
pub mod memory_record_repository;
pub mod pg_record_repository;

pub use memory_record_repository::MemoryRecordRepository;
pub use pg_record_repository::PgRecordRepository;
