//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and caching.
//!
//! # Modules
//!
//! - [`cache`] - Lookup cache implementations (Redis, in-memory, no-op)
//! - [`persistence`] - Record store implementations and the expiry sweeper

pub mod cache;
pub mod persistence;
