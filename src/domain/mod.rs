//! Domain layer containing entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures ([`entities::UrlRecord`], [`entities::ShortCode`])
//! - [`repositories`] - Record store trait implemented by the infrastructure layer
//!
//! The lookup cache contract lives next to its implementations in
//! [`crate::infrastructure::cache`]; both are consumed only by
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
