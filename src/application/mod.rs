//! Application layer services implementing the shorten and resolve flows.
//!
//! Services are the only callers of the record store and the lookup cache.
//! Both collaborators are injected at construction, so tests can substitute
//! in-memory or mocked implementations.
//!
//! # Available Services
//!
//! - [`services::ShortenService`] - Code generation, persistence, cache priming
//! - [`services::ResolveService`] - Cache-aside lookup with store fallback

pub mod services;
