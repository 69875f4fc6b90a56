//! Business logic services for the application layer.

mod cache_policy;
pub mod resolve_service;
pub mod settings;
pub mod shorten_service;

pub use resolve_service::ResolveService;
pub use settings::ServiceSettings;
pub use shorten_service::ShortenService;
