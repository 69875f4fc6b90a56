//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ResolveService, ServiceSettings, ShortenService};
use crate::domain::repositories::RecordRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::CodeGenerator;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub resolve_service: Arc<ResolveService>,
}

impl AppState {
    /// Wires both services over the same record store and cache.
    pub fn new(
        repository: Arc<dyn RecordRepository>,
        cache: Arc<dyn CacheService>,
        generator: Arc<dyn CodeGenerator>,
        settings: ServiceSettings,
        base_url: impl Into<String>,
    ) -> Self {
        let shorten_service = Arc::new(ShortenService::new(
            repository.clone(),
            cache.clone(),
            generator,
            settings,
            base_url,
        ));
        let resolve_service = Arc::new(ResolveService::new(repository, cache, settings));

        Self {
            shorten_service,
            resolve_service,
        }
    }
}
