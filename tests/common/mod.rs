#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use shortlink::application::services::ServiceSettings;
use shortlink::domain::entities::ShortCode;
use shortlink::infrastructure::cache::MemoryCache;
use shortlink::infrastructure::persistence::MemoryRecordRepository;
use shortlink::state::AppState;
use shortlink::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

pub const BASE_URL: &str = "https://s.example.com";

/// Hands out a fixed sequence of codes, then falls back to random ones.
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<ShortCode>>,
    fallback: RandomCodeGenerator,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(
                codes
                    .iter()
                    .map(|c| ShortCode::parse(c).unwrap())
                    .collect(),
            ),
            fallback: RandomCodeGenerator::default(),
        }
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self) -> ShortCode {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.generate())
    }
}

/// In-memory store and cache, shared with the returned state.
pub struct TestBackend {
    pub repository: Arc<MemoryRecordRepository>,
    pub cache: Arc<MemoryCache>,
    pub state: AppState,
}

pub fn create_test_backend(generator: Arc<dyn CodeGenerator>) -> TestBackend {
    let repository = Arc::new(MemoryRecordRepository::new());
    let cache = Arc::new(MemoryCache::new());

    let state = AppState::new(
        repository.clone(),
        cache.clone(),
        generator,
        ServiceSettings::default(),
        BASE_URL,
    );

    TestBackend {
        repository,
        cache,
        state,
    }
}

pub fn create_test_state() -> AppState {
    create_test_backend(Arc::new(RandomCodeGenerator::default())).state
}

pub fn code(raw: &str) -> ShortCode {
    ShortCode::parse(raw).unwrap()
}
