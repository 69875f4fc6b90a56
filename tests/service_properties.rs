mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use shortlink::domain::entities::{ExpireIn, NewUrlRecord};
use shortlink::domain::repositories::RecordRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::cache::CacheService;
use shortlink::utils::code_generator::RandomCodeGenerator;

fn day() -> ExpireIn {
    ExpireIn::from_hours(24).unwrap()
}

#[tokio::test]
async fn test_shorten_then_resolve_round_trip() {
    let backend = common::create_test_backend(Arc::new(RandomCodeGenerator::default()));
    let state = &backend.state;

    let record = state
        .shorten_service
        .shorten("https://example.com/very/long/path?q=1#frag", day())
        .await
        .unwrap();

    let url = state
        .resolve_service
        .resolve(record.short_code.as_str())
        .await
        .unwrap();

    assert_eq!(url, "https://example.com/very/long/path?q=1#frag");
}

#[tokio::test]
async fn test_example_scenario_with_scripted_code() {
    let backend =
        common::create_test_backend(Arc::new(common::ScriptedGenerator::new(&["aB3dE8"])));
    let state = &backend.state;

    let record = state
        .shorten_service
        .shorten("https://example.com/very/long/path", day())
        .await
        .unwrap();

    assert_eq!(record.short_code.as_str(), "aB3dE8");
    assert_eq!(
        state.shorten_service.short_url(&record.short_code),
        "https://s.example.com/aB3dE8"
    );

    // Creation primed the cache
    assert_eq!(
        backend.cache.get_url(&common::code("aB3dE8")).await.unwrap(),
        Some("https://example.com/very/long/path".to_string())
    );

    assert_eq!(
        state.resolve_service.resolve("aB3dE8").await.unwrap(),
        "https://example.com/very/long/path"
    );
}

#[tokio::test]
async fn test_collision_regenerates_code() {
    let backend = common::create_test_backend(Arc::new(common::ScriptedGenerator::new(&[
        "taken1", "taken1", "fresh1",
    ])));
    let state = &backend.state;

    let first = state
        .shorten_service
        .shorten("https://first.com", day())
        .await
        .unwrap();
    let second = state
        .shorten_service
        .shorten("https://second.com", day())
        .await
        .unwrap();

    assert_eq!(first.short_code.as_str(), "taken1");
    assert_eq!(second.short_code.as_str(), "fresh1");
    assert_eq!(
        state.resolve_service.resolve("taken1").await.unwrap(),
        "https://first.com"
    );
    assert_eq!(backend.repository.len(), 2);
}

#[tokio::test]
async fn test_exhausted_code_space() {
    let backend = common::create_test_backend(Arc::new(common::ScriptedGenerator::new(&[
        "taken1", "taken1", "taken1", "taken1", "taken1", "taken1",
    ])));
    let state = &backend.state;

    state
        .shorten_service
        .shorten("https://first.com", day())
        .await
        .unwrap();

    let result = state
        .shorten_service
        .shorten("https://second.com", day())
        .await;

    assert!(matches!(result, Err(AppError::CodeSpaceExhausted { .. })));
    assert_eq!(backend.repository.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shortens_get_distinct_codes() {
    const N: usize = 64;

    let backend = common::create_test_backend(Arc::new(RandomCodeGenerator::new(6)));

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let state = backend.state.clone();
            tokio::spawn(async move {
                state
                    .shorten_service
                    .shorten(&format!("https://example.com/{i}"), day())
                    .await
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        codes.insert(record.short_code.into_inner());
    }

    assert_eq!(codes.len(), N);
    assert_eq!(backend.repository.len(), N);
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let state = common::create_test_state();

    let result = state.resolve_service.resolve("zzzzzz").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_miss_repopulates_cache() {
    let backend = common::create_test_backend(Arc::new(RandomCodeGenerator::default()));

    // Written straight to the store, so the cache has never seen it
    backend
        .repository
        .insert(NewUrlRecord {
            short_code: common::code("abc123"),
            original_url: "https://example.com".to_string(),
            expire_in: day(),
        })
        .await
        .unwrap();
    assert!(backend.cache.is_empty());

    let url = backend.state.resolve_service.resolve("abc123").await.unwrap();

    assert_eq!(url, "https://example.com");
    assert_eq!(
        backend.cache.get_url(&common::code("abc123")).await.unwrap(),
        Some("https://example.com".to_string())
    );
}

#[tokio::test]
async fn test_cache_hit_takes_precedence_over_store() {
    let backend = common::create_test_backend(Arc::new(RandomCodeGenerator::default()));
    let code = common::code("abc123");

    backend
        .repository
        .insert(NewUrlRecord {
            short_code: code.clone(),
            original_url: "https://store.com".to_string(),
            expire_in: day(),
        })
        .await
        .unwrap();
    backend
        .cache
        .set_url(&code, "https://cache.com", Duration::from_secs(60))
        .await
        .unwrap();

    let url = backend.state.resolve_service.resolve("abc123").await.unwrap();

    assert_eq!(url, "https://cache.com");
}

#[tokio::test(start_paused = true)]
async fn test_resolve_is_stable_across_cache_expiry() {
    let backend = common::create_test_backend(Arc::new(RandomCodeGenerator::default()));
    let state = &backend.state;

    let record = state
        .shorten_service
        .shorten("https://example.com/stable", day())
        .await
        .unwrap();
    let code = record.short_code.as_str();

    let before = state.resolve_service.resolve(code).await.unwrap();

    tokio::time::advance(Duration::from_secs(61)).await;
    assert_eq!(
        backend.cache.get_url(&record.short_code).await.unwrap(),
        None
    );

    let after = state.resolve_service.resolve(code).await.unwrap();

    assert_eq!(before, "https://example.com/stable");
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_invalid_url_creates_nothing() {
    let backend = common::create_test_backend(Arc::new(RandomCodeGenerator::default()));

    let result = backend
        .state
        .shorten_service
        .shorten("ftp://example.com/file", day())
        .await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
    assert!(backend.repository.is_empty());
    assert!(backend.cache.is_empty());
}
