use sqlx::PgPool;
use std::sync::Arc;
use shortlink::domain::entities::{ExpireIn, NewUrlRecord, ShortCode};
use shortlink::domain::repositories::RecordRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgRecordRepository;

fn new_record(code: &str, url: &str, hours: u32) -> NewUrlRecord {
    NewUrlRecord {
        short_code: ShortCode::parse(code).unwrap(),
        original_url: url.to_string(),
        expire_in: ExpireIn::from_hours(hours).unwrap(),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_record(pool: PgPool) {
    let repo = PgRecordRepository::new(Arc::new(pool));

    let record = repo
        .insert(new_record("abc123", "https://example.com", 24))
        .await
        .unwrap();

    assert!(record.id > 0);
    assert_eq!(record.short_code.as_str(), "abc123");
    assert_eq!(record.original_url, "https://example.com");
    assert_eq!(record.expire_in, ExpireIn::from_hours(24).unwrap());
    assert!(!record.is_expired());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_duplicate_code(pool: PgPool) {
    let repo = PgRecordRepository::new(Arc::new(pool));

    repo.insert(new_record("abc123", "https://a.com", 24))
        .await
        .unwrap();
    let result = repo.insert(new_record("abc123", "https://b.com", 24)).await;

    assert!(matches!(result, Err(AppError::DuplicateCode { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_code(pool: PgPool) {
    let repo = PgRecordRepository::new(Arc::new(pool));
    let created = repo
        .insert(new_record("Xy9Zw1", "https://example.com/path", 1))
        .await
        .unwrap();

    let found = repo
        .find_by_code(&ShortCode::parse("Xy9Zw1").unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found, created);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgRecordRepository::new(Arc::new(pool));

    let result = repo
        .find_by_code(&ShortCode::parse("zzzzzz").unwrap())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_codes_are_case_sensitive(pool: PgPool) {
    let repo = PgRecordRepository::new(Arc::new(pool));

    repo.insert(new_record("abcdef", "https://lower.com", 24))
        .await
        .unwrap();
    repo.insert(new_record("ABCDEF", "https://upper.com", 24))
        .await
        .unwrap();

    let upper = repo
        .find_by_code(&ShortCode::parse("ABCDEF").unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(upper.original_url, "https://upper.com");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_purge_expired(pool: PgPool) {
    sqlx::query(
        "INSERT INTO short_urls (short_code, original_url, expire_in_seconds, created_at, expires_at)
         VALUES ($1, $2, 3600, NOW() - INTERVAL '2 hours', NOW() - INTERVAL '1 hour')",
    )
    .bind("old123")
    .bind("https://old.com")
    .execute(&pool)
    .await
    .unwrap();

    let repo = PgRecordRepository::new(Arc::new(pool));
    repo.insert(new_record("new123", "https://new.com", 24))
        .await
        .unwrap();

    assert_eq!(repo.count_all().await.unwrap(), 2);
    assert_eq!(repo.count_expired().await.unwrap(), 1);

    let removed = repo.purge_expired().await.unwrap();

    assert_eq!(removed, 1);
    assert_eq!(repo.count_expired().await.unwrap(), 0);
    assert_eq!(repo.count_all().await.unwrap(), 1);
    assert!(
        repo.find_by_code(&ShortCode::parse("old123").unwrap())
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        repo.find_by_code(&ShortCode::parse("new123").unwrap())
            .await
            .unwrap()
            .is_some()
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_health_check(pool: PgPool) {
    let repo = PgRecordRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}
