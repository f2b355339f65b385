//! Integration tests for the PostgreSQL template store.
//!
//! Require a reachable database via `DATABASE_URL`; run with
//! `cargo test -p valentine-db -- --ignored`.

use serde_json::json;
use sqlx::PgPool;
use valentine_core::store::{StoreError, TemplateFilter, TemplatePatch, TemplateStore};
use valentine_core::template::TEMPLATE_TYPE;
use valentine_db::models::template::CreateTemplate;
use valentine_db::pg_store::PgTemplateStore;
use valentine_db::repositories::TemplateRepo;

async fn seed(pool: &PgPool, email: &str, code: &str) -> valentine_db::models::template::TemplateRow {
    let input = CreateTemplate {
        owner_email: email.to_string(),
        template_code: code.to_string(),
        template_type: TEMPLATE_TYPE.to_string(),
    };
    TemplateRepo::create(pool, &input)
        .await
        .expect("seeding should succeed")
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn find_one_by_credentials(pool: PgPool) {
    let row = seed(&pool, "a@x.com", "ABC123").await;
    let store = PgTemplateStore::new(pool);

    let found = store
        .find_one(&TemplateFilter::by_credentials("a@x.com", "ABC123"))
        .await
        .unwrap();
    assert_eq!(found.map(|t| t.id), Some(row.id));

    let miss = store
        .find_one(&TemplateFilter::by_credentials("a@x.com", "WRONG"))
        .await
        .unwrap();
    assert!(miss.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_credentials_are_ambiguous(pool: PgPool) {
    seed(&pool, "a@x.com", "ABC123").await;
    seed(&pool, "a@x.com", "ABC123").await;
    let store = PgTemplateStore::new(pool);

    let result = store
        .find_one(&TemplateFilter::by_credentials("a@x.com", "ABC123"))
        .await;
    assert!(matches!(result, Err(StoreError::Ambiguous(2))));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_publishes_and_returns_row(pool: PgPool) {
    let row = seed(&pool, "a@x.com", "ABC123").await;
    let store = PgTemplateStore::new(pool);

    let patch = TemplatePatch {
        data: Some(json!({ "question": "Marry me?" })),
        is_published: Some(true),
        slug: Some("abcd1234".to_string()),
    };
    let updated = store.update(row.id, &patch).await.unwrap();

    assert!(updated.is_published);
    assert_eq!(updated.slug.as_deref(), Some("abcd1234"));
    assert_eq!(updated.data, Some(json!({ "question": "Marry me?" })));
    assert!(updated.updated_at >= row.updated_at);

    let public = store
        .find_one(&TemplateFilter::published("abcd1234"))
        .await
        .unwrap();
    assert_eq!(public.map(|t| t.id), Some(row.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_unknown_id_is_missing(pool: PgPool) {
    let store = PgTemplateStore::new(pool);
    let id = uuid::Uuid::new_v4();

    let result = store.update(id, &TemplatePatch::default()).await;
    assert!(matches!(result, Err(StoreError::Missing(missing)) if missing == id));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn ping_succeeds(pool: PgPool) {
    let store = PgTemplateStore::new(pool);
    store.ping().await.unwrap();
}
