//! Store backends for template records.
//!
//! - [`pg_store::PgTemplateStore`] -- PostgreSQL via a `sqlx` pool.
//! - [`rest_store::RestTemplateStore`] -- a hosted PostgREST endpoint
//!   reached over HTTPS with a service-role key.
//!
//! Both implement [`valentine_core::store::TemplateStore`].

pub mod models;
pub mod pg_store;
pub mod repositories;
pub mod rest_store;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
