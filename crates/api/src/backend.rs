//! Template store construction from configuration.
//!
//! The store returned here carries the elevated credential. Its only
//! intended destination is [`valentine_core::access::AccessFlow::new`].

use std::path::Path;
use std::sync::Arc;

use valentine_core::store::memory::MemoryTemplateStore;
use valentine_core::store::{StoreError, TemplateStore};
use valentine_core::template::Template;
use valentine_db::pg_store::PgTemplateStore;
use valentine_db::rest_store::RestTemplateStore;

use crate::config::StoreConfig;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to load seed file {path}: {reason}")]
    Seed { path: String, reason: String },
}

/// Connect to the configured backend.
///
/// For PostgreSQL this also runs pending migrations.
pub async fn connect_store(config: &StoreConfig) -> Result<Arc<dyn TemplateStore>, BackendError> {
    match config {
        StoreConfig::Postgres { database_url } => {
            let pool = valentine_db::create_pool(database_url).await?;
            tracing::info!("Database connection pool created");

            valentine_db::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            valentine_db::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgTemplateStore::new(pool)))
        }
        StoreConfig::Rest(rest) => {
            let store = RestTemplateStore::new(rest)?;
            tracing::info!(base_url = %rest.base_url, table = %rest.table, "Hosted store client created");
            Ok(Arc::new(store))
        }
        StoreConfig::Memory { seed_path } => {
            let templates = match seed_path {
                Some(path) => load_seed(path).await?,
                None => Vec::new(),
            };
            tracing::warn!(
                seeded = templates.len(),
                "Using in-memory template store; changes are lost on restart",
            );
            Ok(Arc::new(MemoryTemplateStore::with_templates(templates)))
        }
    }
}

/// Read a JSON array of template records.
async fn load_seed(path: &Path) -> Result<Vec<Template>, BackendError> {
    let seed_error = |reason: String| BackendError::Seed {
        path: path.display().to_string(),
        reason,
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| seed_error(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| seed_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use valentine_core::store::TemplateFilter;

    use super::*;

    #[tokio::test]
    async fn memory_backend_loads_seed_file() {
        let path = std::env::temp_dir().join(format!("valentine-seed-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(
            &path,
            r#"[{ "owner_email": "a@x.com", "template_code": "ABC123" }]"#,
        )
        .await
        .unwrap();

        let store = connect_store(&StoreConfig::Memory {
            seed_path: Some(path.clone()),
        })
        .await
        .unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        let found = store
            .find_one(&TemplateFilter::by_credentials("a@x.com", "ABC123"))
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn missing_seed_file_is_an_error() {
        let result = connect_store(&StoreConfig::Memory {
            seed_path: Some("/nonexistent/valentine-seed.json".into()),
        })
        .await;
        assert!(matches!(result, Err(BackendError::Seed { .. })));
    }
}
