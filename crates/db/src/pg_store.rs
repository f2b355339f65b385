//! PostgreSQL-backed [`TemplateStore`].

use async_trait::async_trait;
use valentine_core::store::{StoreError, TemplateFilter, TemplatePatch, TemplateStore};
use valentine_core::template::Template;
use valentine_core::types::TemplateId;

use crate::repositories::TemplateRepo;
use crate::DbPool;

/// Template store over a `sqlx` pool. The database role in the connection
/// URL is the elevated credential.
#[derive(Clone)]
pub struct PgTemplateStore {
    pool: DbPool,
}

impl PgTemplateStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn find_one(&self, filter: &TemplateFilter) -> Result<Option<Template>, StoreError> {
        // Two rows are enough to detect ambiguity.
        let mut rows = TemplateRepo::find_matching(&self.pool, filter, 2)
            .await
            .map_err(backend)?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop().map(Template::from)),
            n => Err(StoreError::Ambiguous(n)),
        }
    }

    async fn update(&self, id: TemplateId, patch: &TemplatePatch) -> Result<Template, StoreError> {
        TemplateRepo::update(&self.pool, id, patch)
            .await
            .map_err(backend)?
            .map(Template::from)
            .ok_or(StoreError::Missing(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(backend)
    }
}
