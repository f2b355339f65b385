//! In-process [`TemplateStore`] used for local development and tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, TemplateFilter, TemplatePatch, TemplateStore};
use crate::template::Template;
use crate::types::TemplateId;

/// A vector of rows behind a lock. Counts update calls so tests can assert
/// on write-back behaviour.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    rows: RwLock<Vec<Template>>,
    update_calls: AtomicUsize,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-seeded with `templates`.
    pub fn with_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        Self {
            rows: RwLock::new(templates.into_iter().collect()),
            update_calls: AtomicUsize::new(0),
        }
    }

    /// Add a row, as an out-of-band seed would.
    pub async fn insert(&self, template: Template) {
        self.rows.write().await.push(template);
    }

    /// Look a row up by id without any access checks.
    pub async fn get(&self, id: TemplateId) -> Option<Template> {
        self.rows.read().await.iter().find(|t| t.id == id).cloned()
    }

    /// Number of `update` calls received, successful or not.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn find_one(&self, filter: &TemplateFilter) -> Result<Option<Template>, StoreError> {
        let rows = self.rows.read().await;
        let mut matching = rows.iter().filter(|t| filter.matches(t));
        let first = matching.next().cloned();
        let extra = matching.count();
        if extra > 0 {
            return Err(StoreError::Ambiguous(extra + 1));
        }
        Ok(first)
    }

    async fn update(&self, id: TemplateId, patch: &TemplatePatch) -> Result<Template, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::Missing(id))?;
        patch.apply(row);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}
