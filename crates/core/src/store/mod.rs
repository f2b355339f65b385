//! The template store port.
//!
//! [`TemplateStore`] is the only capability the access flow needs from a
//! backend: fetch at most one row matching an equality filter, and patch a
//! row by primary key. Implementations authenticate with an elevated
//! credential that bypasses row-level policies, which is why only
//! [`crate::access::AccessFlow`] is meant to hold one.

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::template::{Template, TEMPLATE_TYPE};
use crate::types::TemplateId;

// ---------------------------------------------------------------------------
// Filter / patch
// ---------------------------------------------------------------------------

/// Conjunction of column equality tests. `None` columns are unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateFilter {
    pub id: Option<TemplateId>,
    pub owner_email: Option<String>,
    pub template_code: Option<String>,
    pub template_type: Option<String>,
    pub slug: Option<String>,
    pub is_published: Option<bool>,
}

impl TemplateFilter {
    /// Owner lookup by credentials, scoped to this application.
    pub fn by_credentials(owner_email: &str, template_code: &str) -> Self {
        Self {
            owner_email: Some(owner_email.to_string()),
            template_code: Some(template_code.to_string()),
            template_type: Some(TEMPLATE_TYPE.to_string()),
            ..Self::default()
        }
    }

    /// Owner lookup by record id and email, scoped to this application.
    pub fn by_owner(id: TemplateId, owner_email: &str) -> Self {
        Self {
            id: Some(id),
            owner_email: Some(owner_email.to_string()),
            template_type: Some(TEMPLATE_TYPE.to_string()),
            ..Self::default()
        }
    }

    /// Anonymous lookup of a published record by slug.
    pub fn published(slug: &str) -> Self {
        Self {
            slug: Some(slug.to_string()),
            template_type: Some(TEMPLATE_TYPE.to_string()),
            is_published: Some(true),
            ..Self::default()
        }
    }

    /// Narrow the filter to one record id.
    pub fn with_id(mut self, id: TemplateId) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether `t` satisfies every constrained column.
    pub fn matches(&self, t: &Template) -> bool {
        self.id.map_or(true, |id| t.id == id)
            && self
                .owner_email
                .as_deref()
                .map_or(true, |e| t.owner_email == e)
            && self
                .template_code
                .as_deref()
                .map_or(true, |c| t.template_code == c)
            && self
                .template_type
                .as_deref()
                .map_or(true, |ty| t.template_type == ty)
            && self
                .slug
                .as_deref()
                .map_or(true, |s| t.slug.as_deref() == Some(s))
            && self.is_published.map_or(true, |p| t.is_published == p)
    }
}

/// Partial update of a record. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl TemplatePatch {
    /// Apply the patch to an in-memory record.
    pub fn apply(&self, t: &mut Template) {
        if let Some(data) = &self.data {
            t.data = Some(data.clone());
        }
        if let Some(is_published) = self.is_published {
            t.is_published = is_published;
        }
        if let Some(slug) = &self.slug {
            t.slug = Some(slug.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A single-row query matched more than one row.
    #[error("Query matched {0} rows, expected at most one")]
    Ambiguous(usize),

    /// An update targeted a row that does not exist.
    #[error("Template {0} not found")]
    Missing(TemplateId),

    /// Connectivity, protocol, or database error.
    #[error("Store backend error: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Return the single row matching `filter`, `None` if no row matches,
    /// or [`StoreError::Ambiguous`] if several do.
    async fn find_one(&self, filter: &TemplateFilter) -> Result<Option<Template>, StoreError>;

    /// Patch the row with primary key `id` and return it after the write.
    async fn update(&self, id: TemplateId, patch: &TemplatePatch) -> Result<Template, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
