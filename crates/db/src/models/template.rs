//! Row model for the templates table.

use serde_json::Value;
use sqlx::FromRow;
use valentine_core::template::Template;
use valentine_core::types::{TemplateId, Timestamp};

/// A row from the templates table (`projects` by default).
#[derive(Debug, Clone, FromRow)]
pub struct TemplateRow {
    pub id: TemplateId,
    pub owner_email: String,
    pub template_code: String,
    pub template_type: String,
    pub slug: Option<String>,
    pub is_published: bool,
    pub data: Option<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.id,
            owner_email: row.owner_email,
            template_code: row.template_code,
            template_type: row.template_type,
            slug: row.slug,
            is_published: row.is_published,
            data: row.data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for inserting a template row, as the out-of-band seeding does.
#[derive(Debug, Clone)]
pub struct CreateTemplate {
    pub owner_email: String,
    pub template_code: String,
    pub template_type: String,
}
