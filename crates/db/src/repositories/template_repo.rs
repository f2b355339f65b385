//! Repository for the `projects` table holding template records.

use sqlx::{PgPool, Postgres, QueryBuilder};
use valentine_core::store::{TemplateFilter, TemplatePatch};
use valentine_core::types::TemplateId;

use crate::models::template::{CreateTemplate, TemplateRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_email, template_code, template_type, slug, \
                       is_published, data, created_at, updated_at";

/// Equality-filtered reads and by-id patches of template rows.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template row, returning it.
    pub async fn create(pool: &PgPool, input: &CreateTemplate) -> Result<TemplateRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_email, template_code, template_type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(&input.owner_email)
            .bind(&input.template_code)
            .bind(&input.template_type)
            .fetch_one(pool)
            .await
    }

    /// Fetch at most `limit` rows matching every constrained column of `filter`.
    pub async fn find_matching(
        pool: &PgPool,
        filter: &TemplateFilter,
        limit: i64,
    ) -> Result<Vec<TemplateRow>, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM projects WHERE TRUE"));

        if let Some(id) = filter.id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(email) = &filter.owner_email {
            qb.push(" AND owner_email = ").push_bind(email.clone());
        }
        if let Some(code) = &filter.template_code {
            qb.push(" AND template_code = ").push_bind(code.clone());
        }
        if let Some(template_type) = &filter.template_type {
            qb.push(" AND template_type = ").push_bind(template_type.clone());
        }
        if let Some(slug) = &filter.slug {
            qb.push(" AND slug = ").push_bind(slug.clone());
        }
        if let Some(is_published) = filter.is_published {
            qb.push(" AND is_published = ").push_bind(is_published);
        }
        qb.push(" LIMIT ").push_bind(limit);

        qb.build_query_as::<TemplateRow>().fetch_all(pool).await
    }

    /// Apply `patch` to the row with `id`, bumping `updated_at`.
    ///
    /// Returns `None` if no row has that id.
    pub async fn update(
        pool: &PgPool,
        id: TemplateId,
        patch: &TemplatePatch,
    ) -> Result<Option<TemplateRow>, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE projects SET updated_at = NOW()");

        if let Some(data) = &patch.data {
            qb.push(", data = ").push_bind(data.clone());
        }
        if let Some(is_published) = patch.is_published {
            qb.push(", is_published = ").push_bind(is_published);
        }
        if let Some(slug) = &patch.slug {
            qb.push(", slug = ").push_bind(slug.clone());
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {COLUMNS}"));

        qb.build_query_as::<TemplateRow>()
            .fetch_optional(pool)
            .await
    }
}
