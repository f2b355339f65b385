//! [`TemplateStore`] over a hosted PostgREST endpoint (e.g. Supabase).
//!
//! Filters become `column=eq.value` query parameters on
//! `{base_url}/rest/v1/{table}`. Updates are `PATCH ?id=eq.{id}` with
//! `Prefer: return=representation` so the written row comes back. The
//! service-role key is sent as both `apikey` and bearer token, which makes
//! the endpoint skip row-level security.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use valentine_core::store::{StoreError, TemplateFilter, TemplatePatch, TemplateStore};
use valentine_core::template::Template;
use valentine_core::types::TemplateId;

/// Connection settings for the hosted store.
#[derive(Clone)]
pub struct RestConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// Service-role key. Bypasses row-level security; never log it.
    pub service_role_key: String,
    /// Table holding template rows.
    pub table: String,
}

impl fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestConfig")
            .field("base_url", &self.base_url)
            .field("service_role_key", &"***")
            .field("table", &self.table)
            .finish()
    }
}

pub struct RestTemplateStore {
    client: reqwest::Client,
    endpoint: String,
}

fn backend(err: reqwest::Error) -> StoreError {
    // Request URLs carry filter values, template codes included.
    StoreError::Backend(err.without_url().to_string())
}

impl RestTemplateStore {
    pub fn new(config: &RestConfig) -> Result<Self, StoreError> {
        let mut key = HeaderValue::from_str(&config.service_role_key)
            .map_err(|_| StoreError::Backend("Service role key is not a valid header value".into()))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_role_key))
            .map_err(|_| StoreError::Backend("Service role key is not a valid header value".into()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(backend)?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.base_url.trim_end_matches('/'),
                config.table
            ),
        })
    }
}

/// Translate a filter into PostgREST query parameters.
fn filter_params(filter: &TemplateFilter) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_string())];

    if let Some(id) = filter.id {
        params.push(("id", format!("eq.{id}")));
    }
    if let Some(email) = &filter.owner_email {
        params.push(("owner_email", format!("eq.{email}")));
    }
    if let Some(code) = &filter.template_code {
        params.push(("template_code", format!("eq.{code}")));
    }
    if let Some(template_type) = &filter.template_type {
        params.push(("template_type", format!("eq.{template_type}")));
    }
    if let Some(slug) = &filter.slug {
        params.push(("slug", format!("eq.{slug}")));
    }
    if let Some(is_published) = filter.is_published {
        params.push(("is_published", format!("eq.{is_published}")));
    }
    params
}

#[async_trait]
impl TemplateStore for RestTemplateStore {
    async fn find_one(&self, filter: &TemplateFilter) -> Result<Option<Template>, StoreError> {
        let mut rows: Vec<Template> = self
            .client
            .get(&self.endpoint)
            .query(&filter_params(filter))
            .query(&[("limit", "2")])
            .send()
            .await
            .map_err(backend)?
            .error_for_status()
            .map_err(backend)?
            .json()
            .await
            .map_err(backend)?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(StoreError::Ambiguous(n)),
        }
    }

    async fn update(&self, id: TemplateId, patch: &TemplatePatch) -> Result<Template, StoreError> {
        let mut rows: Vec<Template> = self
            .client
            .patch(&self.endpoint)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .map_err(backend)?
            .error_for_status()
            .map_err(backend)?
            .json()
            .await
            .map_err(backend)?;

        rows.pop().ok_or(StoreError::Missing(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .get(&self.endpoint)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(backend)?
            .error_for_status()
            .map_err(backend)?;
        Ok(())
    }
}
