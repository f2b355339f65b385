//! Credential-gated access to template records.
//!
//! Every HTTP route funnels through [`AccessFlow`], which owns the store
//! handle. The flow normalizes input, runs the equality lookup, collapses
//! every kind of miss into one generic error, lazily initializes missing
//! greeting data, and assigns a slug on first publish.
//!
//! Causes of failure (which column mismatched, store errors) are logged and
//! never returned, so a caller cannot tell a wrong email from a wrong code,
//! or an unpublished record from a nonexistent one.

use std::fmt;
use std::sync::Arc;

use crate::email::normalize_email;
use crate::error::CoreError;
use crate::slug::generate_slug;
use crate::store::{TemplateFilter, TemplatePatch, TemplateStore};
use crate::template::{OwnedTemplate, PublicTemplate, Template, TemplateData, TemplateSummary};
use crate::types::TemplateId;

/// Validation messages for blank required fields.
pub const MISSING_CREDENTIALS: &str = "Email and template code are required.";
pub const MISSING_UPDATE_FIELDS: &str = "Email, template code, and template ID are required.";
pub const MISSING_QUESTION: &str = "Question is required.";
pub const MISSING_SLUG: &str = "Slug is required.";

// ---------------------------------------------------------------------------
// Owner proof
// ---------------------------------------------------------------------------

/// What an owner presents to reach their record.
#[derive(Clone)]
pub enum OwnerProof {
    /// Email and template code as typed by the owner. Normalized and
    /// validated by the flow.
    Credentials {
        email: String,
        template_code: String,
    },
    /// Identity taken from a verified session token issued at login.
    Session {
        template_id: TemplateId,
        owner_email: String,
    },
}

impl OwnerProof {
    pub fn credentials(email: impl Into<String>, template_code: impl Into<String>) -> Self {
        Self::Credentials {
            email: email.into(),
            template_code: template_code.into(),
        }
    }

    /// Build the owner lookup filter, rejecting blank credentials with
    /// `missing_message`.
    fn owner_filter(&self, missing_message: &str) -> Result<TemplateFilter, CoreError> {
        match self {
            Self::Credentials {
                email,
                template_code,
            } => {
                let email = normalize_email(email);
                if email.is_empty() || template_code.trim().is_empty() {
                    return Err(CoreError::Validation(missing_message.to_string()));
                }
                Ok(TemplateFilter::by_credentials(&email, template_code))
            }
            Self::Session {
                template_id,
                owner_email,
            } => Ok(TemplateFilter::by_owner(*template_id, owner_email)),
        }
    }
}

impl fmt::Debug for OwnerProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credentials { email, .. } => f
                .debug_struct("Credentials")
                .field("email", email)
                .field("template_code", &"***")
                .finish(),
            Self::Session {
                template_id,
                owner_email,
            } => f
                .debug_struct("Session")
                .field("template_id", template_id)
                .field("owner_email", owner_email)
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// The four owner/public operations over a [`TemplateStore`].
///
/// Cheap to clone; the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AccessFlow {
    store: Arc<dyn TemplateStore>,
}

impl AccessFlow {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Check an email + code pair and return the owner's record summary.
    ///
    /// Read-only. Any miss, including store errors, is
    /// [`CoreError::InvalidCredentials`].
    pub async fn authenticate(
        &self,
        email: &str,
        template_code: &str,
    ) -> Result<TemplateSummary, CoreError> {
        let filter = OwnerProof::credentials(email, template_code).owner_filter(MISSING_CREDENTIALS)?;

        let template = self
            .lookup(&filter, "authenticate")
            .await
            .ok_or(CoreError::InvalidCredentials)?;

        tracing::info!(
            template_id = %template.id,
            has_slug = template.assigned_slug().is_some(),
            has_question = template.question().is_some(),
            "Template owner authenticated",
        );
        Ok(template.into())
    }

    /// Fetch the owner's full record for editing.
    ///
    /// If the record has no question yet, the default greeting is written
    /// back before returning. That write is best effort: on failure it is
    /// logged and the in-memory default is returned anyway.
    pub async fn fetch_owned(&self, proof: &OwnerProof) -> Result<OwnedTemplate, CoreError> {
        let filter = proof.owner_filter(MISSING_CREDENTIALS)?;

        let template = self
            .lookup(&filter, "fetch_owned")
            .await
            .ok_or(CoreError::AccessDenied)?;

        if template.question().is_some() {
            return Ok(template.into());
        }

        tracing::info!(template_id = %template.id, "Initializing missing template data");
        let patch = TemplatePatch {
            data: Some(TemplateData::default().to_value()),
            ..TemplatePatch::default()
        };

        match self.store.update(template.id, &patch).await {
            Ok(updated) => Ok(updated.into()),
            Err(e) => {
                tracing::error!(
                    template_id = %template.id,
                    error = %e,
                    "Failed to persist default template data",
                );
                let mut template = template;
                patch.apply(&mut template);
                Ok(template.into())
            }
        }
    }

    /// Fetch a published record by its share slug. No credentials needed.
    ///
    /// Unknown and unpublished slugs are both [`CoreError::NotPublished`].
    pub async fn fetch_public(&self, slug: &str) -> Result<PublicTemplate, CoreError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(CoreError::Validation(MISSING_SLUG.to_string()));
        }

        let template = self
            .lookup(&TemplateFilter::published(slug), "fetch_public")
            .await
            .ok_or(CoreError::NotPublished)?;

        Ok(template.into())
    }

    /// Replace the record's greeting and publish it.
    ///
    /// Ownership is re-verified against `template_id` first. The existing
    /// slug is kept; a new one is generated only if none was assigned.
    /// `data` is replaced wholesale, not merged.
    pub async fn update_owned(
        &self,
        proof: &OwnerProof,
        template_id: TemplateId,
        question: &str,
    ) -> Result<TemplateSummary, CoreError> {
        let filter = proof
            .owner_filter(MISSING_UPDATE_FIELDS)?
            .with_id(template_id);

        if question.trim().is_empty() {
            return Err(CoreError::Validation(MISSING_QUESTION.to_string()));
        }

        if let OwnerProof::Session {
            template_id: session_id,
            ..
        } = proof
        {
            if *session_id != template_id {
                tracing::warn!(
                    %session_id,
                    %template_id,
                    "Session token does not cover the requested template",
                );
                return Err(CoreError::AccessDenied);
            }
        }

        let existing = self
            .lookup(&filter, "update_owned")
            .await
            .ok_or(CoreError::AccessDenied)?;

        let slug = existing
            .assigned_slug()
            .map(str::to_owned)
            .unwrap_or_else(generate_slug);

        tracing::info!(
            template_id = %existing.id,
            question_len = question.chars().count(),
            %slug,
            "Updating template",
        );

        let patch = TemplatePatch {
            data: Some(TemplateData::new(question).to_value()),
            is_published: Some(true),
            slug: Some(slug),
        };

        let updated = self
            .store
            .update(existing.id, &patch)
            .await
            .map_err(|e| CoreError::Internal(format!("Update of template {} failed: {e}", existing.id)))?;

        tracing::info!(
            template_id = %updated.id,
            slug = updated.slug.as_deref().unwrap_or_default(),
            "Template published",
        );
        Ok(updated.into())
    }

    /// Whether the underlying store answers.
    pub async fn store_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Template store health check failed");
                false
            }
        }
    }

    /// Run a single-row lookup, folding misses and store errors into `None`.
    async fn lookup(&self, filter: &TemplateFilter, operation: &'static str) -> Option<Template> {
        match self.store.find_one(filter).await {
            Ok(Some(template)) => Some(template),
            Ok(None) => {
                tracing::info!(operation, "No template matched lookup");
                None
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "Template lookup failed");
                None
            }
        }
    }
}
