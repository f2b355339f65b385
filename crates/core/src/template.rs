//! Template record model and the redacted views handed to callers.
//!
//! A [`Template`] is the full stored row. Callers only ever see one of the
//! views below, each of which drops the fields its audience must not see:
//!
//! | View                | `owner_email` | `template_code` |
//! |---------------------|---------------|-----------------|
//! | [`TemplateSummary`] | yes           | no              |
//! | [`OwnedTemplate`]   | yes           | yes             |
//! | [`PublicTemplate`]  | no            | no              |

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::types::{TemplateId, Timestamp};

/// Discriminator scoping this application's rows within a shared table.
pub const TEMPLATE_TYPE: &str = "simp";

/// Greeting shown when a record has no question yet.
pub const DEFAULT_QUESTION: &str = "Will you be my Valentine? 💖";

// ---------------------------------------------------------------------------
// Stored record
// ---------------------------------------------------------------------------

/// A row of the templates table.
///
/// Defaults let seed files and hosted-store responses omit store-managed
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default = "Uuid::new_v4")]
    pub id: TemplateId,
    pub owner_email: String,
    pub template_code: String,
    #[serde(default = "default_template_type")]
    pub template_type: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default = "Utc::now")]
    pub created_at: Timestamp,
    #[serde(default = "Utc::now")]
    pub updated_at: Timestamp,
}

fn default_template_type() -> String {
    TEMPLATE_TYPE.to_string()
}

impl Template {
    /// The greeting text, if `data.question` is a non-empty string.
    pub fn question(&self) -> Option<&str> {
        question_of(self.data.as_ref())
    }

    /// The assigned slug, treating an empty string as unassigned.
    pub fn assigned_slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }
}

fn question_of(data: Option<&Value>) -> Option<&str> {
    data?
        .get("question")?
        .as_str()
        .filter(|q| !q.is_empty())
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The `data` payload written by this service. Writes replace `data`
/// wholesale, so any other keys a record carried are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateData {
    pub question: String,
}

impl TemplateData {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "question": self.question })
    }
}

impl Default for TemplateData {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION)
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Owner-facing view without the secret code. Returned by login and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub slug: Option<String>,
    pub owner_email: String,
    pub template_type: String,
    pub is_published: bool,
    pub data: Option<Value>,
}

impl From<Template> for TemplateSummary {
    fn from(t: Template) -> Self {
        Self {
            id: t.id,
            slug: t.slug,
            owner_email: t.owner_email,
            template_type: t.template_type,
            is_published: t.is_published,
            data: t.data,
        }
    }
}

/// Full owner view, including `template_code`, returned by the editor fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedTemplate {
    pub id: TemplateId,
    pub slug: Option<String>,
    pub owner_email: String,
    pub template_type: String,
    pub template_code: String,
    pub is_published: bool,
    pub data: Option<Value>,
}

impl From<Template> for OwnedTemplate {
    fn from(t: Template) -> Self {
        Self {
            id: t.id,
            slug: t.slug,
            owner_email: t.owner_email,
            template_type: t.template_type,
            template_code: t.template_code,
            is_published: t.is_published,
            data: t.data,
        }
    }
}

/// Anonymous view served on the share link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicTemplate {
    pub id: TemplateId,
    pub slug: Option<String>,
    pub template_type: String,
    pub is_published: bool,
    pub data: Option<Value>,
}

impl PublicTemplate {
    /// Greeting to render, falling back to [`DEFAULT_QUESTION`].
    pub fn question(&self) -> &str {
        question_of(self.data.as_ref()).unwrap_or(DEFAULT_QUESTION)
    }
}

impl From<Template> for PublicTemplate {
    fn from(t: Template) -> Self {
        Self {
            id: t.id,
            slug: t.slug,
            template_type: t.template_type,
            is_published: t.is_published,
            data: t.data,
        }
    }
}
