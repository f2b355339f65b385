//! Handlers for the `/template` resource (owner get/update, public read).

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;
use valentine_core::access::{OwnerProof, MISSING_UPDATE_FIELDS};
use valentine_core::error::CoreError;
use valentine_core::template::{OwnedTemplate, PublicTemplate, TemplateSummary};

use crate::error::{AppError, AppResult};
use crate::middleware::session::MaybeSession;
use crate::response::TemplateResponse;
use crate::state::AppState;

/// Longest accepted greeting, in characters.
pub const MAX_QUESTION_CHARS: u64 = 500;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/template/get`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTemplateRequest {
    pub email: Option<String>,
    pub template_code: Option<String>,
}

/// Request body for `POST /api/template/update`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    pub email: Option<String>,
    pub template_code: Option<String>,
    pub template_id: Option<String>,
    #[validate(length(max = MAX_QUESTION_CHARS))]
    pub question: Option<String>,
}

/// Query string for `GET /api/template/public`.
#[derive(Debug, Deserialize)]
pub struct PublicTemplateParams {
    pub slug: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/template/get
///
/// Fetch the owner's record for editing, initializing a missing greeting.
/// Authenticated by Bearer session token, or by email + code in the body.
pub async fn get_template(
    State(state): State<AppState>,
    session: MaybeSession,
    payload: Result<Json<GetTemplateRequest>, JsonRejection>,
) -> AppResult<Json<TemplateResponse<OwnedTemplate>>> {
    let proof = match session.into_proof() {
        Some(proof) => proof,
        None => {
            let Json(input) = payload?;
            OwnerProof::credentials(
                input.email.unwrap_or_default(),
                input.template_code.unwrap_or_default(),
            )
        }
    };

    let template = state.flow.fetch_owned(&proof).await?;
    Ok(Json(TemplateResponse::ok(template)))
}

/// POST /api/template/update
///
/// Replace the greeting and publish the record, assigning a slug on first
/// publish.
pub async fn update_template(
    State(state): State<AppState>,
    session: MaybeSession,
    payload: Result<Json<UpdateTemplateRequest>, JsonRejection>,
) -> AppResult<Json<TemplateResponse<TemplateSummary>>> {
    let Json(input) = payload?;

    input.validate().map_err(|_| {
        CoreError::Validation(format!(
            "Question must be at most {MAX_QUESTION_CHARS} characters."
        ))
    })?;

    let proof = session.into_proof().unwrap_or_else(|| {
        OwnerProof::credentials(
            input.email.clone().unwrap_or_default(),
            input.template_code.clone().unwrap_or_default(),
        )
    });

    let template_id = parse_template_id(input.template_id.as_deref())?;

    let template = state
        .flow
        .update_owned(
            &proof,
            template_id,
            input.question.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(TemplateResponse::ok(template)))
}

/// GET /api/template/public?slug=
///
/// Read a published record by slug. No authentication.
pub async fn public_template(
    State(state): State<AppState>,
    query: Result<Query<PublicTemplateParams>, QueryRejection>,
) -> AppResult<Json<TemplateResponse<PublicTemplate>>> {
    let Query(params) = query?;
    let template = state
        .flow
        .fetch_public(params.slug.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(TemplateResponse::ok(template)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A blank id is a validation error; an unparseable one is denied like any
/// other id the caller does not own.
fn parse_template_id(raw: Option<&str>) -> Result<Uuid, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation(MISSING_UPDATE_FIELDS.to_string()))?;

    Uuid::parse_str(raw).map_err(|_| {
        tracing::info!("Rejected malformed template id");
        AppError::Core(CoreError::AccessDenied)
    })
}
