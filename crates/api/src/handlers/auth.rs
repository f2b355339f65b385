//! Handler for owner login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::auth::jwt::issue_session_token;
use crate::error::{AppError, AppResult};
use crate::response::LoginResponse;
use crate::state::AppState;

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub template_code: Option<String>,
}

/// POST /api/login
///
/// Check email + template code. Returns the record summary and a session
/// token for the editor endpoints.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(input) = payload?;

    let template = state
        .flow
        .authenticate(
            input.email.as_deref().unwrap_or_default(),
            input.template_code.as_deref().unwrap_or_default(),
        )
        .await?;

    let token = issue_session_token(template.id, &template.owner_email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        expires_in: state.config.jwt.expiry_secs(),
        template,
    }))
}
