//! Session token extractor for the owner endpoints.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use valentine_core::access::OwnerProof;
use valentine_core::error::CoreError;

use crate::auth::jwt::{validate_session_token, SessionClaims};
use crate::error::AppError;
use crate::state::AppState;

/// Owner session taken from an `Authorization: Bearer <token>` header.
///
/// `None` when the header is absent, in which case the handler falls back
/// to raw credentials in the body. A header that is present but malformed,
/// forged, or expired is rejected as an access denial, never as a distinct
/// authentication error.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<SessionClaims>);

impl MaybeSession {
    pub fn into_proof(self) -> Option<OwnerProof> {
        self.0.map(SessionClaims::into_proof)
    }
}

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(MaybeSession(None));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or_else(|| {
                tracing::info!("Malformed Authorization header");
                AppError::Core(CoreError::AccessDenied)
            })?;

        let claims = validate_session_token(token, &state.config.jwt).map_err(|e| {
            tracing::info!(error = %e, "Rejected session token");
            AppError::Core(CoreError::AccessDenied)
        })?;

        Ok(MaybeSession(Some(claims)))
    }
}

/// Token from a `Bearer <token>` header value. The scheme is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
