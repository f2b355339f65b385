//! Session token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing [`SessionClaims`]. A token binds
//! one template id to its owner email; it never contains the template code.

use std::fmt;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use valentine_core::access::OwnerProof;
use valentine_core::types::TemplateId;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the template id the session grants access to.
    pub sub: TemplateId,
    /// Normalized owner email.
    pub email: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

impl SessionClaims {
    /// The owner proof this session stands for.
    pub fn into_proof(self) -> OwnerProof {
        OwnerProof::Session {
            template_id: self.sub,
            owner_email: self.email,
        }
    }
}

/// Configuration for session token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session token lifetime in minutes (default: 60, at most
    /// [`MAX_SESSION_EXPIRY_MINS`]).
    pub session_expiry_mins: i64,
}

/// Default session token expiry in minutes.
pub const DEFAULT_SESSION_EXPIRY_MINS: i64 = 60;

/// Longest accepted session expiry: 30 days.
pub const MAX_SESSION_EXPIRY_MINS: i64 = 30 * 24 * 60;

impl JwtConfig {
    /// Session token lifetime in seconds.
    pub fn expiry_secs(&self) -> i64 {
        self.session_expiry_mins.saturating_mul(60)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("session_expiry_mins", &self.session_expiry_mins)
            .finish()
    }
}

/// Issue an HS256 session token for a successfully authenticated owner.
pub fn issue_session_token(
    template_id: TemplateId,
    owner_email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now.saturating_add(config.expiry_secs());

    let claims = SessionClaims {
        sub: template_id,
        email: owner_email.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`SessionClaims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_session_token(
    token: &str,
    config: &JwtConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
