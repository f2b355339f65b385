//! Success envelopes for API handlers.
//!
//! Every success body is `{ "success": true, "template": ... }`; login adds
//! the session token.

use serde::Serialize;
use valentine_core::template::TemplateSummary;

/// Standard `{ "success": true, "template": T }` envelope.
#[derive(Debug, Serialize)]
pub struct TemplateResponse<T: Serialize> {
    pub success: bool,
    pub template: T,
}

impl<T: Serialize> TemplateResponse<T> {
    pub fn ok(template: T) -> Self {
        Self {
            success: true,
            template,
        }
    }
}

/// Successful login: the record summary plus a session token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    /// Bearer token accepted by the template get/update endpoints.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub template: TemplateSummary,
}
