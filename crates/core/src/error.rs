/// Outward-facing failure taxonomy of the access flow.
///
/// The `Display` text of every variant except [`CoreError::Internal`] is the
/// exact message shown to callers, so variants must never carry details
/// that distinguish a wrong email from a wrong code or an unpublished
/// record from a missing one.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Required input missing or malformed.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid email or template code.")]
    InvalidCredentials,

    /// Owner lookup failed: wrong credentials, wrong record, or store miss.
    #[error("Template not found or access denied.")]
    AccessDenied,

    /// Public lookup failed: unknown slug or unpublished record.
    #[error("Template not found or not published.")]
    NotPublished,

    /// Unexpected failure. The message is for the operator log only.
    #[error("Internal error: {0}")]
    Internal(String),
}
