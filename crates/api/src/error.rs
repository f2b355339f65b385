use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use valentine_core::error::CoreError;

/// Appended to every user-facing error message.
pub const SUPPORT_HINT: &str = "If you need help, contact @thecraftingfactory on Instagram.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for access-flow failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce the fixed JSON error
/// envelope; underlying causes only reach the log.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure from the access flow.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be parsed. The detail is logged only.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with an operator-facing message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// HTTP status, error code, and base message for this error.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    core.to_string(),
                ),
                CoreError::AccessDenied | CoreError::NotPublished => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },
            AppError::BadRequest(detail) => {
                tracing::info!(error = %detail, "Rejected malformed request body");
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Invalid request body.".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Internal server error.".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "success": false,
            "error": format!("{message} {SUPPORT_HINT}"),
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn core_errors_map_to_statuses() {
        assert_eq!(
            status_of(CoreError::Validation("x".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(CoreError::AccessDenied.into()), StatusCode::NOT_FOUND);
        assert_eq!(status_of(CoreError::NotPublished.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(CoreError::Internal("db down".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let (_, code, message) = AppError::InternalError("password=hunter2".into()).classify();
        assert_eq!(code, "INTERNAL_ERROR");
        assert!(!message.contains("hunter2"));

        let (_, _, message) = AppError::Core(CoreError::Internal("row 42 locked".into())).classify();
        assert!(!message.contains("row 42"));
    }

    #[test]
    fn malformed_body_is_validation_error() {
        let (status, code, message) = AppError::BadRequest("EOF while parsing".into()).classify();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert!(!message.contains("EOF"));
    }
}
