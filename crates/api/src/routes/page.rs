//! Root-level HTML share page.

use axum::routing::get;
use axum::Router;

use crate::handlers::page;
use crate::state::AppState;

/// ```text
/// GET /v/{slug}  -> view_greeting
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/v/{slug}", get(page::view_greeting))
}
