//! Route definitions for the `/template` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::template;
use crate::state::AppState;

/// Routes mounted at `/template`.
///
/// ```text
/// POST /get     -> get_template
/// POST /update  -> update_template
/// GET  /public  -> public_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get", post(template::get_template))
        .route("/update", post(template::update_template))
        .route("/public", get(template::public_template))
}
