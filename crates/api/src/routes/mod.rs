pub mod auth;
pub mod health;
pub mod page;
pub mod template;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /login                 login (public)
///
/// /template/get          owner fetch (token or credentials)
/// /template/update       owner update (token or credentials)
/// /template/public       published read (?slug=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/template", template::router())
}
