use std::sync::Arc;

use valentine_core::access::AccessFlow;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Holds the access flow rather than the store: handlers cannot reach the
/// elevated store credential except through the flow's checks.
#[derive(Clone)]
pub struct AppState {
    /// Credential-gated access to template records.
    pub flow: AccessFlow,
    /// Server configuration (JWT settings are read by login and the
    /// session extractor).
    pub config: Arc<ServerConfig>,
}
