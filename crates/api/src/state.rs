use std::sync::Arc;

use driftnet_catalog::CatalogClient;
use driftnet_dispatch::DispatchClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; the pool and clients are request-scoped consumers of
/// shared handles, never holders of per-request state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: driftnet_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Imagery-catalog search client.
    pub catalog: Arc<CatalogClient>,
    /// Workflow dispatcher client.
    pub dispatch: Arc<DispatchClient>,
}
