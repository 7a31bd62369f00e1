use std::sync::Arc;

use places_cloud::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: places_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Blob store receiving uploaded photos.
    pub object_store: Arc<dyn ObjectStore>,
}
