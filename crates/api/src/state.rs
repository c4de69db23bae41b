use std::sync::Arc;

use remindcare_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: both fields are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// In-memory clinic data (roster, reminder queue, staff accounts).
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}
