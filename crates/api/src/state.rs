use std::sync::Arc;

use condo_db::{SharedStore, StoreMode};

use crate::config::ServerConfig;
use crate::notifications::NotificationWriter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// The persistence adapter chosen at startup.
    pub store: SharedStore,
    /// Which adapter `store` is, reported by `/health`.
    pub store_mode: StoreMode,
    /// Server configuration (JWT secret, timeouts).
    pub config: Arc<ServerConfig>,
    /// Text-generation collaborator for package notices and log summaries.
    pub notifier: Arc<NotificationWriter>,
}
