//! Persistence adapter for the condominium manager.
//!
//! [`CondoStore`] is the single data-access contract. Two implementations
//! exist: [`LocalStore`] (a JSON snapshot on disk, seeded from fixtures) and
//! [`RemoteStore`] (a PostgREST table API). [`open_store`] picks one from
//! [`StoreConfig`] once, at process start.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod local;
pub mod remote;
pub mod store;

use std::sync::Arc;

pub use config::{StoreConfig, StoreMode};
pub use error::{StoreError, StoreResult};
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use store::CondoStore;

/// Shared handle to the active store.
pub type SharedStore = Arc<dyn CondoStore>;

/// Build the store selected by `config`.
pub fn open_store(config: &StoreConfig) -> StoreResult<(SharedStore, StoreMode)> {
    match config {
        StoreConfig::Local { data_dir, latency } => {
            tracing::info!(data_dir = %data_dir.display(), latency_ms = latency.as_millis() as u64, "Using local snapshot store");
            let store = LocalStore::new(data_dir.clone(), *latency);
            Ok((Arc::new(store), StoreMode::Local))
        }
        StoreConfig::Remote { url, key } => {
            tracing::info!(url = %url, "Using remote table store");
            let store = RemoteStore::new(url.clone(), key.clone())?;
            Ok((Arc::new(store), StoreMode::Remote))
        }
    }
}
