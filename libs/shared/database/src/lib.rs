pub mod memory;
pub mod rest;
pub mod rest_store;
pub mod store;

use std::sync::Arc;

use shared_config::{AppConfig, StoreBackend};

pub use memory::InMemoryRecordStore;
pub use rest_store::RestRecordStore;
pub use store::{RecordStore, ScheduleFilter, SharedStore, StoreError};

/// Builds the store selected by `STORE_BACKEND`.
pub fn store_from_config(config: &AppConfig) -> anyhow::Result<SharedStore> {
    let store: SharedStore = match config.store_backend {
        StoreBackend::Memory => Arc::new(InMemoryRecordStore::new()),
        StoreBackend::Rest => Arc::new(RestRecordStore::new(config)?),
    };
    Ok(store)
}
