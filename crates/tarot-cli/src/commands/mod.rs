//! Subcommand implementations.

pub mod history;
pub mod read;
pub mod settings;
pub mod spreads;

use std::path::Path;
use std::sync::Arc;

use tarot_core::Catalog;
use tarot_store::{HistoryStore, JsonFileStore, SettingsStore, StoreError};

/// File holding durable client state inside the data directory.
pub const STORAGE_FILE: &str = "local_storage.json";

/// Shared handles for every command.
pub struct Context {
    pub catalog: &'static Catalog,
    pub store: Arc<JsonFileStore>,
    pub proxy_url: String,
}

impl Context {
    pub fn open(data_dir: &Path, proxy_url: &str) -> Result<Self, StoreError> {
        let store = JsonFileStore::open(data_dir.join(STORAGE_FILE))?;
        Ok(Self {
            catalog: Catalog::builtin(),
            store: Arc::new(store),
            proxy_url: proxy_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn history(&self) -> HistoryStore<Arc<JsonFileStore>> {
        HistoryStore::new(Arc::clone(&self.store))
    }

    pub fn settings(&self) -> SettingsStore<Arc<JsonFileStore>> {
        SettingsStore::new(Arc::clone(&self.store))
    }
}
