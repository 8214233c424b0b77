//! Application state: the selected progress store backend.
//!
//! The backend is chosen once at startup: an HTTP key-value store when a
//! store URL is configured, otherwise a process-local in-memory map so the
//! app stays usable in development.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::load_app_config_from_env;
use crate::storage::{HttpKvStore, KvStore, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
}

impl AppState {
    /// Build state from env: load config, pick the storage backend.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_app_config_from_env().unwrap_or_default();

        let store: Arc<dyn KvStore> = match HttpKvStore::from_env(&cfg.storage) {
            Some(kv) => {
                info!(target: "mathquest_backend", base_url = %kv.base_url, "Progress store: HTTP key-value service");
                Arc::new(kv)
            }
            None => {
                warn!(target: "mathquest_backend", "KV_STORE_URL not set; progress store: in-memory (non-persistent)");
                Arc::new(MemoryStore::default())
            }
        };

        Self { store }
    }
}
