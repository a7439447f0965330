// Application state module
// Owns the teacher store and cached configuration values

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::types::Config;
use crate::store::TeacherStore;

/// Shared application state
///
/// Constructed once at startup and passed into every request handler. The
/// store is explicitly owned here rather than living in a module-level
/// singleton, so tests can build isolated instances.
pub struct AppState {
    pub config: Config,
    pub store: RwLock<TeacherStore>,

    // Cached config value for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    /// Create `AppState` from loaded configuration
    pub fn new(config: &Config) -> Self {
        let store = if config.store.seed_demo_data {
            TeacherStore::seeded(config.store.id_policy)
        } else {
            TeacherStore::new(config.store.id_policy)
        };

        Self {
            config: config.clone(),
            store: RwLock::new(store),
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }
}
