pub mod achievements;
pub mod calendar;
pub mod circles;
pub mod config;
pub mod engagement;
pub mod error;
pub mod progress;
pub mod rest;
pub mod storage;
pub mod streak;

use std::sync::Arc;

use config::ServiceConfig;
use progress::KeyedLocks;
use storage::Storage;

/// Shared application state passed to every route handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServiceConfig>,
    pub storage: Arc<Storage>,
    /// Per-(user, plan) mutexes serializing progress mutations.
    pub progress_locks: Arc<KeyedLocks>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: ServiceConfig, storage: Storage) -> Self {
        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            progress_locks: Arc::new(KeyedLocks::new()),
            started_at: std::time::Instant::now(),
        }
    }
}
