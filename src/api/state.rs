//! Application state - Dependency injection container.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::infra::{CakeRepository, CakeStore, Database};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Cake persistence
    pub cakes: Arc<dyn CakeRepository>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
    /// Deadline applied to each request's context
    pub request_timeout: Duration,
}

impl AppState {
    /// Build state backed by the SQL store on `database`.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let cakes = Arc::new(CakeStore::new(database.get_connection()));

        Self {
            cakes,
            database,
            request_timeout: config.request_timeout,
        }
    }

    /// Create state with a manually injected repository.
    pub fn new(
        cakes: Arc<dyn CakeRepository>,
        database: Arc<Database>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            cakes,
            database,
            request_timeout,
        }
    }
}
