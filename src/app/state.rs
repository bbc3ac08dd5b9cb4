//! Application state shared across routes

use std::sync::Arc;

use crate::config::Config;
use crate::store::Catalog;
use crate::util::rate_limit::{create_limiter, Limiter};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    /// Limiter for POST requests; `None` when limiting is disabled
    pub write_limiter: Option<Arc<Limiter>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_catalog(config, Arc::new(Catalog::new()))
    }

    /// Build state around an existing catalog
    pub fn with_catalog(config: Config, catalog: Arc<Catalog>) -> Self {
        let write_limiter = create_limiter(config.write_rate_limit);

        Self {
            config: Arc::new(config),
            catalog,
            write_limiter,
        }
    }
}
