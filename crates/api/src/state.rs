use std::sync::Arc;

use pis_db::DbPool;

use crate::config::ServerConfig;
use crate::services::{CategoryService, ProductService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    pub products: ProductService,
    pub categories: CategoryService,
}

impl AppState {
    /// Wire the services around an already-created pool.
    pub fn new(pool: DbPool, config: Arc<ServerConfig>) -> Self {
        Self {
            products: ProductService::new(pool.clone()),
            categories: CategoryService::new(pool.clone()),
            pool,
            config,
        }
    }
}
