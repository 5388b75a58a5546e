use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{AdminStore, SchemeStore};

/// Shared application state, constructed once in `main` and cloned into
/// every handler through the router. Holds no per-request mutability; the
/// pool is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub schemes: SchemeStore,
    pub admins: AdminStore,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            schemes: SchemeStore::new(pool.clone()),
            admins: AdminStore::new(pool.clone()),
            pool,
        }
    }
}
