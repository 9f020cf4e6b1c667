//! Shared application state for all routes.

use crate::store::{PgProductStore, ProductStore};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Owns the connection pool; cloned cheaply into every handler.
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState {
            store: Arc::new(PgProductStore::new(pool)),
        }
    }
}
