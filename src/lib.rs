//! Tienda API: products CRUD over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

#[cfg(test)]
mod test_support;

pub use config::{AppConfig, DatabaseConfig};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::app;
pub use service::ProductService;
pub use state::AppState;
pub use store::{connect_pool, PgProductStore, ProductStore};
