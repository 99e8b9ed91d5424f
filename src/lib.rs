pub mod cache;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use sqlx::PgPool;

use crate::cache::QueryCache;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub cache: QueryCache,
}
