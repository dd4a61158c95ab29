//! Heroes API: REST backend for heroes, powers and the hero powers linking them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;
pub mod view;

pub use config::{ServerConfig, StorageBackend};
pub use error::{AppError, ConfigError, Entity};
pub use migration::{apply_migrations, ensure_database_exists};
pub use routes::{api_routes, app, common_routes_with_ready};
pub use state::AppState;
pub use store::{HeroStore, MemoryStore, PgStore};
