//! itemctl-server: HTTP item service
//!
//! Serves create/list operations over a single `items` table in SQLite.
//! The database [`Engine`](db::Engine) is opened before the first request and
//! disposed after the last; each request works inside its own
//! [`Session`](db::Session).

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use config::{DatabaseConfig, ServerConfig};
pub use http::{run_server, serve, ServerError};
pub use state::AppState;
