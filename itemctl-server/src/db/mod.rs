//! Database layer - engine lifecycle, sessions, and repositories
//!
//! # Design Principles
//!
//! - One owned [`Engine`] per process, opened before serving and closed after
//! - One [`Session`] per request, released on every exit path
//! - Rows are mapped to records by hand, no derive-based mapping

pub mod engine;
pub mod error;
pub mod repos;
pub mod schema;
pub mod session;

pub use engine::{Engine, EngineState};
pub use error::DbError;
pub use repos::ItemRepo;
pub use session::Session;
