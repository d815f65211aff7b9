//! Repository implementations for database access
//!
//! Repositories borrow a [`Session`](super::Session) and run every statement
//! inside its unit of work. Committing is the caller's decision.

pub mod items;

pub use items::ItemRepo;
