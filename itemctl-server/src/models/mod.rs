//! Wire and stored record types
//!
//! Inbound records are validated when they are built from JSON.
//! Invalid input returns ValidationError, not panic.

pub mod item;
pub mod pagination;
pub mod validation;

pub use item::{Item, ItemCreate, ItemRead, NewItem};
pub use pagination::{ListParams, ListWindow};
pub use validation::ValidationError;
