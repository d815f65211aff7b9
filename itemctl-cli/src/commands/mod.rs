//! Command implementations for the itemctl CLI

pub mod pattern;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use pattern::run_pattern;
pub use serve::run_serve;
