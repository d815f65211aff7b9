//! Route handlers organized by resource

pub mod items;
pub mod root;
