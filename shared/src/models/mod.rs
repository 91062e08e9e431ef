//! Data models
//!
//! Shared between the catalog client, the CLI and the mock backend.

pub mod catalog_item;
pub mod photo;

// Re-exports
pub use catalog_item::*;
pub use photo::*;
