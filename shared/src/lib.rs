//! Shared types for the catalog workspace
//!
//! Catalog items and photos, the collection schema, the filter/search
//! engine, detail view state and the admin form. Everything here is pure;
//! network access lives in `catalog-client`.

pub mod catalog;
pub mod client;
pub mod error;
pub mod form;
pub mod models;
pub mod view;

// Re-exports
pub use catalog::{CatalogSchema, FilterState, filter_items, filter_options};
pub use error::{FormError, FormResult};
pub use form::ItemForm;
pub use models::{CatalogItem, PhotoRef, normalize_photos};
pub use serde::{Deserialize, Serialize};
