//! Catalog schema, search and filtering

pub mod filter;
pub mod options;
pub mod schema;

pub use filter::{FilterState, ItemFilter, STATUS_ALL, filter_items, parse_bound, parse_status};
pub use options::filter_options;
pub use schema::{CatalogSchema, FieldDef, FieldKind, FilterKind, FilterSpec};
