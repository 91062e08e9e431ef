//! Page controllers
//!
//! Each page owns the state a screen would render and exposes the actions a
//! user can take on it. Rendering is left to the caller.

pub mod admin;
pub mod catalog;
pub mod detail;

pub use admin::{AdminPanel, Confirm, Route};
pub use catalog::CatalogPage;
pub use detail::DetailPage;
