//! View state and display helpers for the public pages

pub mod carousel;
pub mod format;
pub mod zoom;

pub use carousel::Carousel;
pub use format::{format_price, item_title};
pub use zoom::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP, ZoomState};
