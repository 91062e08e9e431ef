//! REST API wrappers

pub mod admin;
pub mod catalog;

pub use admin::AdminApi;
pub use catalog::CatalogApi;

use reqwest::Url;
use serde_json::Value;
use shared::CatalogItem;

/// Percent-encode an item id so it stays a single path segment
pub(crate) fn encode_segment(segment: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return segment.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Decode a list response; anything but an array is treated as empty and
/// entries that are not catalog items are skipped
pub(crate) fn decode_items(body: Value) -> Vec<CatalogItem> {
    let Value::Array(entries) = body else {
        tracing::warn!("expected an array of items, got something else");
        return Vec::new();
    };
    let total = entries.len();
    let items: Vec<CatalogItem> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if items.len() < total {
        tracing::warn!(skipped = total - items.len(), "skipped malformed items");
    }
    items
}
