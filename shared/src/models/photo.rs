//! Photo references and gallery normalization
//!
//! Backends store photos either as bare path strings or as small records
//! whose key names vary between schema versions. Everything is parsed into
//! [`PhotoRef`] at the deserialization boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;

/// Keys accepted as the photo path, in resolution order
pub const PATH_KEYS: [&str; 4] = ["src", "url", "path", "foto"];

/// Keys accepted as the photo caption, in resolution order
pub const CAPTION_KEYS: [&str; 4] = ["titulo", "caption", "nombre", "label"];

/// A single photo, identified by its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRef {
    PathOnly(String),
    PathWithCaption { path: String, caption: String },
}

impl PhotoRef {
    /// Build a photo reference; an empty caption collapses to `PathOnly`
    pub fn new(path: impl Into<String>, caption: impl Into<String>) -> Self {
        let path = path.into();
        let caption = caption.into();
        if caption.is_empty() {
            PhotoRef::PathOnly(path)
        } else {
            PhotoRef::PathWithCaption { path, caption }
        }
    }

    pub fn path(&self) -> &str {
        match self {
            PhotoRef::PathOnly(path) => path,
            PhotoRef::PathWithCaption { path, .. } => path,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            PhotoRef::PathOnly(_) => None,
            PhotoRef::PathWithCaption { caption, .. } => Some(caption),
        }
    }

    /// Parse a raw JSON photo entry.
    ///
    /// Returns `None` for entries without a usable path.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(path) if !path.is_empty() => Some(PhotoRef::PathOnly(path.clone())),
            Value::Object(record) => {
                let path = first_string(record, &PATH_KEYS)?;
                let caption = first_string(record, &CAPTION_KEYS).unwrap_or_default();
                Some(PhotoRef::new(path, caption))
            }
            _ => None,
        }
    }
}

fn first_string(record: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl Serialize for PhotoRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PhotoRef::PathOnly(path) => serializer.serialize_str(path),
            PhotoRef::PathWithCaption { path, caption } => {
                serde_json::json!({ "src": path, "titulo": caption }).serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for PhotoRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        PhotoRef::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("photo entry has no path"))
    }
}

/// Lenient parser for the primary photo field (null, empty or malformed → `None`)
pub fn deserialize_primary<'de, D>(deserializer: D) -> Result<Option<PhotoRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(PhotoRef::from_value))
}

/// Lenient parser for gallery fields; entries without a path are skipped.
/// Absent or null stays `None` so a fallback key can be tried.
pub fn deserialize_optional_gallery<'de, D>(deserializer: D) -> Result<Option<Vec<PhotoRef>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(entries)) => Some(entries.iter().filter_map(PhotoRef::from_value).collect()),
        Some(_) => Some(Vec::new()),
    })
}

/// Merge the primary photo and the gallery into one display sequence.
///
/// Primary comes first, then gallery order. Paths are unique; the first
/// occurrence wins, so the primary's caption shadows a later duplicate.
pub fn normalize_photos(primary: Option<&PhotoRef>, gallery: &[PhotoRef]) -> Vec<PhotoRef> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(gallery.len() + 1);

    for photo in primary.into_iter().chain(gallery) {
        let path = photo.path();
        if path.is_empty() || !seen.insert(path) {
            continue;
        }
        out.push(photo.clone());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_string_and_records() {
        assert_eq!(
            PhotoRef::from_value(&json!("/uploads/a.jpg")),
            Some(PhotoRef::PathOnly("/uploads/a.jpg".into()))
        );
        assert_eq!(
            PhotoRef::from_value(&json!({ "src": "/a.jpg", "titulo": "Front" })),
            Some(PhotoRef::new("/a.jpg", "Front"))
        );
        assert_eq!(
            PhotoRef::from_value(&json!({ "url": "/b.jpg", "caption": "Side" })),
            Some(PhotoRef::new("/b.jpg", "Side"))
        );
        assert_eq!(
            PhotoRef::from_value(&json!({ "foto": "/c.jpg", "label": "" })),
            Some(PhotoRef::PathOnly("/c.jpg".into()))
        );
    }

    #[test]
    fn test_alias_resolution_order() {
        let value = json!({ "path": "/second.jpg", "src": "/first.jpg", "nombre": "n", "caption": "c" });
        let photo = PhotoRef::from_value(&value).unwrap();
        assert_eq!(photo.path(), "/first.jpg");
        assert_eq!(photo.caption(), Some("c"));

        // empty src falls through to the next alias
        let value = json!({ "src": "", "url": "/u.jpg" });
        assert_eq!(PhotoRef::from_value(&value).unwrap().path(), "/u.jpg");
    }

    #[test]
    fn test_pathless_entries_rejected() {
        assert!(PhotoRef::from_value(&json!("")).is_none());
        assert!(PhotoRef::from_value(&json!({ "titulo": "orphan" })).is_none());
        assert!(PhotoRef::from_value(&json!(null)).is_none());
        assert!(PhotoRef::from_value(&json!(42)).is_none());
    }

    #[test]
    fn test_normalize_primary_first_and_unique() {
        let primary = PhotoRef::PathOnly("/p.jpg".into());
        let gallery = vec![
            PhotoRef::PathOnly("/a.jpg".into()),
            PhotoRef::new("/p.jpg", "ignored caption"),
            PhotoRef::PathOnly("/b.jpg".into()),
            PhotoRef::new("/a.jpg", "dup"),
        ];

        let out = normalize_photos(Some(&primary), &gallery);
        let paths: Vec<&str> = out.iter().map(PhotoRef::path).collect();
        assert_eq!(paths, vec!["/p.jpg", "/a.jpg", "/b.jpg"]);
        assert_eq!(out[0].caption(), None);
        assert_eq!(out[1].caption(), None);
    }

    #[test]
    fn test_normalize_empty_inputs() {
        assert!(normalize_photos(None, &[]).is_empty());
        let blank = PhotoRef::PathOnly(String::new());
        assert!(normalize_photos(Some(&blank), &[]).is_empty());
    }

    #[test]
    fn test_normalize_without_primary_keeps_gallery_order() {
        let gallery = vec![PhotoRef::new("/x.jpg", "X"), PhotoRef::PathOnly("/y.jpg".into())];
        let out = normalize_photos(None, &gallery);
        assert_eq!(out, gallery);
    }

    #[test]
    fn test_serialize_shapes() {
        let plain = serde_json::to_value(PhotoRef::PathOnly("/a.jpg".into())).unwrap();
        assert_eq!(plain, json!("/a.jpg"));
        let captioned = serde_json::to_value(PhotoRef::new("/b.jpg", "B")).unwrap();
        assert_eq!(captioned, json!({ "src": "/b.jpg", "titulo": "B" }));
    }
}
