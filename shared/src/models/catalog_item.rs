//! Catalog Item Model

use super::photo::{self, PhotoRef};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One listable entity (vehicle, funeral plan, ...)
///
/// Only the photo fields have a fixed shape. Everything else is kept as
/// free-form attributes and interpreted through a [`CatalogSchema`](crate::catalog::CatalogSchema).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireItem")]
pub struct CatalogItem {
    pub id: String,
    #[serde(rename = "fotoPrincipal", skip_serializing_if = "Option::is_none")]
    pub primary_photo: Option<PhotoRef>,
    #[serde(rename = "galeriaFotos")]
    pub gallery: Vec<PhotoRef>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Item as stored by the backend. Older records keep the gallery under
/// `fotos`, and some carry both keys.
#[derive(Deserialize)]
struct WireItem {
    #[serde(default, deserialize_with = "deserialize_id")]
    id: String,
    #[serde(rename = "fotoPrincipal", default, deserialize_with = "photo::deserialize_primary")]
    primary_photo: Option<PhotoRef>,
    #[serde(rename = "galeriaFotos", default, deserialize_with = "photo::deserialize_optional_gallery")]
    gallery: Option<Vec<PhotoRef>>,
    #[serde(rename = "fotos", default, deserialize_with = "photo::deserialize_optional_gallery")]
    legacy_gallery: Option<Vec<PhotoRef>>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl From<WireItem> for CatalogItem {
    /// `galeriaFotos` wins unless it is missing or null
    fn from(wire: WireItem) -> Self {
        Self {
            id: wire.id,
            primary_photo: wire.primary_photo,
            gallery: wire.gallery.or(wire.legacy_gallery).unwrap_or_default(),
            attributes: wire.attributes,
        }
    }
}

/// Ids arrive as strings or numbers depending on the backend store
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

impl CatalogItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set an attribute (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_primary_photo(mut self, photo: PhotoRef) -> Self {
        self.primary_photo = Some(photo);
        self
    }

    pub fn with_gallery(mut self, gallery: Vec<PhotoRef>) -> Self {
        self.gallery = gallery;
        self
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Scalar attribute rendered as text; `None` for null, lists and records
    pub fn text(&self, key: &str) -> Option<String> {
        self.attr(key).and_then(value_text)
    }

    /// Numeric attribute; numeric strings are accepted, blanks are `None`
    pub fn number(&self, key: &str) -> Option<f64> {
        let number = match self.attr(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        number.filter(|n| n.is_finite())
    }

    /// List attribute. A plain string is split on commas and line breaks.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.attr(key) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(value_text)
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => split_list(s),
            _ => Vec::new(),
        }
    }

    /// Truthiness of a flag attribute (missing counts as false)
    pub fn flag(&self, key: &str) -> bool {
        match self.attr(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
            Some(Value::Null) | None => false,
        }
    }

    /// Explicit boolean value, if the attribute is a JSON boolean
    pub fn explicit_flag(&self, key: &str) -> Option<bool> {
        self.attr(key).and_then(Value::as_bool)
    }

    /// Primary photo and gallery merged for display
    pub fn photos(&self) -> Vec<PhotoRef> {
        photo::normalize_photos(self.primary_photo.as_ref(), &self.gallery)
    }

    /// Path of the representative image: the primary photo, else the first gallery entry
    pub fn cover_path(&self) -> Option<&str> {
        self.primary_photo
            .iter()
            .chain(&self.gallery)
            .map(PhotoRef::path)
            .find(|p| !p.is_empty())
    }
}

/// Render a scalar JSON value the way a form field would show it
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Split free text on commas and line breaks, dropping blanks
pub fn split_list(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
