//! Admin item form
//!
//! Holds raw text input for every schema field plus the photo selection,
//! and turns it into the record sent on create/update.

use crate::catalog::{CatalogSchema, FieldKind};
use crate::error::{FormError, FormResult};
use crate::models::{CatalogItem, PhotoRef, split_list};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Wire name of the primary photo
pub const PRIMARY_PHOTO_KEY: &str = "fotoPrincipal";
/// Wire name of the gallery
pub const GALLERY_KEY: &str = "galeriaFotos";

/// Editable copy of one catalog item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    values: BTreeMap<String, String>,
    primary_photo: String,
    gallery: Vec<String>,
}

impl ItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty form for a new item; flags start switched on
    pub fn blank(schema: &CatalogSchema) -> Self {
        let mut form = Self::new();
        for field in schema.fields.iter().filter(|f| f.kind == FieldKind::Flag) {
            form.set(field.key.clone(), "true");
        }
        form
    }

    /// Prefill from an existing item
    pub fn from_item(item: &CatalogItem, schema: &CatalogSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|field| {
                let value = match field.kind {
                    FieldKind::List => item.list(&field.key).join(", "),
                    FieldKind::Flag => item.flag(&field.key).to_string(),
                    _ => item.text(&field.key).unwrap_or_default(),
                };
                (field.key.clone(), value)
            })
            .collect();

        Self {
            values,
            primary_photo: item
                .primary_photo
                .as_ref()
                .map(|p| p.path().to_string())
                .unwrap_or_default(),
            gallery: item.gallery.iter().map(|p| p.path().to_string()).collect(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Set a field after checking it belongs to the schema
    pub fn set_checked(&mut self, schema: &CatalogSchema, key: &str, value: impl Into<String>) -> FormResult<()> {
        if schema.field(key).is_none() {
            return Err(FormError::UnknownField(key.to_string()));
        }
        self.set(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn primary_photo(&self) -> &str {
        &self.primary_photo
    }

    pub fn gallery(&self) -> &[String] {
        &self.gallery
    }

    /// Mark a photo as primary, adding it to the front of the gallery if needed
    pub fn set_primary(&mut self, src: impl Into<String>) {
        let src = src.into();
        if !src.is_empty() && !self.gallery.contains(&src) {
            self.gallery.insert(0, src.clone());
        }
        self.primary_photo = src;
    }

    /// Drop a photo; removing the primary promotes the first remaining gallery photo
    pub fn remove_photo(&mut self, src: &str) {
        self.gallery.retain(|p| p != src);
        if self.primary_photo == src {
            self.primary_photo = self.gallery.first().cloned().unwrap_or_default();
        }
    }

    /// Merge freshly uploaded paths; the first upload becomes primary when none is set
    pub fn add_uploaded<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.is_empty())
            .collect();

        for path in &paths {
            if !self.gallery.contains(path) {
                self.gallery.push(path.clone());
            }
        }

        if self.primary_photo.is_empty()
            && let Some(first) = paths.first()
        {
            self.primary_photo = first.clone();
        }
        if !self.primary_photo.is_empty() && !self.gallery.contains(&self.primary_photo) {
            self.gallery.insert(0, self.primary_photo.clone());
        }
    }

    /// Primary photo followed by the gallery, without duplicates
    pub fn all_photos(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.gallery.len() + 1);
        for path in std::iter::once(self.primary_photo.as_str()).chain(self.gallery.iter().map(String::as_str)) {
            if !path.is_empty() && !out.contains(&path) {
                out.push(path);
            }
        }
        out
    }

    /// Build the full normalized record.
    ///
    /// Strings are trimmed, numbers coerced (blank → `null`), lists split on
    /// commas, and the primary photo is guaranteed to sit in the gallery.
    pub fn to_payload(&self, schema: &CatalogSchema) -> FormResult<Map<String, Value>> {
        let mut payload = Map::new();
        let mut missing = Vec::new();

        for field in &schema.fields {
            let raw = self.get(&field.key).trim();
            let value = match field.kind {
                FieldKind::Text | FieldKind::Select => Value::String(raw.to_string()),
                FieldKind::Number => parse_number(raw).ok_or_else(|| FormError::InvalidNumber {
                    label: field.label.clone(),
                    value: raw.to_string(),
                })?,
                FieldKind::List => Value::Array(split_list_commas(raw)),
                FieldKind::Flag => Value::Bool(parse_flag(raw)),
            };

            let blank = match &value {
                Value::String(s) => s.is_empty(),
                Value::Null => true,
                Value::Array(a) => a.is_empty(),
                _ => false,
            };
            if field.required && blank {
                missing.push(field.label.clone());
            }
            payload.insert(field.key.clone(), value);
        }

        if !missing.is_empty() {
            tracing::debug!(collection = %schema.collection, ?missing, "form rejected");
            return Err(FormError::MissingRequired(missing));
        }

        let primary = self.primary_photo.trim().to_string();
        let mut gallery: Vec<String> = Vec::with_capacity(self.gallery.len() + 1);
        for path in &self.gallery {
            let path = path.trim();
            if !path.is_empty() && !gallery.iter().any(|p| p == path) {
                gallery.push(path.to_string());
            }
        }
        if !primary.is_empty() && !gallery.contains(&primary) {
            gallery.insert(0, primary.clone());
        }

        payload.insert(PRIMARY_PHOTO_KEY.into(), Value::String(primary));
        payload.insert(
            GALLERY_KEY.into(),
            Value::Array(gallery.into_iter().map(Value::String).collect()),
        );
        Ok(payload)
    }

    /// Photo list as the normalized display sequence
    pub fn photo_refs(&self) -> Vec<PhotoRef> {
        self.all_photos()
            .into_iter()
            .map(|p| PhotoRef::PathOnly(p.to_string()))
            .collect()
    }
}

/// Blank → `null`; `None` when the text is not a number
fn parse_number(raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return Some(Value::Null);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Value::Number(n.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.to_lowercase().as_str(),
        "true" | "1" | "si" | "sí" | "yes" | "on" | "activo"
    )
}

fn split_list_commas(raw: &str) -> Vec<Value> {
    split_list(raw).into_iter().map(Value::String).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vehicle_form() -> ItemForm {
        let mut form = ItemForm::new();
        form.set("marca", "  Toyota ");
        form.set("modelo", "Coaster");
        form.set("anio", "2020");
        form.set("precio", "");
        form.set("kilometraje", "12500.5");
        form.set("caracteristicas", "Aire acondicionado, , Asientos reclinables ");
        form
    }

    #[test]
    fn test_payload_normalization() {
        let schema = CatalogSchema::vehicles();
        let payload = vehicle_form().to_payload(&schema).unwrap();

        assert_eq!(payload["marca"], json!("Toyota"));
        assert_eq!(payload["anio"], json!(2020));
        assert_eq!(payload["precio"], json!(null));
        assert_eq!(payload["kilometraje"], json!(12500.5));
        assert_eq!(payload["pasajeros"], json!(null));
        assert_eq!(payload["color"], json!(""));
        assert_eq!(
            payload["caracteristicas"],
            json!(["Aire acondicionado", "Asientos reclinables"])
        );
        assert_eq!(payload[PRIMARY_PHOTO_KEY], json!(""));
        assert_eq!(payload[GALLERY_KEY], json!([]));
    }

    #[test]
    fn test_required_fields_rejected() {
        let schema = CatalogSchema::vehicles();
        let mut form = vehicle_form();
        form.set("marca", "   ");
        form.set("modelo", "");
        assert_eq!(
            form.to_payload(&schema),
            Err(FormError::MissingRequired(vec!["Marca".into(), "Modelo".into()]))
        );
    }

    #[test]
    fn test_invalid_number_rejected() {
        let schema = CatalogSchema::vehicles();
        let mut form = vehicle_form();
        form.set("anio", "dos mil");
        assert!(matches!(form.to_payload(&schema), Err(FormError::InvalidNumber { .. })));
    }

    #[test]
    fn test_primary_is_inserted_into_gallery() {
        let schema = CatalogSchema::vehicles();
        let mut form = vehicle_form();
        form.add_uploaded(["/uploads/a.jpg", "/uploads/b.jpg"]);
        form.primary_photo = "/uploads/manual.jpg".into();

        let payload = form.to_payload(&schema).unwrap();
        assert_eq!(payload[PRIMARY_PHOTO_KEY], json!("/uploads/manual.jpg"));
        assert_eq!(
            payload[GALLERY_KEY],
            json!(["/uploads/manual.jpg", "/uploads/a.jpg", "/uploads/b.jpg"])
        );
    }

    #[test]
    fn test_first_upload_becomes_primary() {
        let mut form = ItemForm::new();
        form.add_uploaded(["/uploads/a.jpg", "", "/uploads/b.jpg"]);
        assert_eq!(form.primary_photo(), "/uploads/a.jpg");
        assert_eq!(form.gallery(), ["/uploads/a.jpg", "/uploads/b.jpg"]);

        form.add_uploaded(["/uploads/b.jpg", "/uploads/c.jpg"]);
        assert_eq!(form.primary_photo(), "/uploads/a.jpg");
        assert_eq!(form.gallery().len(), 3);
    }

    #[test]
    fn test_set_primary_and_remove() {
        let mut form = ItemForm::new();
        form.add_uploaded(["/a.jpg", "/b.jpg"]);
        form.set_primary("/c.jpg");
        assert_eq!(form.all_photos(), vec!["/c.jpg", "/a.jpg", "/b.jpg"]);

        form.remove_photo("/c.jpg");
        assert_eq!(form.primary_photo(), "/a.jpg");
        form.remove_photo("/b.jpg");
        assert_eq!(form.primary_photo(), "/a.jpg");
        form.remove_photo("/a.jpg");
        assert_eq!(form.primary_photo(), "");
        assert!(form.all_photos().is_empty());
    }

    #[test]
    fn test_from_item_roundtrips_plan_fields() {
        let schema = CatalogSchema::plans();
        let item = CatalogItem::new("p1")
            .with("nombre", "Plan Esencial")
            .with("precio", 1200)
            .with("activo", true)
            .with("incluye", json!(["Capilla", "Traslado"]))
            .with_primary_photo(PhotoRef::PathOnly("/uploads/p.jpg".into()))
            .with_gallery(vec![PhotoRef::new("/uploads/g.jpg", "Sala")]);

        let form = ItemForm::from_item(&item, &schema);
        assert_eq!(form.get("precio"), "1200");
        assert_eq!(form.get("activo"), "true");
        assert_eq!(form.get("incluye"), "Capilla, Traslado");
        assert_eq!(form.get("tags"), "");

        let payload = form.to_payload(&schema).unwrap();
        assert_eq!(payload["activo"], json!(true));
        assert_eq!(payload["incluye"], json!(["Capilla", "Traslado"]));
        assert_eq!(payload[GALLERY_KEY], json!(["/uploads/p.jpg", "/uploads/g.jpg"]));
    }

    #[test]
    fn test_blank_plan_form_is_active() {
        let schema = CatalogSchema::plans();
        let mut form = ItemForm::blank(&schema);
        form.set("nombre", "Plan Nuevo");
        let payload = form.to_payload(&schema).unwrap();
        assert_eq!(payload["activo"], json!(true));
    }

    #[test]
    fn test_set_checked_rejects_unknown_keys() {
        let schema = CatalogSchema::plans();
        let mut form = ItemForm::new();
        assert!(form.set_checked(&schema, "nombre", "x").is_ok());
        assert_eq!(
            form.set_checked(&schema, "marca", "x"),
            Err(FormError::UnknownField("marca".into()))
        );
    }
}
