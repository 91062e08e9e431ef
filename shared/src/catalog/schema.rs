//! Catalog schema
//!
//! Describes which attributes of a [`CatalogItem`](crate::models::CatalogItem)
//! a collection uses: form fields, searchable fields and the filter panel.

use serde::{Deserialize, Serialize};

/// Input kind of an editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Select,
    /// Comma separated in forms, JSON array on the wire
    List,
    Flag,
}

/// One editable attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDef {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// How a filter value constrains an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Field text equals the value
    Exact,
    /// List field holds the value
    Contains,
    /// Field text contains the value, case-insensitive
    Text,
    /// Inclusive numeric bounds under `<key>Min` / `<key>Max`
    Range,
    /// Boolean flag: `todos` / `activos` / `inactivos`
    Status,
}

/// One entry of the filter panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Key in the filter state
    pub key: String,
    /// Item attribute the filter reads
    pub field: String,
    pub label: String,
    pub kind: FilterKind,
}

impl FilterSpec {
    pub fn new(field: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
        let field = field.into();
        Self {
            key: field.clone(),
            field,
            label: label.into(),
            kind,
        }
    }

    /// Use a state key different from the attribute name
    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn min_key(&self) -> String {
        format!("{}Min", self.key)
    }

    pub fn max_key(&self) -> String {
        format!("{}Max", self.key)
    }

    /// Filter state keys owned by this filter
    pub fn state_keys(&self) -> Vec<String> {
        match self.kind {
            FilterKind::Range => vec![self.min_key(), self.max_key()],
            _ => vec![self.key.clone()],
        }
    }
}

/// Per-collection description of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSchema {
    /// Collection segment in `/api/<collection>`
    pub collection: String,
    /// Attributes joined with spaces to form the display title
    pub title_fields: Vec<String>,
    pub default_title: String,
    /// Attribute holding the price shown on cards
    pub price_field: String,
    /// Optional flag marking an item as published
    pub active_field: Option<String>,
    pub fields: Vec<FieldDef>,
    /// Scalar attributes matched by the free-text query
    pub search_fields: Vec<String>,
    /// List attributes matched by the free-text query (joined with spaces)
    pub search_list_fields: Vec<String>,
    /// Filter panel, in display order
    pub filters: Vec<FilterSpec>,
}

impl CatalogSchema {
    /// Vehicle catalog (`/api/vehiculos`)
    pub fn vehicles() -> Self {
        use FieldKind::*;
        Self {
            collection: "vehiculos".into(),
            title_fields: vec!["marca".into(), "modelo".into()],
            default_title: "Vehículo".into(),
            price_field: "precio".into(),
            active_field: None,
            fields: vec![
                FieldDef::new("marca", "Marca", Text).required(),
                FieldDef::new("modelo", "Modelo", Text).required(),
                FieldDef::new("anio", "Año", Number),
                FieldDef::new("precio", "Precio (USD)", Number),
                FieldDef::new("kilometraje", "Kilometraje", Number),
                FieldDef::new("transmision", "Transmisión", Select),
                FieldDef::new("combustible", "Combustible", Select),
                FieldDef::new("color", "Color", Select),
                FieldDef::new("pasajeros", "Pasajeros", Number),
                FieldDef::new("caracteristicas", "Características", List),
            ],
            search_fields: vec!["marca".into(), "modelo".into(), "color".into()],
            search_list_fields: vec!["caracteristicas".into()],
            filters: vec![
                FilterSpec::new("marca", "Marca", FilterKind::Exact),
                FilterSpec::new("pasajeros", "Pasajeros", FilterKind::Exact),
                FilterSpec::new("color", "Color", FilterKind::Exact),
                FilterSpec::new("anio", "Año", FilterKind::Range),
                FilterSpec::new("precio", "Precio", FilterKind::Range),
            ],
        }
    }

    /// Funeral plan catalog (`/api/planes`)
    pub fn plans() -> Self {
        use FieldKind::*;
        Self {
            collection: "planes".into(),
            title_fields: vec!["nombre".into()],
            default_title: "Plan funerario".into(),
            price_field: "precio".into(),
            active_field: Some("activo".into()),
            fields: vec![
                FieldDef::new("nombre", "Nombre", Text).required(),
                FieldDef::new("descripcionCorta", "Descripción corta", Text),
                FieldDef::new("tipo", "Tipo", Text),
                FieldDef::new("precio", "Precio (USD)", Number),
                FieldDef::new("activo", "Activo", Flag),
                FieldDef::new("incluye", "Incluye", List),
                FieldDef::new("ataudes", "Ataúdes", List),
                FieldDef::new("tags", "Tags", List),
            ],
            search_fields: vec!["nombre".into(), "descripcionCorta".into()],
            search_list_fields: vec!["incluye".into(), "ataudes".into(), "tags".into()],
            filters: vec![
                FilterSpec::new("tags", "Tag", FilterKind::Contains).keyed("tag"),
                FilterSpec::new("activo", "Estado", FilterKind::Status),
                FilterSpec::new("precio", "Precio (USD)", FilterKind::Range),
            ],
        }
    }

    /// Look up a preset by collection name
    pub fn for_collection(collection: &str) -> Option<Self> {
        match collection {
            "vehiculos" => Some(Self::vehicles()),
            "planes" => Some(Self::plans()),
            _ => None,
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn filter(&self, key: &str) -> Option<&FilterSpec> {
        self.filters.iter().find(|f| f.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_by_collection() {
        assert_eq!(CatalogSchema::for_collection("planes").unwrap().collection, "planes");
        assert_eq!(CatalogSchema::for_collection("vehiculos").unwrap().collection, "vehiculos");
        assert!(CatalogSchema::for_collection("casas").is_none());
    }

    #[test]
    fn test_range_state_keys() {
        let spec = FilterSpec::new("precio", "Precio", FilterKind::Range);
        assert_eq!(spec.state_keys(), vec!["precioMin", "precioMax"]);

        let tag = FilterSpec::new("tags", "Tag", FilterKind::Contains).keyed("tag");
        assert_eq!(tag.state_keys(), vec!["tag"]);
        assert_eq!(tag.field, "tags");
    }

    #[test]
    fn test_required_fields() {
        let schema = CatalogSchema::vehicles();
        let required: Vec<&str> = schema
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(required, vec!["marca", "modelo"]);
    }
}
