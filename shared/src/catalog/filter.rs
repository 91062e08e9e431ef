//! Filter and search engine
//!
//! Filtering is a pure function over the in-memory list. Each
//! [`FilterSpec`] of the schema is compiled into one predicate, the free
//! text query into another, and an item is kept when all of them pass.

use super::schema::{CatalogSchema, FilterKind, FilterSpec};
use crate::models::CatalogItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status value meaning "no constraint"
pub const STATUS_ALL: &str = "todos";

/// Current filter panel values (key → value, empty = no constraint)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState(BTreeMap<String, String>);

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial panel state for a schema: every key blank, status filters on "todos"
    pub fn cleared(schema: &CatalogSchema) -> Self {
        let mut state = Self::new();
        for spec in &schema.filters {
            for key in spec.state_keys() {
                let value = match spec.kind {
                    FilterKind::Status => STATUS_ALL,
                    _ => "",
                };
                state.set(key, value);
            }
        }
        state
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Value for a key; unknown keys read as blank
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys holding a constraint
    pub fn active_count(&self, schema: &CatalogSchema) -> usize {
        ItemFilter::new("", self, schema).predicates.len()
    }
}

/// Parse a range bound; blank or non-numeric input disables the bound
pub fn parse_bound(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a status filter value into the wanted flag value
pub fn parse_status(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "activos" | "activo" | "active" | "true" => Some(true),
        "inactivos" | "inactivo" | "inactive" | "false" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone)]
enum Predicate<'s> {
    Exact { field: &'s str, value: String },
    Contains { field: &'s str, value: String },
    Text { field: &'s str, needle: String },
    Range { field: &'s str, min: Option<f64>, max: Option<f64> },
    Status { field: &'s str, wanted: bool },
}

impl Predicate<'_> {
    fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            Predicate::Exact { field, value } => item.text(field).is_some_and(|t| t.trim() == value),
            Predicate::Contains { field, value } => item.list(field).iter().any(|v| v.trim() == value),
            Predicate::Text { field, needle } => item
                .text(field)
                .is_some_and(|t| t.to_lowercase().contains(needle.as_str())),
            Predicate::Range { field, min, max } => match item.number(field) {
                Some(n) => min.is_none_or(|m| n >= m) && max.is_none_or(|m| n <= m),
                None => false,
            },
            Predicate::Status { field, wanted } => item.flag(field) == *wanted,
        }
    }

    fn compile<'s>(spec: &'s FilterSpec, state: &FilterState) -> Option<Predicate<'s>> {
        let field = spec.field.as_str();
        match spec.kind {
            FilterKind::Exact | FilterKind::Contains | FilterKind::Text => {
                let value = state.get(&spec.key).trim();
                if value.is_empty() {
                    return None;
                }
                Some(match spec.kind {
                    FilterKind::Exact => Predicate::Exact { field, value: value.to_string() },
                    FilterKind::Contains => Predicate::Contains { field, value: value.to_string() },
                    _ => Predicate::Text { field, needle: value.to_lowercase() },
                })
            }
            FilterKind::Range => {
                let min = parse_bound(state.get(&spec.min_key()));
                let max = parse_bound(state.get(&spec.max_key()));
                if min.is_none() && max.is_none() {
                    return None;
                }
                Some(Predicate::Range { field, min, max })
            }
            FilterKind::Status => {
                parse_status(state.get(&spec.key)).map(|wanted| Predicate::Status { field, wanted })
            }
        }
    }
}

/// Compiled query + filter state for one schema
#[derive(Debug, Clone)]
pub struct ItemFilter<'s> {
    term: String,
    schema: &'s CatalogSchema,
    predicates: Vec<Predicate<'s>>,
}

impl<'s> ItemFilter<'s> {
    pub fn new(query: &str, state: &FilterState, schema: &'s CatalogSchema) -> Self {
        let predicates = schema
            .filters
            .iter()
            .filter_map(|spec| Predicate::compile(spec, state))
            .collect();
        Self {
            term: query.trim().to_lowercase(),
            schema,
            predicates,
        }
    }

    /// True when neither the query nor any filter constrains the list
    pub fn is_unconstrained(&self) -> bool {
        self.term.is_empty() && self.predicates.is_empty()
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.matches_query(item) && self.predicates.iter().all(|p| p.matches(item))
    }

    fn matches_query(&self, item: &CatalogItem) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let contains = |text: &str| text.to_lowercase().contains(&self.term);

        self.schema
            .search_fields
            .iter()
            .filter_map(|field| item.text(field))
            .any(|text| contains(&text))
            || self
                .schema
                .search_list_fields
                .iter()
                .map(|field| item.list(field).join(" "))
                .any(|text| contains(&text))
    }
}

/// Items passing the query and every active filter, in input order
pub fn filter_items<'a>(
    items: &'a [CatalogItem],
    query: &str,
    state: &FilterState,
    schema: &CatalogSchema,
) -> Vec<&'a CatalogItem> {
    let filter = ItemFilter::new(query, state, schema);
    items.iter().filter(|item| filter.matches(item)).collect()
}
