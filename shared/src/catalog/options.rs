//! Select options for the filter panel

use super::schema::{FilterKind, FilterSpec};
use crate::models::CatalogItem;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Distinct values of the attribute behind a select filter.
///
/// Values are trimmed and blanks dropped. Purely numeric option sets sort
/// numerically, anything else case-insensitively. Range and status filters
/// have no options.
pub fn filter_options(items: &[CatalogItem], spec: &FilterSpec) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values: Vec<String> = Vec::new();

    let mut push = |value: String| {
        let value = value.trim().to_string();
        if !value.is_empty() && seen.insert(value.clone()) {
            values.push(value);
        }
    };

    match spec.kind {
        FilterKind::Contains => items
            .iter()
            .flat_map(|item| item.list(&spec.field))
            .for_each(&mut push),
        FilterKind::Exact | FilterKind::Text => items
            .iter()
            .filter_map(|item| item.text(&spec.field))
            .for_each(&mut push),
        FilterKind::Range | FilterKind::Status => {}
    }

    let numeric: Option<Vec<f64>> = values.iter().map(|v| v.parse::<f64>().ok()).collect();
    match numeric {
        Some(_) => values.sort_by(|a, b| {
            let (a, b) = (a.parse::<f64>().unwrap_or(0.0), b.parse::<f64>().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }),
        None => values.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        }),
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSchema;
    use serde_json::json;

    #[test]
    fn test_exact_options_are_distinct_and_sorted() {
        let schema = CatalogSchema::vehicles();
        let items = vec![
            CatalogItem::new("1").with("marca", "toyota").with("pasajeros", 30),
            CatalogItem::new("2").with("marca", "Hyundai ").with("pasajeros", 4),
            CatalogItem::new("3").with("marca", "Hyundai").with("pasajeros", 15),
            CatalogItem::new("4").with("marca", "").with("pasajeros", json!(null)),
        ];

        let marca = schema.filter("marca").unwrap();
        assert_eq!(filter_options(&items, marca), vec!["Hyundai", "toyota"]);

        let pasajeros = schema.filter("pasajeros").unwrap();
        assert_eq!(filter_options(&items, pasajeros), vec!["4", "15", "30"]);
    }

    #[test]
    fn test_contains_options_flatten_lists() {
        let schema = CatalogSchema::plans();
        let items = vec![
            CatalogItem::new("1").with("tags", json!(["premium", "cremacion"])),
            CatalogItem::new("2").with("tags", json!(["Cremacion", " premium "])),
        ];
        let tag = schema.filter("tag").unwrap();
        assert_eq!(filter_options(&items, tag), vec!["Cremacion", "cremacion", "premium"]);
    }

    #[test]
    fn test_range_filters_have_no_options() {
        let schema = CatalogSchema::plans();
        let items = vec![CatalogItem::new("1").with("precio", 10)];
        assert!(filter_options(&items, schema.filter("precio").unwrap()).is_empty());
    }
}
