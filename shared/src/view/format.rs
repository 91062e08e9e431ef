//! Display formatting

use crate::catalog::CatalogSchema;
use crate::models::CatalogItem;

/// Price in whole US dollars with thousands separators (`US$ 1,500`); `-` when missing
pub fn format_price(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "-".to_string();
    };

    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-US$ {grouped}")
    } else {
        format!("US$ {grouped}")
    }
}

/// Display title: the schema's title fields joined with spaces, else its default title
pub fn item_title(item: &CatalogItem, schema: &CatalogSchema) -> String {
    let title = schema
        .title_fields
        .iter()
        .filter_map(|field| item.text(field))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        schema.default_title.clone()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(None), "-");
        assert_eq!(format_price(Some(0.0)), "US$ 0");
        assert_eq!(format_price(Some(950.0)), "US$ 950");
        assert_eq!(format_price(Some(1500.4)), "US$ 1,500");
        assert_eq!(format_price(Some(1234567.0)), "US$ 1,234,567");
        assert_eq!(format_price(Some(f64::NAN)), "-");
    }

    #[test]
    fn test_item_title() {
        let vehicles = CatalogSchema::vehicles();
        let item = CatalogItem::new("1").with("marca", " Toyota ").with("modelo", "Coaster");
        assert_eq!(item_title(&item, &vehicles), "Toyota Coaster");

        let plans = CatalogSchema::plans();
        assert_eq!(item_title(&CatalogItem::new("2"), &plans), "Plan funerario");
    }
}
