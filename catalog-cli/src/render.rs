//! Text rendering of pages

use catalog_client::contact::{inquiry_message, tel_link, whatsapp_link};
use catalog_client::{ClientConfig, DetailPage, ImageResolver};
use shared::catalog::{FieldKind, FilterKind, FilterSpec, STATUS_ALL};
use shared::view::{format_price, item_title};
use shared::{CatalogItem, CatalogSchema};
use std::fmt::Write;

/// One line per item: id, title, price and cover image
pub fn item_lines(items: &[&CatalogItem], schema: &CatalogSchema, images: &ImageResolver) -> String {
    let mut out = String::new();
    for item in items {
        let mut line = format!(
            "{:<10} {}  {}",
            item.id,
            item_title(item, schema),
            format_price(item.number(&schema.price_field))
        );
        if let Some(field) = &schema.active_field
            && !item.flag(field)
        {
            line.push_str("  [inactivo]");
        }
        let _ = writeln!(out, "{}\n           {}", line, images.cover(item.cover_path()));
    }
    out
}

pub fn result_summary(shown: usize, total: usize) -> String {
    format!("{} de {} resultados", shown, total)
}

fn field_value(item: &CatalogItem, key: &str, kind: FieldKind) -> Option<String> {
    match kind {
        FieldKind::List => {
            let values = item.list(key);
            (!values.is_empty()).then(|| values.join(", "))
        }
        FieldKind::Flag => Some(if item.flag(key) { "sí" } else { "no" }.to_string()),
        _ => item.text(key).filter(|v| !v.trim().is_empty()),
    }
}

/// Detail view: fields, photos, zoom state and contact links
pub fn detail(page: &DetailPage, schema: &CatalogSchema, images: &ImageResolver, config: &ClientConfig) -> String {
    let Some(item) = page.item() else {
        return "No encontrado".to_string();
    };

    let mut out = String::new();
    let title = page.title();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "Precio: {}", format_price(item.number(&schema.price_field)));
    for field in &schema.fields {
        if field.key == schema.price_field || schema.title_fields.contains(&field.key) {
            continue;
        }
        if let Some(value) = field_value(item, &field.key, field.kind) {
            let _ = writeln!(out, "{}: {}", field.label, value);
        }
    }

    let _ = writeln!(out, "\nFotos ({}):", page.photos().len());
    for (i, photo) in page.photos().iter().enumerate() {
        let marker = if i == page.carousel().index() { '>' } else { ' ' };
        match photo.caption() {
            Some(caption) => {
                let _ = writeln!(out, "{} {} ({})", marker, images.resolve(photo.path()), caption);
            }
            None => {
                let _ = writeln!(out, "{} {}", marker, images.resolve(photo.path()));
            }
        }
    }

    let zoom = page.zoom();
    if let Some(src) = zoom.src() {
        let _ = writeln!(out, "Zoom: {} x{:.2}", images.resolve(src), zoom.scale());
    }

    let text = inquiry_message(item, &title, None);
    if let Some(link) = config
        .whatsapp_phone
        .as_deref()
        .and_then(|phone| whatsapp_link(phone, &text))
    {
        let _ = writeln!(out, "\nWhatsApp: {}", link);
    }
    if let Some(link) = config.contact_phone.as_deref().and_then(tel_link) {
        let _ = writeln!(out, "Llamar: {}", link);
    }
    out
}

/// Choices of one filter as shown in the panel
pub fn filter_choices(spec: &FilterSpec, options: &[String]) -> String {
    match spec.kind {
        FilterKind::Range => format!("{} ({} / {})", spec.label, spec.min_key(), spec.max_key()),
        FilterKind::Status => format!("{} ({}): {} | activos | inactivos", spec.label, spec.key, STATUS_ALL),
        _ if options.is_empty() => format!("{} ({}): -", spec.label, spec.key),
        _ => format!("{} ({}): {}", spec.label, spec.key, options.join(" | ")),
    }
}
