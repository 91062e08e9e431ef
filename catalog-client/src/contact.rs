//! WhatsApp and phone contact links

use reqwest::Url;
use shared::CatalogItem;

const WHATSAPP_BASE: &str = "https://wa.me/";

const INQUIRY_GREETING: &str =
    "Hola, necesito coordinar un servicio funerario. Por favor, ¿me brindan disponibilidad y costo?";

/// Keep only the digits of a phone number
pub fn sanitize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// `https://wa.me/<digits>?text=<message>`; `None` without a usable phone
pub fn whatsapp_link(phone: &str, text: &str) -> Option<String> {
    let digits = sanitize_phone(phone);
    if digits.is_empty() {
        return None;
    }
    Url::parse_with_params(&format!("{}{}", WHATSAPP_BASE, digits), &[("text", text)])
        .ok()
        .map(String::from)
}

/// `tel:+<digits>`; `None` without a usable phone
pub fn tel_link(phone: &str) -> Option<String> {
    let digits = sanitize_phone(phone);
    (!digits.is_empty()).then(|| format!("tel:+{}", digits))
}

/// Inquiry text for an item: title, type, included services, containers and link
pub fn inquiry_message(item: &CatalogItem, title: &str, link: Option<&str>) -> String {
    let mut lines = vec![INQUIRY_GREETING.to_string(), format!("Plan: {}", title)];
    if let Some(tipo) = item.text("tipo").filter(|t| !t.trim().is_empty()) {
        lines.push(format!("Tipo: {}", tipo));
    }
    let incluye = item.list("incluye");
    if !incluye.is_empty() {
        lines.push(format!("Incluye: {}", incluye.join(" | ")));
    }
    let ataudes = item.list("ataudes");
    if !ataudes.is_empty() {
        lines.push(format!("Ataúdes: {}", ataudes.join(" | ")));
    }
    if let Some(link) = link.filter(|l| !l.is_empty()) {
        lines.push(format!("Link: {}", link));
    }
    lines.join("\n")
}
