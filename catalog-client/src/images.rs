//! Image URL resolution

/// Shown on cards whose item has no photo
pub const PLACEHOLDER_IMAGE: &str = "/assets/placeholders/vehiculo-default.jpg";

const UPLOADS_PREFIX: &str = "/uploads/";

/// Turns stored photo paths into fetchable URLs
#[derive(Debug, Clone, Default)]
pub struct ImageResolver {
    backend_origin: Option<String>,
}

impl ImageResolver {
    pub fn new(backend_origin: Option<String>) -> Self {
        Self {
            backend_origin: backend_origin
                .map(|o| o.trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty()),
        }
    }

    /// Absolute URLs pass through, `/uploads/...` gets the backend origin
    pub fn resolve(&self, src: &str) -> String {
        if src.starts_with("http://") || src.starts_with("https://") {
            return src.to_string();
        }
        match &self.backend_origin {
            Some(origin) if src.starts_with(UPLOADS_PREFIX) => format!("{}{}", origin, src),
            _ => src.to_string(),
        }
    }

    /// Card image: the cover photo, or the placeholder
    pub fn cover(&self, cover_path: Option<&str>) -> String {
        match cover_path {
            Some(path) if !path.trim().is_empty() => self.resolve(path),
            _ => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let resolver = ImageResolver::new(Some("http://files.local/".into()));
        assert_eq!(resolver.resolve("https://cdn/x.jpg"), "https://cdn/x.jpg");
        assert_eq!(
            resolver.resolve("/uploads/a.jpg"),
            "http://files.local/uploads/a.jpg"
        );
        assert_eq!(resolver.resolve("/static/a.jpg"), "/static/a.jpg");

        let bare = ImageResolver::new(None);
        assert_eq!(bare.resolve("/uploads/a.jpg"), "/uploads/a.jpg");
    }

    #[test]
    fn test_cover_placeholder() {
        let resolver = ImageResolver::default();
        assert_eq!(resolver.cover(None), PLACEHOLDER_IMAGE);
        assert_eq!(resolver.cover(Some("  ")), PLACEHOLDER_IMAGE);
        assert_eq!(resolver.cover(Some("/uploads/a.jpg")), "/uploads/a.jpg");
    }
}
