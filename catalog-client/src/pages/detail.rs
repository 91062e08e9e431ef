//! Item detail: carousel and zoom

use crate::api::CatalogApi;
use shared::view::{Carousel, ZoomState, item_title};
use shared::{CatalogItem, CatalogSchema, PhotoRef};

/// Detail view of one item
#[derive(Debug, Clone)]
pub struct DetailPage {
    schema: CatalogSchema,
    item: Option<CatalogItem>,
    carousel: Carousel,
    zoom: ZoomState,
}

impl DetailPage {
    /// Fetch an item; any failure shows the not-found view
    pub async fn load(api: &CatalogApi, schema: CatalogSchema, id: &str) -> Self {
        match api.get(id).await {
            Ok(item) => Self::with_item(schema, item),
            Err(e) => {
                if !e.is_not_found() {
                    tracing::warn!(id, error = %e, "detail load failed");
                }
                Self {
                    schema,
                    item: None,
                    carousel: Carousel::default(),
                    zoom: ZoomState::new(),
                }
            }
        }
    }

    pub fn with_item(schema: CatalogSchema, item: CatalogItem) -> Self {
        let carousel = Carousel::new(item.photos());
        Self {
            schema,
            item: Some(item),
            carousel,
            zoom: ZoomState::new(),
        }
    }

    pub fn item(&self) -> Option<&CatalogItem> {
        self.item.as_ref()
    }

    pub fn is_not_found(&self) -> bool {
        self.item.is_none()
    }

    pub fn title(&self) -> String {
        match &self.item {
            Some(item) => item_title(item, &self.schema),
            None => self.schema.default_title.clone(),
        }
    }

    /// Normalized photos, primary first
    pub fn photos(&self) -> &[PhotoRef] {
        self.carousel.photos()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomState {
        &mut self.zoom
    }

    /// Open the zoom dialog on the current carousel photo
    pub fn open_zoom(&mut self) -> bool {
        match self.carousel.current() {
            Some(photo) => {
                self.zoom
                    .open(photo.path(), photo.caption().unwrap_or_default());
                self.zoom.is_open()
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_follows_carousel() {
        let item = CatalogItem::new("1")
            .with("nombre", "Premium")
            .with_primary_photo(PhotoRef::PathOnly("/a.jpg".into()))
            .with_gallery(vec![
                PhotoRef::PathOnly("/a.jpg".into()),
                PhotoRef::new("/b.jpg", "Sala"),
            ]);
        let mut page = DetailPage::with_item(CatalogSchema::plans(), item);
        assert_eq!(page.photos().len(), 2);
        assert_eq!(page.title(), "Premium");

        page.carousel_mut().next();
        assert!(page.open_zoom());
        assert_eq!(page.zoom().src(), Some("/b.jpg"));
        assert_eq!(page.zoom().caption(), "Sala");

        page.zoom_mut().zoom_in();
        page.carousel_mut().next();
        assert!(page.open_zoom());
        assert_eq!(page.zoom().scale(), 1.0);
    }
}
