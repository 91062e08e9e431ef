//! Photo carousel position

use crate::models::PhotoRef;

/// Carousel over the normalized photos of one item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Carousel {
    photos: Vec<PhotoRef>,
    index: usize,
}

impl Carousel {
    pub fn new(photos: Vec<PhotoRef>) -> Self {
        Self { photos, index: 0 }
    }

    /// Replace the photos; the position restarts when it falls off the end
    pub fn set_photos(&mut self, photos: Vec<PhotoRef>) {
        self.photos = photos;
        if self.index >= self.photos.len() {
            self.index = 0;
        }
    }

    pub fn photos(&self) -> &[PhotoRef] {
        &self.photos
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&PhotoRef> {
        self.photos.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Arrows are only shown with more than one photo
    pub fn has_many(&self) -> bool {
        self.photos.len() > 1
    }

    pub fn next(&mut self) {
        if !self.photos.is_empty() {
            self.index = (self.index + 1) % self.photos.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.photos.is_empty() {
            self.index = (self.index + self.photos.len() - 1) % self.photos.len();
        }
    }

    /// Jump to a thumbnail; out-of-range indexes are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.photos.len() {
            self.index = index;
        }
    }
}
