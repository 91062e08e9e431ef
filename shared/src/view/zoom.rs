//! Image zoom state for the detail view

/// Smallest scale factor
pub const ZOOM_MIN: f64 = 1.0;
/// Largest scale factor
pub const ZOOM_MAX: f64 = 3.0;
/// Scale change per zoom action
pub const ZOOM_STEP: f64 = 0.25;

/// Zoom dialog: the opened image and a single scale factor
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    src: Option<String>,
    caption: String,
    scale: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            src: None,
            caption: String::new(),
            scale: ZOOM_MIN,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl ZoomState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an image; the scale always restarts at 1.0. Blank sources are ignored.
    pub fn open(&mut self, src: impl Into<String>, caption: impl Into<String>) {
        let src = src.into();
        if src.is_empty() {
            return;
        }
        self.src = Some(src);
        self.caption = caption.into();
        self.scale = ZOOM_MIN;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn zoom_in(&mut self) {
        self.scale = round2(self.scale + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.scale = round2(self.scale - ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn reset(&mut self) {
        self.scale = ZOOM_MIN;
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_open(&self) -> bool {
        self.src.is_some()
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_zoom_ins_then_reset() {
        let mut zoom = ZoomState::new();
        assert_eq!(zoom.scale(), 1.0);
        zoom.zoom_in();
        zoom.zoom_in();
        zoom.zoom_in();
        assert_eq!(zoom.scale(), 1.75);
        zoom.reset();
        assert_eq!(zoom.scale(), 1.0);
    }

    #[test]
    fn test_clamped_to_bounds() {
        let mut zoom = ZoomState::new();
        zoom.zoom_out();
        assert_eq!(zoom.scale(), 1.0);

        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.scale(), 3.0);
        zoom.zoom_out();
        assert_eq!(zoom.scale(), 2.75);
    }

    #[test]
    fn test_open_resets_scale() {
        let mut zoom = ZoomState::new();
        zoom.open("/uploads/a.jpg", "Frente");
        zoom.zoom_in();
        zoom.zoom_in();
        zoom.open("/uploads/b.jpg", "");
        assert_eq!(zoom.scale(), 1.0);
        assert_eq!(zoom.src(), Some("/uploads/b.jpg"));
        assert_eq!(zoom.caption(), "");

        zoom.open("", "ignored");
        assert_eq!(zoom.src(), Some("/uploads/b.jpg"));

        zoom.close();
        assert!(!zoom.is_open());
        assert_eq!(zoom.scale(), 1.0);
    }
}
