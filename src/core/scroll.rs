//! Infinite-scroll pagination driver.

/// Snapshot of the scroll geometry at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Visible height of the viewport.
    pub height: f64,
    /// Scroll offset from the top of the document.
    pub scroll_top: f64,
    /// Total height of the document.
    pub document_height: f64,
}

impl Viewport {
    /// Distance between the viewport bottom and the document bottom.
    pub fn distance_to_bottom(&self) -> f64 {
        self.document_height - (self.height + self.scroll_top)
    }
}

/// Decides when crossing the bottom threshold should advance the page.
///
/// The `!loading` guard is the sole debouncing mechanism: the store raises
/// its loading flag before the fetch is awaited, so a single crossing can
/// only advance the page once.
#[derive(Debug, Clone, Copy)]
pub struct ScrollDriver {
    threshold: f64,
}

impl Default for ScrollDriver {
    fn default() -> Self {
        Self { threshold: 10.0 }
    }
}

impl ScrollDriver {
    /// Create a driver with a custom bottom threshold in pixels.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Whether this scroll event should advance the page by one.
    pub fn should_advance(&self, viewport: &Viewport, has_more: bool, loading: bool) -> bool {
        has_more && !loading && viewport.distance_to_bottom() <= self.threshold
    }
}
