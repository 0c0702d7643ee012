//! List state store.
//!
//! Holds the ordered item collection behind a listing view, the
//! "more data available" flag, and the loading flag. Items are append-only
//! within a query session; a reset starts a new session.

use crate::models::media::{MediaItem, Page};
use crate::Error;

/// State of one paginated listing.
#[derive(Debug)]
pub struct ListStore {
    items: Vec<MediaItem>,
    has_more: bool,
    loading: bool,
    last_error: Option<String>,
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ListStore {
    /// Create an empty store ready for its first fetch.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            has_more: true,
            loading: false,
            last_error: None,
        }
    }

    /// Clear items and make `has_more` true again. Leaves `loading` untouched.
    pub fn reset(&mut self) {
        self.items.clear();
        self.has_more = true;
        self.last_error = None;
    }

    /// Mark a fetch as in flight.
    ///
    /// Must be called before the request future is first awaited, so the
    /// scroll driver's `!loading` guard cannot pass twice for one fetch.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.last_error = None;
    }

    /// Apply a successful fetch result.
    ///
    /// A page-1 result for a filtered query clears existing items first:
    /// this guards against a stale unfiltered page having been appended
    /// between the filter change and the arrival of the filtered result.
    pub fn fetch_succeeded(&mut self, page: u32, filtered: bool, payload: Page<MediaItem>) {
        if page == 1 && filtered {
            self.items.clear();
        }
        self.has_more = payload.has_next();
        self.items.extend(payload.results);
        self.loading = false;
    }

    /// Apply a failed fetch. Items and `has_more` are left unchanged; the
    /// error message is recorded for the view to surface.
    pub fn fetch_failed(&mut self, error: &Error) {
        self.loading = false;
        self.last_error = Some(error.to_string());
    }

    /// Items in fetch order.
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Whether further pages exist for the current query.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the most recent failed fetch, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
