//! Filter state and text-input debouncing.

use std::time::Duration;

use chrono::{Datelike, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::services::tmdb::DiscoverQuery;

/// Delay before a text query settles.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Rating bounds meaning "no rating filter".
pub const DEFAULT_RATING_RANGE: (f32, f32) = (0.0, 10.0);

/// User-adjustable query parameters for a listing view.
///
/// `text_input` tracks every keystroke; `committed_query` only changes when
/// the debouncer settles. Everything derived from the filters (endpoint
/// selection, discovery parameters) reads the committed value.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub text_input: String,
    pub committed_query: String,
    pub genre_id: Option<u64>,
    pub year: Option<String>,
    pub rating_range: (f32, f32),
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            text_input: String::new(),
            committed_query: String::new(),
            genre_id: None,
            year: None,
            rating_range: DEFAULT_RATING_RANGE,
        }
    }
}

impl FilterState {
    /// Whether any parameter deviates from its default. Filtered queries are
    /// routed to the discovery endpoint instead of the popularity listing.
    pub fn is_filtered(&self) -> bool {
        !self.committed_query.is_empty()
            || self.genre_id.is_some()
            || self.year.is_some()
            || self.rating_range != DEFAULT_RATING_RANGE
    }

    /// Restore all parameters to their defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Discovery parameters for the given page.
    pub fn to_discover_query(&self, page: u32) -> DiscoverQuery {
        DiscoverQuery {
            page,
            text_query: self.committed_query.clone(),
            genre_id: self.genre_id,
            year: self.year.clone(),
            rating_range: self.rating_range,
        }
    }
}

/// Cancellable single-slot debounce timer.
///
/// Each call to [`schedule`](Self::schedule) aborts the pending timer, if
/// any, and starts a new one; only a value that survives the full delay
/// without being superseded is sent to the subscriber.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

impl Debouncer {
    /// Create a debouncer with the given settle delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Restart the timer with a new value.
    pub fn schedule(&mut self, value: String, tx: &UnboundedSender<String>) {
        self.cancel();
        let delay = self.delay;
        let tx = tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver may be gone if the owning view was torn down.
            let _ = tx.send(value);
        }));
    }

    /// Abort the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a timer is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The 50 most recent years, newest first, as the year filter offers them.
pub fn year_options() -> Vec<String> {
    let current = Utc::now().year();
    (0..50).map(|offset| (current - offset).to_string()).collect()
}
