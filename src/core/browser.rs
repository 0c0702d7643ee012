//! Browsing controller for one listing view.
//!
//! Composes the TMDB client, the list store, the filter state, the debouncer,
//! and the scroll driver into the fetch cycle a Movies or TV Shows view
//! drives: filter changes restart the list at page 1, scroll events near the
//! document bottom append the next page.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::core::list_state::ListStore;
use crate::core::query::{Debouncer, FilterState};
use crate::core::scroll::{ScrollDriver, Viewport};
use crate::models::media::{Genre, MediaType};
use crate::services::tmdb::TmdbClient;
use crate::Result;

/// Fetch/state controller for one media listing.
pub struct MediaBrowser {
    client: Arc<TmdbClient>,
    media_type: MediaType,
    filters: FilterState,
    page: u32,
    store: ListStore,
    debouncer: Debouncer,
    settled_tx: UnboundedSender<String>,
    settled_rx: UnboundedReceiver<String>,
    scroll: ScrollDriver,
    genres: Vec<Genre>,
}

impl MediaBrowser {
    /// Create a browser for the given media type.
    pub fn new(client: Arc<TmdbClient>, media_type: MediaType) -> Self {
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        Self {
            client,
            media_type,
            filters: FilterState::default(),
            page: 1,
            store: ListStore::new(),
            debouncer: Debouncer::default(),
            settled_tx,
            settled_rx,
            scroll: ScrollDriver::default(),
            genres: Vec::new(),
        }
    }

    /// Initial fetch on view mount: page 1 of the current query.
    pub async fn load(&mut self) {
        self.restart().await;
    }

    /// Record a keystroke and restart the debounce timer.
    pub fn set_search_input(&mut self, text: &str) {
        self.filters.text_input = text.to_string();
        self.debouncer
            .schedule(text.trim().to_string(), &self.settled_tx);
    }

    /// Wait for the next settled (debounced) text query.
    ///
    /// Returns `None` once the controller is being torn down and no more
    /// values can arrive.
    pub async fn next_settled_query(&mut self) -> Option<String> {
        self.settled_rx.recv().await
    }

    /// Commit a settled text query. A no-op if the query did not change;
    /// otherwise the list restarts at page 1.
    pub async fn apply_settled_query(&mut self, query: String) {
        if query == self.filters.committed_query {
            return;
        }
        self.filters.committed_query = query;
        self.restart().await;
    }

    /// Set or clear the genre filter.
    pub async fn set_genre(&mut self, genre_id: Option<u64>) {
        if genre_id == self.filters.genre_id {
            return;
        }
        self.filters.genre_id = genre_id;
        self.restart().await;
    }

    /// Set or clear the release-year filter.
    pub async fn set_year(&mut self, year: Option<String>) {
        if year == self.filters.year {
            return;
        }
        self.filters.year = year;
        self.restart().await;
    }

    /// Set the rating-range filter. Bounds are clamped to 0..=10 and
    /// reordered if inverted.
    pub async fn set_rating_range(&mut self, min: f32, max: f32) {
        let min = min.clamp(0.0, 10.0);
        let max = max.clamp(0.0, 10.0);
        let range = if min <= max { (min, max) } else { (max, min) };
        if range == self.filters.rating_range {
            return;
        }
        self.filters.rating_range = range;
        self.restart().await;
    }

    /// Clear every filter and reload page 1 of the unfiltered listing.
    ///
    /// The pending debounce timer is cancelled and the store is reset
    /// synchronously before the refetch, so no stale page of filtered
    /// results can be appended after clearing.
    pub async fn clear_filters(&mut self) {
        self.debouncer.cancel();
        self.filters.clear();
        self.restart().await;
    }

    /// Handle a scroll event. Advances the page by exactly one when the
    /// viewport bottom is within the threshold, more data exists, and no
    /// fetch is in flight.
    pub async fn handle_scroll(&mut self, viewport: &Viewport) {
        if self
            .scroll
            .should_advance(viewport, self.store.has_more(), self.store.is_loading())
        {
            self.page += 1;
            self.fetch_current().await;
        }
    }

    /// Fetch and cache the genre list for the filter UI.
    pub async fn load_genres(&mut self) -> Result<()> {
        self.genres = self.client.movie_genres().await?;
        Ok(())
    }

    /// Reset to page 1, clear the list, and fetch.
    async fn restart(&mut self) {
        self.page = 1;
        self.store.reset();
        self.fetch_current().await;
    }

    /// Issue the fetch for the current page and filters, routing filtered
    /// queries to the discovery endpoint and unfiltered ones to the
    /// popularity listing.
    async fn fetch_current(&mut self) {
        let page = self.page;
        let filtered = self.filters.is_filtered();
        // Raised before the first await: a second scroll event arriving
        // while this fetch is in flight sees loading=true.
        self.store.begin_fetch();
        let result = match (self.media_type, filtered) {
            (MediaType::Movie, true) => {
                self.client
                    .discover_movies(&self.filters.to_discover_query(page))
                    .await
            }
            (MediaType::Movie, false) => self.client.popular_movies(page).await,
            (MediaType::Tv, _) => self.client.popular_tv(page).await,
        };
        match result {
            Ok(payload) => self.store.fetch_succeeded(page, filtered, payload),
            Err(err) => {
                warn!(page, media_type = self.media_type.as_str(), %err, "list fetch failed");
                self.store.fetch_failed(&err);
            }
        }
    }

    /// The list state this controller maintains.
    pub fn store(&self) -> &ListStore {
        &self.store
    }

    /// Current page counter.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Current filter state.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Cached genre list, empty until [`load_genres`](Self::load_genres).
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Media type this browser lists.
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }
}
