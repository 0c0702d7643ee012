//! Watchlist session and store.
//!
//! TMDB watchlists require a session id obtained through a two-step exchange:
//! a request token is created, approved by the user out of band, then traded
//! for a session. Tokens and session ids are treated as opaque strings.

use std::sync::Arc;

use tracing::warn;

use crate::models::media::{MediaItem, MediaType};
use crate::services::tmdb::TmdbClient;
use crate::{Error, Result};

/// Account watchlist state.
pub struct WatchlistStore {
    client: Arc<TmdbClient>,
    session_id: Option<String>,
    items: Vec<MediaItem>,
    loading: bool,
    error: Option<String>,
}

impl WatchlistStore {
    /// Create a store with no session.
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self {
            client,
            session_id: None,
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Start the authentication exchange: returns the request token the
    /// user must approve at [`TmdbClient::authorize_url`].
    pub async fn begin_auth(&self) -> Result<String> {
        self.client.new_request_token().await
    }

    /// Complete the exchange with an approved request token.
    pub async fn complete_auth(&mut self, request_token: &str) -> Result<()> {
        let session_id = self.client.new_session(request_token).await?;
        self.session_id = Some(session_id);
        Ok(())
    }

    /// Use an existing session id directly.
    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
    }

    /// Refresh the watchlist for one media type. Failures are recorded in
    /// the store's error state rather than returned.
    pub async fn refresh(&mut self, media_type: MediaType) {
        let Some(session_id) = self.session_id.clone() else {
            self.error = Some(Error::SessionMissing.to_string());
            return;
        };
        self.loading = true;
        self.error = None;
        match self.client.watchlist(media_type, &session_id).await {
            Ok(items) => {
                self.items = items;
                self.loading = false;
            }
            Err(err) => {
                warn!(media_type = media_type.as_str(), %err, "watchlist fetch failed");
                self.error = Some(err.to_string());
                self.loading = false;
            }
        }
    }

    /// Add or remove one item from the watchlist.
    pub async fn toggle(&self, media_id: u64, media_type: MediaType, on_list: bool) -> Result<()> {
        let session_id = self.session_id.as_deref().ok_or(Error::SessionMissing)?;
        self.client
            .set_watchlist(session_id, media_id, media_type, on_list)
            .await?;
        Ok(())
    }

    /// Current session id, if established.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Watchlist items from the most recent refresh.
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the most recent failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
