//! TMDB client configuration.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Default TMDB API v3 base URL.
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default image CDN base path (w300 renditions).
pub const TMDB_IMAGE_URL: &str = "https://image.tmdb.org/t/p/w300";

/// TMDB client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// API key, passed as the `api_key` query parameter on every request.
    pub api_key: String,
    /// Language for responses.
    pub language: String,
    /// API base URL. Overridable for tests.
    pub base_url: String,
    /// Image CDN base path.
    pub image_base_url: String,
    /// Account id used by watchlist endpoints.
    pub account_id: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: "en".to_string(),
            base_url: TMDB_BASE_URL.to_string(),
            image_base_url: TMDB_IMAGE_URL.to_string(),
            account_id: 77777,
        }
    }
}

impl TmdbConfig {
    /// Create a config with the given API key and default everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create config from the `TMDB_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TMDB_API_KEY").map_err(|_| crate::Error::ApiKeyMissing)?;
        Ok(Self::new(api_key.trim().replace('"', "")))
    }

    /// Override the API base URL (for wiremock in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full image URL for a server-provided relative path.
    pub fn image_url(&self, relative_path: &str) -> String {
        format!("{}{}", self.image_base_url, relative_path)
    }
}
