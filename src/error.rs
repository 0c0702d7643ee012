//! Error types for the media browser.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media browser.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    ApiKeyMissing,

    // TMDB errors
    #[error("TMDB API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Entity not found")]
    NotFound,

    // Watchlist errors
    #[error("No TMDB session established")]
    SessionMissing,

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error means the requested entity does not exist upstream.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound | Error::Api { status: 404, .. })
    }
}
