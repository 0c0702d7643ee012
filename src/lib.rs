//! Media Browser Library
//!
//! The fetch/state engine of a movie and TV-show catalog browser backed by
//! the TMDB API: paginated discovery with debounced filtering, infinite
//! scrolling, detail aggregation, and watchlist sessions.

pub mod core;
pub mod error;
pub mod models;
pub mod services;

pub use error::{Error, Result};
