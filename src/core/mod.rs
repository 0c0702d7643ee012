//! State machines driving the browsing views.

pub mod browser;
pub mod details;
pub mod list_state;
pub mod query;
pub mod scroll;
pub mod watchlist;
