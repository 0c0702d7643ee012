//! Data models.

pub mod config;
pub mod details;
pub mod media;
