//! Media listing models.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of media record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the TMDB API for this media type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

/// A movie or TV show record as returned by listing endpoints.
///
/// Identity is `id` within a media type. TV listings carry `name` instead of
/// `title` and `first_air_date` instead of `release_date`; the aliases fold
/// both shapes into one model.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    #[serde(alias = "name")]
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default, alias = "first_air_date", deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub vote_average: f32,
    /// Listing endpoints imply the type without carrying it in the payload;
    /// the client stamps it onto every item it returns.
    #[serde(default)]
    pub media_type: MediaType,
}

/// Movie genre.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// One page of a paginated listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl<T> Page<T> {
    /// Whether further pages exist after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// TMDB serializes an unknown date as `""` rather than omitting the field.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}
