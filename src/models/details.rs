//! Movie detail models.

use chrono::NaiveDate;
use serde::Deserialize;

use super::media::{lenient_date, Genre};

/// Full movie details.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: f32,
    pub vote_count: Option<u32>,
    pub genres: Option<Vec<Genre>>,
}

/// A video attached to a movie (trailers, teasers, clips).
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: Option<String>,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Video {
    /// Whether this video is a YouTube trailer, the only kind the trailer
    /// section embeds.
    pub fn is_youtube_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube"
    }
}

/// Movie credits.
#[derive(Debug, Clone, Deserialize)]
pub struct Credits {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

/// Cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: Option<u32>,
}

/// Crew member.
#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: String,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

/// User review.
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub content: String,
    pub author_details: AuthorDetails,
}

/// Review author details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorDetails {
    pub avatar_path: Option<String>,
    pub rating: Option<f32>,
}
