//! Detail aggregator.
//!
//! Loads everything the details view shows about one movie: core details,
//! trailer, credits, reviews, and similar titles. The five requests run
//! concurrently and are joined settle-all, so one section failing never
//! cancels or delays the others.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::models::details::{CastMember, CrewMember, MovieDetail, Review};
use crate::models::media::MediaItem;
use crate::services::tmdb::TmdbClient;

/// Page-level message when the core detail request fails.
pub const DETAILS_ERROR: &str = "Failed to load movie details. Please try again later.";
/// Section message when the credits request fails.
pub const CREDITS_ERROR: &str = "Cast and crew data not found.";
/// Section message when the reviews request fails.
pub const REVIEWS_ERROR: &str = "No reviews available for this movie.";
/// Section message when the similar-movies request fails.
pub const SIMILAR_ERROR: &str = "No similar movies found.";
/// Section message when the trailer request fails.
pub const TRAILER_ERROR: &str = "Trailer not found";

/// How many cast entries the cast section shows.
const CAST_LIMIT: usize = 10;

/// Lifecycle of the details view for one movie id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStatus {
    Idle,
    Loading,
    Loaded,
    NotFound,
    Failed,
}

/// Independently-failing sections of the details view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Trailer,
    Credits,
    Reviews,
    Similar,
}

/// Aggregated detail content, built incrementally as each request resolves.
#[derive(Debug, Default)]
pub struct DetailBundle {
    pub core: Option<MovieDetail>,
    pub trailer_key: Option<String>,
    pub cast: Vec<CastMember>,
    pub directors: Vec<CrewMember>,
    pub reviews: Vec<Review>,
    pub similar: Vec<MediaItem>,
}

/// Fetch/state controller for the movie details view.
pub struct DetailAggregator {
    client: Arc<TmdbClient>,
    movie_id: Option<u64>,
    status: DetailStatus,
    bundle: DetailBundle,
    section_errors: HashMap<Section, String>,
    trailer_loading: bool,
    error: Option<String>,
}

impl DetailAggregator {
    /// Create an idle aggregator.
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self {
            client,
            movie_id: None,
            status: DetailStatus::Idle,
            bundle: DetailBundle::default(),
            section_errors: HashMap::new(),
            trailer_loading: false,
            error: None,
        }
    }

    /// Load all detail sections for one movie.
    ///
    /// A re-render with the id already loaded is a no-op; a different id
    /// rebuilds the bundle from scratch.
    pub async fn load(&mut self, movie_id: u64) {
        if self.movie_id == Some(movie_id) && self.status != DetailStatus::Idle {
            return;
        }
        self.movie_id = Some(movie_id);
        self.status = DetailStatus::Loading;
        self.bundle = DetailBundle::default();
        self.section_errors.clear();
        self.error = None;
        self.trailer_loading = true;

        let client = Arc::clone(&self.client);
        let (core, videos, credits, reviews, similar) = futures::join!(
            client.movie_details(movie_id),
            client.movie_videos(movie_id),
            client.movie_credits(movie_id),
            client.movie_reviews(movie_id),
            client.similar_movies(movie_id),
        );

        match core {
            Ok(detail) => {
                self.bundle.core = Some(detail);
                self.status = DetailStatus::Loaded;
            }
            Err(err) if err.is_not_found() => {
                self.status = DetailStatus::NotFound;
            }
            Err(err) => {
                warn!(movie_id, %err, "core detail fetch failed");
                self.status = DetailStatus::Failed;
                self.error = Some(DETAILS_ERROR.to_string());
            }
        }

        // Section outcomes are applied regardless of the core outcome; each
        // section's error state is independent of its siblings.
        match videos {
            Ok(videos) => {
                self.bundle.trailer_key = videos
                    .iter()
                    .find(|v| v.is_youtube_trailer())
                    .map(|v| v.key.clone());
            }
            Err(err) => {
                warn!(movie_id, %err, "trailer fetch failed");
                self.section_errors
                    .insert(Section::Trailer, TRAILER_ERROR.to_string());
            }
        }
        self.trailer_loading = false;

        match credits {
            Ok(mut credits) => {
                credits.cast.truncate(CAST_LIMIT);
                self.bundle.cast = credits.cast;
                self.bundle.directors = credits
                    .crew
                    .into_iter()
                    .filter(|member| member.job == "Director")
                    .collect();
            }
            Err(err) => {
                warn!(movie_id, %err, "credits fetch failed");
                self.section_errors
                    .insert(Section::Credits, CREDITS_ERROR.to_string());
            }
        }

        match reviews {
            Ok(page) => self.bundle.reviews = page.results,
            Err(err) => {
                warn!(movie_id, %err, "reviews fetch failed");
                self.section_errors
                    .insert(Section::Reviews, REVIEWS_ERROR.to_string());
            }
        }

        match similar {
            Ok(page) => self.bundle.similar = page.results,
            Err(err) => {
                warn!(movie_id, %err, "similar-movies fetch failed");
                self.section_errors
                    .insert(Section::Similar, SIMILAR_ERROR.to_string());
            }
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> DetailStatus {
        self.status
    }

    /// The aggregated content.
    pub fn bundle(&self) -> &DetailBundle {
        &self.bundle
    }

    /// Scoped error message for one section, if its request failed.
    pub fn section_error(&self, section: Section) -> Option<&str> {
        self.section_errors.get(&section).map(String::as_str)
    }

    /// Page-level error message, set only when the core request failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the trailer request is still outstanding. Rendered as a
    /// loading indicator distinct from the page-level one.
    pub fn trailer_loading(&self) -> bool {
        self.trailer_loading
    }

    /// Id of the movie currently loaded or loading.
    pub fn movie_id(&self) -> Option<u64> {
        self.movie_id
    }
}
