//! TMDB API client.
//!
//! One HTTP call per operation, no retry, no caching. Non-2xx responses are
//! surfaced as [`Error::Api`] with the upstream status and body.

use serde::Deserialize;
use tracing::debug;

use crate::models::config::TmdbConfig;
use crate::models::details::{Credits, MovieDetail, Review, Video};
use crate::models::media::{Genre, MediaItem, MediaType, Page};
use crate::{Error, Result};

/// Query parameters for the movie discovery endpoint.
///
/// Rendered in a fixed order: `query`, `with_genres`,
/// `primary_release_year`, `vote_average.gte`/`.lte`, `page`. Absent or
/// default-valued filters are omitted entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub page: u32,
    pub text_query: String,
    pub genre_id: Option<u64>,
    pub year: Option<String>,
    pub rating_range: (f32, f32),
}

impl Default for DiscoverQuery {
    fn default() -> Self {
        Self {
            page: 1,
            text_query: String::new(),
            genre_id: None,
            year: None,
            rating_range: (0.0, 10.0),
        }
    }
}

impl DiscoverQuery {
    /// Render the active filters as `&key=value` pairs.
    pub fn query_string(&self) -> String {
        let mut qs = String::new();
        if !self.text_query.is_empty() {
            qs.push_str(&format!("&query={}", urlencoding::encode(&self.text_query)));
        }
        if let Some(genre_id) = self.genre_id {
            qs.push_str(&format!("&with_genres={}", genre_id));
        }
        if let Some(year) = &self.year {
            qs.push_str(&format!("&primary_release_year={}", year));
        }
        let (min, max) = self.rating_range;
        if min != 0.0 || max != 10.0 {
            qs.push_str(&format!("&vote_average.gte={}&vote_average.lte={}", min, max));
        }
        qs.push_str(&format!("&page={}", self.page));
        qs
    }
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

/// Video list response wrapper.
#[derive(Debug, Deserialize)]
struct VideoList {
    results: Vec<Video>,
}

/// Genre list response wrapper.
#[derive(Debug, Deserialize)]
struct GenreList {
    genres: Vec<Genre>,
}

/// Response to `/authentication/token/new`.
#[derive(Debug, Deserialize)]
struct RequestToken {
    request_token: String,
}

/// Response to `/authentication/session/new`.
#[derive(Debug, Deserialize)]
struct Session {
    session_id: String,
}

/// Acknowledgement returned by watchlist mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchlistAck {
    pub status_code: i32,
    pub status_message: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Create a new TMDB client from environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(TmdbConfig::from_env()?))
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// Build a URL with the api_key parameter and optional extra parameters.
    fn url(&self, path: &str, extra_params: &str) -> String {
        format!(
            "{}/{}?api_key={}{}",
            self.config.base_url, path, self.config.api_key, extra_params
        )
    }

    /// Issue a GET and decode the JSON body, mapping non-2xx to `Error::Api`.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    /// Issue a POST with a JSON body and decode the JSON response.
    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    /// Stamp the media type implied by the endpoint onto every item.
    fn stamp(mut page: Page<MediaItem>, media_type: MediaType) -> Page<MediaItem> {
        for item in &mut page.results {
            item.media_type = media_type;
        }
        page
    }

    /// Get one page of popular movies.
    pub async fn popular_movies(&self, page: u32) -> Result<Page<MediaItem>> {
        debug!(page, "fetching popular movies");
        let url = self.url("movie/popular", &format!("&page={}", page));
        Ok(Self::stamp(self.get_json(&url).await?, MediaType::Movie))
    }

    /// Get one page of popular TV shows.
    pub async fn popular_tv(&self, page: u32) -> Result<Page<MediaItem>> {
        debug!(page, "fetching popular TV shows");
        let url = self.url("tv/popular", &format!("&page={}", page));
        Ok(Self::stamp(self.get_json(&url).await?, MediaType::Tv))
    }

    /// Discover movies matching the given filters.
    pub async fn discover_movies(&self, query: &DiscoverQuery) -> Result<Page<MediaItem>> {
        debug!(page = query.page, "discovering movies");
        let url = self.url("discover/movie", &query.query_string());
        Ok(Self::stamp(self.get_json(&url).await?, MediaType::Movie))
    }

    /// Get full details for a movie.
    pub async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail> {
        let url = self.url(&format!("movie/{}", movie_id), "");
        self.get_json(&url).await
    }

    /// Get the videos attached to a movie.
    pub async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>> {
        let url = self.url(&format!("movie/{}/videos", movie_id), "");
        let list: VideoList = self.get_json(&url).await?;
        Ok(list.results)
    }

    /// Get the credits (cast and crew) for a movie.
    pub async fn movie_credits(&self, movie_id: u64) -> Result<Credits> {
        let url = self.url(&format!("movie/{}/credits", movie_id), "");
        self.get_json(&url).await
    }

    /// Get one page of user reviews for a movie.
    pub async fn movie_reviews(&self, movie_id: u64) -> Result<Page<Review>> {
        let url = self.url(&format!("movie/{}/reviews", movie_id), "");
        self.get_json(&url).await
    }

    /// Get movies similar to the given one.
    pub async fn similar_movies(&self, movie_id: u64) -> Result<Page<MediaItem>> {
        let url = self.url(&format!("movie/{}/similar", movie_id), "");
        Ok(Self::stamp(self.get_json(&url).await?, MediaType::Movie))
    }

    /// Get the movie genre list.
    pub async fn movie_genres(&self) -> Result<Vec<Genre>> {
        let url = self.url(
            "genre/movie/list",
            &format!("&language={}", self.config.language),
        );
        let list: GenreList = self.get_json(&url).await?;
        Ok(list.genres)
    }

    /// Request a new authentication token.
    ///
    /// The token must be approved by the user (see
    /// [`authorize_url`](Self::authorize_url)) before it can be exchanged
    /// for a session.
    pub async fn new_request_token(&self) -> Result<String> {
        let url = self.url("authentication/token/new", "");
        let token: RequestToken = self.get_json(&url).await?;
        Ok(token.request_token)
    }

    /// The URL where the user approves a request token.
    pub fn authorize_url(&self, request_token: &str) -> String {
        format!("https://www.themoviedb.org/authenticate/{}", request_token)
    }

    /// Exchange an approved request token for a session id.
    pub async fn new_session(&self, request_token: &str) -> Result<String> {
        let url = self.url("authentication/session/new", "");
        let body = serde_json::json!({ "request_token": request_token });
        let session: Session = self.post_json(&url, &body).await?;
        Ok(session.session_id)
    }

    /// Get the account watchlist for one media type.
    pub async fn watchlist(
        &self,
        media_type: MediaType,
        session_id: &str,
    ) -> Result<Vec<MediaItem>> {
        debug!(media_type = media_type.as_str(), "fetching watchlist");
        let url = self.url(
            &format!(
                "account/{}/watchlist/{}",
                self.config.account_id,
                media_type.as_str()
            ),
            &format!("&session_id={}", session_id),
        );
        let page: Page<MediaItem> = self.get_json(&url).await?;
        Ok(Self::stamp(page, media_type).results)
    }

    /// Add or remove an item from the account watchlist.
    pub async fn set_watchlist(
        &self,
        session_id: &str,
        media_id: u64,
        media_type: MediaType,
        on_list: bool,
    ) -> Result<WatchlistAck> {
        let url = self.url(
            &format!("account/{}/watchlist", self.config.account_id),
            &format!("&session_id={}", session_id),
        );
        let body = serde_json::json!({
            "media_type": media_type.as_str(),
            "media_id": media_id,
            "watchlist": on_list,
        });
        self.post_json(&url, &body).await
    }

    /// Get the full image URL for a poster path.
    pub fn poster_url(&self, poster_path: &str) -> String {
        self.config.image_url(poster_path)
    }
}
