//! Integration tests for the browsing controller, against a mock TMDB server.

use std::sync::Arc;

use media_browser::core::browser::MediaBrowser;
use media_browser::core::scroll::Viewport;
use media_browser::models::config::TmdbConfig;
use media_browser::models::media::MediaType;
use media_browser::services::tmdb::TmdbClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn movie_page(page: u32, total_pages: u32, ids: &[u64]) -> serde_json::Value {
    json!({
        "page": page,
        "total_pages": total_pages,
        "total_results": total_pages * 20,
        "results": ids.iter().map(|id| json!({
            "id": id,
            "title": format!("Movie {}", id),
            "poster_path": "/poster.jpg",
            "release_date": "2008-07-18",
            "vote_average": 8.1,
        })).collect::<Vec<_>>(),
    })
}

async fn browser_for(server: &MockServer, media_type: MediaType) -> MediaBrowser {
    let config = TmdbConfig::new("test-key").with_base_url(server.uri());
    MediaBrowser::new(Arc::new(TmdbClient::new(config)), media_type)
}

fn bottom_of_page() -> Viewport {
    Viewport {
        height: 800.0,
        scroll_top: 1195.0,
        document_height: 2000.0,
    }
}

#[tokio::test]
async fn test_initial_load_fetches_page_one_of_popular() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .and(query_param("page", "1"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 3, &[1, 2])))
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.load().await;

    assert_eq!(browser.page(), 1);
    assert_eq!(browser.store().items().len(), 2);
    // The payload carries no media_type; the client stamps it.
    assert_eq!(browser.store().items()[0].media_type, MediaType::Movie);
    assert!(browser.store().has_more());
    assert!(!browser.store().is_loading());
    assert!(browser.store().last_error().is_none());
}

#[tokio::test]
async fn test_tv_listing_uses_tv_popular_and_folds_name_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "total_pages": 1,
            "total_results": 1,
            "results": [{
                "id": 1399,
                "name": "Game of Thrones",
                "poster_path": "/got.jpg",
                "first_air_date": "2011-04-17",
                "vote_average": 8.4,
            }],
        })))
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Tv).await;
    browser.load().await;

    let items = browser.store().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Game of Thrones");
    assert_eq!(items[0].media_type, MediaType::Tv);
    assert!(items[0].release_date.is_some());
    assert!(!browser.store().has_more());
}

#[tokio::test]
async fn test_scroll_near_bottom_advances_exactly_one_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 2, &[1, 2])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(2, 2, &[3, 4])))
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.load().await;
    browser.handle_scroll(&bottom_of_page()).await;

    assert_eq!(browser.page(), 2);
    let ids: Vec<u64> = browser.store().items().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    // has_more turned off at the final page: further crossings are ignored.
    browser.handle_scroll(&bottom_of_page()).await;
    assert_eq!(browser.page(), 2);
}

#[tokio::test]
async fn test_scroll_away_from_bottom_does_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 5, &[1])))
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.load().await;
    browser
        .handle_scroll(&Viewport {
            height: 800.0,
            scroll_top: 0.0,
            document_height: 2000.0,
        })
        .await;

    assert_eq!(browser.page(), 1);
}

#[tokio::test]
async fn test_filter_change_resets_to_filtered_page_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 5, &[1, 2])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_genres", "28"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 2, &[100, 101])))
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.load().await;
    browser.handle_scroll(&bottom_of_page()).await; // appends page 2 of popular
    browser.set_genre(Some(28)).await;

    assert_eq!(browser.page(), 1);
    let ids: Vec<u64> = browser.store().items().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![100, 101]);
}

#[tokio::test]
async fn test_full_filter_scenario_builds_expected_discover_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 1, &[100])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 1, &[1])))
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.load().await;
    browser.apply_settled_query("batman".to_string()).await;
    browser.set_genre(Some(28)).await;
    browser.set_year(Some("2008".to_string())).await;
    browser.set_rating_range(7.0, 10.0).await;

    let requests = server.received_requests().await.expect("recording enabled");
    let last = requests.last().expect("at least one request");
    assert_eq!(last.url.path(), "/discover/movie");
    let query = last.url.query().expect("query string present");
    assert!(query.contains(
        "query=batman&with_genres=28&primary_release_year=2008\
         &vote_average.gte=7&vote_average.lte=10&page=1"
    ));
}

#[tokio::test]
async fn test_clear_filters_repopulates_with_popular_page_one_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 3, &[100, 101])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 3, &[1, 2])))
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.set_genre(Some(28)).await;
    assert!(browser.filters().is_filtered());

    browser.clear_filters().await;

    assert!(!browser.filters().is_filtered());
    assert_eq!(browser.page(), 1);
    let ids: Vec<u64> = browser.store().items().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_settled_query_change_triggers_exactly_one_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 1, &[1])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("query", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 1, &[100])))
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.load().await;
    browser.apply_settled_query("batman".to_string()).await;
    // Re-settling the same query is a no-op.
    browser.apply_settled_query("batman".to_string()).await;

    let ids: Vec<u64> = browser.store().items().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![100]);
}

#[tokio::test]
async fn test_debounced_input_settles_into_a_discover_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("query", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page(1, 1, &[100])))
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.set_search_input("bat");
    browser.set_search_input("batman");

    let settled = browser.next_settled_query().await.expect("query settles");
    assert_eq!(settled, "batman");
    browser.apply_settled_query(settled).await;

    assert_eq!(browser.store().items().len(), 1);
}

#[tokio::test]
async fn test_failed_fetch_stops_loading_and_records_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.load().await;

    assert!(!browser.store().is_loading());
    assert!(browser.store().items().is_empty());
    assert!(browser.store().has_more());
    let message = browser.store().last_error().expect("error recorded");
    assert!(message.contains("500"));
}

#[tokio::test]
async fn test_load_genres_caches_genre_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "genres": [
                {"id": 28, "name": "Action"},
                {"id": 35, "name": "Comedy"},
            ],
        })))
        .mount(&server)
        .await;

    let mut browser = browser_for(&server, MediaType::Movie).await;
    browser.load_genres().await.expect("genres load");

    assert_eq!(browser.genres().len(), 2);
    assert_eq!(browser.genres()[0].name, "Action");
}
