//! RawgClient against a mock RAWG server.

use std::time::Duration;

use psp_shelf_scraper::{ApiError, Credentials, PSP_PLATFORM_ID, RawgClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> RawgClient {
    RawgClient::new(Credentials::new("test-key", server.uri())).unwrap()
}

fn game_json(id: u64, slug: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "slug": slug,
        "name": name,
        "released": "2008-02-26",
        "background_image": format!("https://media.example/{slug}.jpg"),
        "rating": 4.2,
        "rating_top": 5,
        "ratings_count": 311,
        "metacritic": 86,
        "platforms": [
            { "platform": { "id": 17, "name": "PSP", "slug": "psp" } },
            { "platform": { "id": 17, "name": "PSP", "slug": "psp" } }
        ],
        "genres": [
            { "id": 4, "name": "Action", "slug": "action" }
        ]
    })
}

#[tokio::test]
async fn get_by_slug_returns_record() {
    let server = MockServer::start().await;
    let mut body = game_json(3070, "patapon", "Patapon");
    body["description_raw"] = json!("Rhythm strategy.");

    Mock::given(method("GET"))
        .and(path("/games/patapon"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let record = client(&server).get_by_slug("patapon").await.unwrap();
    assert_eq!(record.id, 3070);
    assert_eq!(record.name, "Patapon");
    assert_eq!(record.description.as_deref(), Some("Rhythm strategy."));
    assert_eq!(record.metacritic, Some(86));
    assert_eq!(record.platforms.len(), 1, "platforms are de-duplicated");
    assert!(record.on_platform(PSP_PLATFORM_ID));
}

#[tokio::test]
async fn get_by_slug_non_success_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/no-such-game"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&server)
        .await;

    let err = client(&server).get_by_slug("no-such-game").await.unwrap_err();
    assert!(
        matches!(err, ApiError::NotFound { ref slug, status: 404 } if slug == "no-such-game"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn search_sends_platform_facet_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("key", "test-key"))
        .and(query_param("search", "God of War"))
        .and(query_param("page_size", "5"))
        .and(query_param("platforms", PSP_PLATFORM_ID.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                game_json(1, "god-of-war-chains-of-olympus", "God of War: Chains of Olympus"),
                game_json(2, "god-of-war-ghost-of-sparta", "God of War: Ghost of Sparta"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client(&server).search_by_title("God of War", 5).await.unwrap();
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["God of War: Chains of Olympus", "God of War: Ghost of Sparta"]
    );
}

#[tokio::test]
async fn empty_search_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0, "results": [] })))
        .mount(&server)
        .await;

    let results = client(&server).search_by_title("Nothing Like This", 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn search_server_error_is_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).search_by_title("Lumines", 5).await.unwrap_err();
    match err {
        ApiError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(!url.contains("test-key"), "key leaked into {url}");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/patapon"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let c = client(&server);
    let err = c.get_by_slug("patapon").await.unwrap_err();
    assert!(matches!(err, ApiError::Json(_)), "unexpected error: {err:?}");
    assert_eq!(c.cached_responses().await, 0);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let c = RawgClient::new(Credentials::new("test-key", "http://127.0.0.1:1")).unwrap();
    let err = c.get_by_slug("patapon").await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn repeated_request_is_served_from_memo() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/lumines"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(game_json(10, "lumines", "Lumines")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let c = client(&server);
    let first = c.get_by_slug("lumines").await.unwrap();
    let second = c.get_by_slug("lumines").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(c.cached_responses().await, 1);
}

#[tokio::test]
async fn different_urls_are_memoized_separately() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let c = client(&server);
    c.search_by_title("Lumines", 5).await.unwrap();
    c.search_by_title("Lumines", 10).await.unwrap();
    c.search_by_title("Lumines", 5).await.unwrap();
    assert_eq!(c.cached_responses().await, 2);
}

#[tokio::test]
async fn expired_entry_is_refetched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/daxter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(game_json(5, "daxter", "Daxter")))
        .expect(2)
        .mount(&server)
        .await;

    let c = client(&server).with_cache_ttl(Duration::ZERO);
    c.get_by_slug("daxter").await.unwrap();
    c.get_by_slug("daxter").await.unwrap();
}

#[tokio::test]
async fn failures_are_not_memoized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/loco-roco"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let c = client(&server);
    assert!(c.get_by_slug("loco-roco").await.is_err());
    assert!(c.get_by_slug("loco-roco").await.is_err());
    assert_eq!(c.cached_responses().await, 0);
}
