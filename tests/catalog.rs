//! Catalog Client Integration Tests
//!
//! Runs `ChannelCatalogClient` against a mock YouTube Data API.

use std::time::Duration;

use channel_catalog::{
    CatalogConfig, CatalogError, ChannelCatalogClient, ChannelSnapshot, PageLimits,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches first-page requests (no `pageToken` parameter)
struct FirstPage;

impl Match for FirstPage {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(k, _)| k == "pageToken")
    }
}

fn client_for(server: &MockServer) -> ChannelCatalogClient {
    let config = CatalogConfig::new("test-key", "UC123").with_base_url(server.uri());
    ChannelCatalogClient::new(config).unwrap()
}

fn playlist(id: &str, title: &str, item_count: u32) -> serde_json::Value {
    json!({
        "kind": "youtube#playlist",
        "etag": "etag",
        "id": id,
        "snippet": {
            "publishedAt": "2023-05-01T12:00:00Z",
            "channelId": "UC123",
            "title": title,
            "description": ""
        },
        "contentDetails": { "itemCount": item_count }
    })
}

fn playlist_item(id: &str, position: u32, video_id: &str) -> serde_json::Value {
    json!({
        "kind": "youtube#playlistItem",
        "id": id,
        "snippet": {
            "publishedAt": "2024-01-15T08:30:00Z",
            "channelId": "UC123",
            "title": format!("Video {}", video_id),
            "description": "Drone footage",
            "playlistId": "PL1",
            "position": position,
            "resourceId": { "kind": "youtube#video", "videoId": video_id },
            "thumbnails": {
                "default": { "url": format!("https://i.ytimg.com/vi/{}/default.jpg", video_id), "width": 120, "height": 90 },
                "high": { "url": format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id), "width": 480, "height": 360 }
            }
        }
    })
}

/// Two playlists over two pages: PL1 with cursor "tok1", then PL2
async fn mount_two_playlist_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/playlists"))
        .and(query_param("pageToken", "tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#playlistListResponse",
            "items": [playlist("PL2", "B", 0)]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlists"))
        .and(FirstPage)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#playlistListResponse",
            "nextPageToken": "tok1",
            "items": [playlist("PL1", "A", 3)]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_playlists_follows_cursor() {
    let server = MockServer::start().await;
    mount_two_playlist_pages(&server).await;

    let client = client_for(&server);
    let playlists = client.list_playlists().await.unwrap();

    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0].id, "PL1");
    assert_eq!(playlists[0].title, "A");
    assert_eq!(playlists[0].item_count, 3);
    assert_eq!(playlists[1].id, "PL2");
    assert_eq!(playlists[1].title, "B");
    assert_eq!(playlists[1].item_count, 0);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let first: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(first.contains(&("part".to_string(), "snippet,contentDetails".to_string())));
    assert!(first.contains(&("channelId".to_string(), "UC123".to_string())));
    assert!(first.contains(&("maxResults".to_string(), "50".to_string())));
    assert!(first.contains(&("key".to_string(), "test-key".to_string())));
    assert!(!first.iter().any(|(k, _)| k == "pageToken"));

    let token = requests[1]
        .url
        .query_pairs()
        .find(|(k, _)| k == "pageToken")
        .map(|(_, v)| v.into_owned());
    assert_eq!(token.as_deref(), Some("tok1"));
}

#[tokio::test]
async fn test_list_playlists_is_repeatable() {
    let server = MockServer::start().await;
    mount_two_playlist_pages(&server).await;

    let client = client_for(&server);
    let first = client.list_playlists().await.unwrap();
    let second = client.list_playlists().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_playlist_items_maps_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("part", "snippet"))
        .and(query_param("playlistId", "PL1"))
        .and(query_param("pageToken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [playlist_item("item-c", 2, "vidC")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "PL1"))
        .and(FirstPage)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageToken": "page2",
            "items": [playlist_item("item-a", 0, "vidA"), playlist_item("item-b", 1, "vidB")]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items = client.list_playlist_items("PL1").await.unwrap();

    let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["item-a", "item-b", "item-c"]);

    let first = &items[0];
    assert_eq!(first.playlist_id, "PL1");
    assert_eq!(first.position, 0);
    assert_eq!(first.video_id, "vidA");
    assert_eq!(first.title, "Video vidA");
    assert_eq!(first.description, "Drone footage");
    assert_eq!(
        first.thumbnail_url.as_deref(),
        Some("https://i.ytimg.com/vi/vidA/hqdefault.jpg")
    );
    assert_eq!(
        first.published_at.unwrap().to_rfc3339(),
        "2024-01-15T08:30:00+00:00"
    );
}

#[tokio::test]
async fn test_empty_playlist() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#playlistItemListResponse",
            "items": [],
            "pageInfo": { "totalResults": 0, "resultsPerPage": 50 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items = client.list_playlist_items("PLempty").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_failure_on_second_page_returns_no_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlists"))
        .and(query_param("pageToken", "tok1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{ "reason": "quotaExceeded", "domain": "youtube.quota" }]
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlists"))
        .and(FirstPage)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageToken": "tok1",
            "items": [playlist("PL1", "A", 3)]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.list_playlists().await.unwrap_err();

    match &err {
        CatalogError::FetchFailure { status, body } => {
            assert_eq!(*status, 403);
            assert!(body.contains("quotaExceeded"));
        }
        other => panic!("Expected FetchFailure, got {:?}", other),
    }
    assert!(err.to_string().contains("exceeded your quota"));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlists"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [{ "id": "PL1", "snippet": { "title": "A" } }] })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.list_playlists().await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::MalformedResponse {
            resource: "playlists",
            ..
        }
    ));
}

#[tokio::test]
async fn test_non_json_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captive portal</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.list_playlist_items("PL1").await.unwrap_err();

    assert!(matches!(err, CatalogError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_cancel_during_slow_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlists"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [] }))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = client.list_playlists_with_cancel(&cancel).await.unwrap_err();

    assert!(matches!(err, CatalogError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_page_limit_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageToken": "again",
            "items": [playlist("PL1", "A", 1)]
        })))
        .mount(&server)
        .await;

    let config = CatalogConfig::new("test-key", "UC123")
        .with_base_url(server.uri())
        .with_limits(PageLimits { max_pages: Some(3) });
    let client = ChannelCatalogClient::new(config).unwrap();

    let err = client.list_playlists().await.unwrap_err();
    assert!(matches!(err, CatalogError::PageLimitExceeded { limit: 3 }));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_snapshot_collects_every_playlist() {
    let server = MockServer::start().await;
    mount_two_playlist_pages(&server).await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "PL1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                playlist_item("item-b", 1, "vidB"),
                playlist_item("item-a", 0, "vidA"),
                playlist_item("item-c", 2, "vidC")
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "PL2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let snapshot = ChannelSnapshot::fetch(&client, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(snapshot.channel_id, "UC123");
    assert_eq!(snapshot.playlists.len(), 2);
    assert_eq!(snapshot.total_items(), 3);

    let positions: Vec<u32> = snapshot.playlists[0]
        .items
        .iter()
        .map(|i| i.position)
        .collect();
    assert_eq!(positions, vec![0, 1, 2]);
    assert!(snapshot.playlists[1].items.is_empty());

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["playlists"][0]["id"], "PL1");
    assert_eq!(json["playlists"][0]["item_count"], 3);
}

#[tokio::test]
async fn test_transport_error_does_not_expose_api_key() {
    let api_key = "AIzaSECRETKEY123";
    let config = CatalogConfig::new(api_key, "UC123").with_base_url("http://127.0.0.1:9");
    let client = ChannelCatalogClient::new(config).unwrap();

    let err = client.list_playlists().await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
    assert_eq!(err.to_string(), "HTTP transport error");

    // Rendered the way the CLI reports failures
    let shown = format!(
        "{:#}",
        anyhow::Error::new(err).context("could not load playlists")
    );
    assert!(!shown.contains(api_key), "key leaked: {}", shown);
    assert!(!shown.contains("key="));
    assert_eq!(shown.matches("error sending request").count(), 1);
}

#[tokio::test]
async fn test_playlist_id_forwarded_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", " PL1 "))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [playlist_item("item-a", 0, "vidA")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items = client.list_playlist_items(" PL1 ").await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].playlist_id, " PL1 ");
}
