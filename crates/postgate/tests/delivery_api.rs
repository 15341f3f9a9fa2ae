//! End-to-end queries against a mock delivery API.

use assert_json_diff::assert_json_include;
use chrono::{TimeZone, Utc};
use postgate::sitemap::to_xml;
use postgate::{
    ChangeFrequency, ClientConfig, ConfigInputs, DeliveryClient, Error, PostQueries,
    SitemapBuilder, StaticRoute,
};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENTRIES_PATH: &str = "/spaces/space1/environments/master/entries";

fn config(server: &MockServer, use_preview: bool) -> ClientConfig {
    ClientConfig::resolve(ConfigInputs {
        space_id: "space1".to_string(),
        delivery_token: Some("prod-token".to_string()),
        preview_token: Some("draft-token".to_string()),
        use_preview,
        environment: None,
    })
    .unwrap()
    .with_host(&server.uri())
    .unwrap()
}

fn queries(server: &MockServer) -> PostQueries<DeliveryClient> {
    PostQueries::new(DeliveryClient::new(config(server, false)))
}

fn post(id: &str, slug: &str, date: &str) -> Value {
    json!({
        "metadata": {"tags": [{"sys": {"type": "Link", "linkType": "Tag", "id": "rust"}}]},
        "sys": {"id": id, "type": "Entry"},
        "fields": {
            "header": format!("Title of {slug}"),
            "slug": slug,
            "date": date,
            "shortDescription": "A short one.",
            "featuredImage": {"sys": {"type": "Link", "linkType": "Asset", "id": "img-1"}},
            "content": {"nodeType": "document", "data": {}, "content": []},
            "tags": ["rust"],
            "writer": ["Ada"]
        }
    })
}

fn collection(total: u64, skip: u64, limit: u64, items: Vec<Value>) -> Value {
    json!({
        "sys": {"type": "Array"},
        "total": total,
        "skip": skip,
        "limit": limit,
        "items": items,
        "includes": {
            "Asset": [{
                "sys": {"id": "img-1", "type": "Asset"},
                "fields": {
                    "title": "Cover",
                    "file": {
                        "url": "//images.example.net/cover.png",
                        "details": {"image": {"width": 1200, "height": 630}}
                    }
                }
            }]
        }
    })
}

#[tokio::test]
async fn test_fetch_page_sends_window_and_returns_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param("content_type", "blogPost"))
        .and(query_param("order", "-fields.date"))
        .and(query_param("limit", "6"))
        .and(query_param("skip", "6"))
        .and(header("authorization", "Bearer prod-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(
            14,
            6,
            6,
            vec![
                post("e7", "seventh", "2024-02-07T10:00+00:00"),
                post("e8", "eighth", "2024-02-06T10:00+00:00"),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = queries(&server).fetch_page(6, 2).await.unwrap();
    assert_eq!(page.total, 14);
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].slug(), "seventh");
    assert!(page.records[0].published_date() >= page.records[1].published_date());

    let image = page.records[0].featured_image().unwrap();
    assert_eq!(image.url, "https://images.example.net/cover.png");
    assert_eq!(image.width, Some(1200));
    assert_eq!(image.height, Some(630));
}

#[tokio::test]
async fn test_page_past_end_keeps_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param("skip", "600"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(14, 600, 6, vec![])))
        .mount(&server)
        .await;

    let page = queries(&server).fetch_page(6, 101).await.unwrap();
    assert!(page.records.is_empty());
    assert_eq!(page.total, 14);
}

#[tokio::test]
async fn test_fetch_list_has_no_skip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param("limit", "3"))
        .and(query_param_is_missing("skip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(
            2,
            0,
            3,
            vec![
                post("e2", "second", "2024-02-02"),
                post("e1", "first", "2024-01-01"),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let records = queries(&server).fetch_list(3).await.unwrap();
    let slugs: Vec<&str> = records.iter().map(|r| r.slug()).collect();
    assert_eq!(slugs, vec!["second", "first"]);
}

#[tokio::test]
async fn test_fetch_by_slug_found_and_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param("fields.slug", "existing-slug"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(
            1,
            0,
            1,
            vec![post("e1", "existing-slug", "2024-01-01")],
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param("fields.slug", "no-such-slug"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(0, 0, 1, vec![])))
        .mount(&server)
        .await;

    let posts = queries(&server);
    let found = posts.fetch_by_slug("existing-slug").await.unwrap().unwrap();
    assert_eq!(found.slug(), "existing-slug");
    assert_eq!(found.id(), "e1");
    assert!(posts.fetch_by_slug("no-such-slug").await.unwrap().is_none());
}

#[tokio::test]
async fn test_preview_uses_preview_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(header("authorization", "Bearer draft-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(0, 0, 5, vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let preview = config(&server, true);
    assert!(preview.is_preview());
    let posts = PostQueries::new(DeliveryClient::new(preview));
    assert!(posts.fetch_list(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_error_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "sys": {"type": "Error", "id": "AccessTokenInvalid"},
            "message": "The access token you sent could not be found or is invalid.",
            "requestId": "req-42"
        })))
        .mount(&server)
        .await;

    match queries(&server).fetch_list(5).await.unwrap_err() {
        Error::Api {
            status,
            code,
            request_id,
            ..
        } => {
            assert_eq!(status, 401);
            assert_eq!(code, "AccessTokenInvalid");
            assert_eq!(request_id.as_deref(), Some("req-42"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"items\": \"nope\"}"))
        .mount(&server)
        .await;

    let err = queries(&server).fetch_page(6, 1).await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert!(err.is_backend());
}

#[tokio::test]
async fn test_record_json_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(
            1,
            0,
            1,
            vec![post("e1", "shape", "2024-01-01")],
        )))
        .mount(&server)
        .await;

    let record = queries(&server).fetch_by_slug("shape").await.unwrap().unwrap();
    assert_json_include!(
        actual: serde_json::to_value(&record).unwrap(),
        expected: json!({
            "id": "e1",
            "slug": "shape",
            "title": "Title of shape",
            "publishedDate": "2024-01-01T00:00:00Z",
            "shortDescription": "A short one.",
            "tags": ["rust"],
            "writer": ["Ada"],
            "metadata": {"tags": [{"sys": {"id": "rust", "type": "Link", "linkType": "Tag"}}]}
        })
    );
}

#[tokio::test]
async fn test_sitemap_from_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENTRIES_PATH))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(
            3,
            0,
            1000,
            vec![
                post("e3", "c", "2024-03-03"),
                post("e2", "b", "2024-02-02"),
                post("e1", "a", "2024-01-01"),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let builder = SitemapBuilder::new("https://example.com").static_routes([
        StaticRoute::new("/", ChangeFrequency::Daily, 1.0),
        StaticRoute::new("/blog", ChangeFrequency::Daily, 0.9),
        StaticRoute::new("/about", ChangeFrequency::Monthly, 0.7),
        StaticRoute::new("/projects", ChangeFrequency::Monthly, 0.6),
        StaticRoute::new("/contact", ChangeFrequency::Yearly, 0.3),
    ]);

    let entries = builder.build_from(&queries(&server), now).await.unwrap();
    assert_eq!(entries.len(), 8);
    assert!(entries[..5].iter().all(|e| e.last_modified == now));
    assert!(entries[5..]
        .iter()
        .all(|e| e.priority == 0.8 && e.change_frequency == ChangeFrequency::Weekly));
    assert_eq!(entries[5].url, "https://example.com/blog/c");

    let xml = to_xml(&entries).unwrap();
    assert_eq!(xml.matches("<url>").count(), 8);
    assert!(xml.contains("<lastmod>2024-03-03T00:00:00Z</lastmod>"));
}
