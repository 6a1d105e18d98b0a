//! Mock server tests for the XRPC client.
//!
//! These tests use wiremock to stand in for a feed server and check the
//! requests the client sends and how it maps responses.

use scrollfeed_core::error::Error;
use scrollfeed_core::{CommentsQuery, FeedApi, FeedUrl, Limit, PostId, PostsQuery};
use scrollfeed_xrpc::XrpcFeed;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_feed(server: &MockServer) -> XrpcFeed {
    let url = FeedUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    XrpcFeed::new(url).unwrap()
}

fn post_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Post {id}"),
        "content": "body",
        "createdAt": "2024-05-01T12:00:00Z",
        "author": { "id": 1, "name": "Ada" },
        "commentCount": 0
    })
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_get_posts_sends_limit_and_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/xrpc/feed.getPosts"))
        .and(query_param("limit", "2"))
        .and(query_param("cursor", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [post_json(8), post_json(7)],
            "nextCursor": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let feed = mock_feed(&server);
    let cursor = "9".parse().unwrap();
    let query = PostsQuery::first(Limit::new(2).unwrap()).after(Some(cursor));
    let page = feed.get_posts(query).await.unwrap();

    let ids: Vec<i64> = page.items.iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![8, 7]);
    assert_eq!(page.next_cursor.unwrap().to_string(), "7");
}

#[tokio::test]
async fn test_get_posts_without_next_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/xrpc/feed.getPosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let page = mock_feed(&server)
        .get_posts(PostsQuery::default())
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert!(!page.has_more());
}

#[tokio::test]
async fn test_get_comments_sends_post_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/xrpc/feed.getComments"))
        .and(query_param("postId", "3"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": 4, "postId": 3, "content": "older", "createdAt": "2024-05-01T12:00:00Z" },
                { "id": 5, "postId": 3, "content": "newer", "createdAt": "2024-05-01T12:01:00Z" }
            ],
            "previousCursor": 4
        })))
        .mount(&server)
        .await;

    let page = mock_feed(&server)
        .get_comments(CommentsQuery::latest(PostId::new(3), Limit::DEFAULT))
        .await
        .unwrap();
    assert_eq!(page.items[0].content, "older");
    assert_eq!(page.previous_cursor.unwrap().to_string(), "4");
}

// ============================================================================
// Procedures and errors
// ============================================================================

#[tokio::test]
async fn test_add_comment_posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/xrpc/feed.addComment"))
        .and(body_json(json!({ "postId": 3, "content": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "postId": 3, "content": "hello", "createdAt": "2024-05-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let comment = mock_feed(&server)
        .add_comment(PostId::new(3), "hello")
        .await
        .unwrap();
    assert_eq!(comment.id.get(), 11);
}

#[tokio::test]
async fn test_invalid_argument_maps_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/xrpc/feed.getPosts"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "InvalidArgument",
            "message": "limit 500 is outside 1..=100"
        })))
        .mount(&server)
        .await;

    let err = mock_feed(&server)
        .get_posts(PostsQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(err.to_string().contains("limit 500"));
}

#[tokio::test]
async fn test_write_failed_maps_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/xrpc/feed.addComment"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "WriteFailed",
            "message": "failed to add comment, please try again later"
        })))
        .mount(&server)
        .await;

    let err = mock_feed(&server)
        .add_comment(PostId::new(1), "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::WriteFailed { .. }));
}

#[tokio::test]
async fn test_unstructured_error_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/xrpc/feed.getPosts"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = mock_feed(&server)
        .get_posts(PostsQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Protocol(ref e) if e.status == 502));
}
