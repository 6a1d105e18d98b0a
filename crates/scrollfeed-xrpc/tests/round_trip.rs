//! End-to-end tests: the XRPC client against the real router.

use std::sync::Arc;

use scrollfeed_core::error::Error;
use scrollfeed_core::{
    CommentWindow, Draft, FeedApi, FeedService, FeedStore, FeedUrl, Limit, LoadOutcome,
    MemoryStore, PostFeed, PostId, PostsQuery,
};
use scrollfeed_xrpc::{XrpcFeed, serve};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct TestServer {
    url: FeedUrl,
    _shutdown: oneshot::Sender<()>,
}

async fn start(store: MemoryStore) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = oneshot::channel::<()>();

    let api: Arc<dyn FeedApi> = Arc::new(FeedService::new(store));
    tokio::spawn(async move {
        serve(listener, api, async {
            let _ = rx.await;
        })
        .await
        .unwrap();
    });

    TestServer {
        url: FeedUrl::new(format!("http://127.0.0.1:{port}")).unwrap(),
        _shutdown: tx,
    }
}

#[tokio::test]
async fn test_one_extra_post_over_http() {
    let server = start(MemoryStore::with_posts(11)).await;
    let client = XrpcFeed::new(server.url.clone()).unwrap();

    let first = client.get_posts(PostsQuery::default()).await.unwrap();
    let ids: Vec<i64> = first.items.iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, (2..=11).rev().collect::<Vec<_>>());
    assert_eq!(first.next_cursor.unwrap().to_string(), "2");

    let second = client
        .get_posts(PostsQuery::default().after(first.next_cursor))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].id.get(), 1);
    assert!(second.next_cursor.is_none());
}

#[tokio::test]
async fn test_out_of_range_limit_is_rejected_not_clamped() {
    let server = start(MemoryStore::with_posts(3)).await;

    let response = reqwest::get(format!("{}?limit=500", server.url.xrpc_url("feed.getPosts")))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "InvalidArgument");

    let response = reqwest::get(format!("{}?cursor=abc", server.url.xrpc_url("feed.getPosts")))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_blank_comment_rejected_by_server() {
    let server = start(MemoryStore::with_posts(1)).await;
    let client = XrpcFeed::new(server.url.clone()).unwrap();

    let err = client.add_comment(PostId::new(1), "   ").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[tokio::test]
async fn test_comment_on_missing_post_is_write_failed() {
    let server = start(MemoryStore::with_posts(1)).await;
    let client = XrpcFeed::new(server.url.clone()).unwrap();

    let err = client.add_comment(PostId::new(99), "hello").await.unwrap_err();
    assert!(matches!(err, Error::WriteFailed { .. }));
}

#[tokio::test]
async fn test_feed_scrolls_to_the_end_over_http() {
    let server = start(MemoryStore::with_posts(25)).await;
    let feed = PostFeed::new(XrpcFeed::new(server.url.clone()).unwrap(), Limit::DEFAULT);

    while feed.has_more() {
        feed.on_proximity(true).await.unwrap();
    }

    let ids: Vec<i64> = feed.flatten().iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, (1..=25).rev().collect::<Vec<_>>());
    assert_eq!(feed.page_count(), 3);
}

#[tokio::test]
async fn test_comment_window_reconciles_over_http() {
    let store = MemoryStore::with_posts(1);
    for i in 1..=5 {
        store
            .create_comment(PostId::new(1), &format!("comment {i}"))
            .await
            .unwrap();
    }
    let server = start(store).await;
    let window = CommentWindow::new(
        XrpcFeed::new(server.url.clone()).unwrap(),
        PostId::new(1),
        Limit::DEFAULT,
    );
    assert_eq!(window.load_older().await.unwrap(), LoadOutcome::Loaded(5));

    let mut draft = Draft::from("sixth");
    let comment = window.add_comment(&mut draft).await.unwrap();

    let ids: Vec<i64> = window.comments().iter().map(|c| c.id.get()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(comment.id.get(), 6);
    assert!(draft.as_str().is_empty());
}
