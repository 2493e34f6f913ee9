#![allow(dead_code)]

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::sync::Once;
use std::time::Duration;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const RSS_THREE_ITEMS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example News</title>
    <link>https://news.example.com/</link>
    <description>Test feed</description>
    <item><title>First</title><link>https://news.example.com/1</link><guid>1</guid></item>
    <item><title>Second</title><link>https://news.example.com/2</link><guid>2</guid></item>
    <item><title>Third</title><link>https://news.example.com/3</link><guid>3</guid></item>
  </channel>
</rss>"#;

pub const RSS_NO_ITEMS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Quiet Blog</title>
    <link>https://quiet.example.com/</link>
    <description>Nothing here yet</description>
  </channel>
</rss>"#;

pub const ATOM_ONE_ENTRY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Dev Log</title>
  <id>urn:example:devlog</id>
  <updated>2024-01-01T00:00:00Z</updated>
  <entry>
    <title>Release</title>
    <id>urn:example:devlog:1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <link href="https://dev.example.com/release"/>
  </entry>
</feed>"#;

pub const NOT_A_FEED: &str = "this is definitely not a syndication feed";

/// A well-formed feed padded past two megabytes.
pub fn oversized_feed() -> String {
    let padding = "x".repeat(2 * 1024 * 1024);
    RSS_THREE_ITEMS.replace(
        "<description>Test feed</description>",
        &format!("<description>{padding}</description>"),
    )
}

fn xml(body: &'static str) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/rss+xml")], body)
}

pub struct TestServer {
    pub base: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serves canned feeds and error responses on an ephemeral local port.
pub async fn spawn_feed_server() -> TestServer {
    let app = Router::new()
        .route("/valid.xml", get(|| async { xml(RSS_THREE_ITEMS) }))
        .route("/atom.xml", get(|| async { xml(ATOM_ONE_ENTRY) }))
        .route("/empty.xml", get(|| async { xml(RSS_NO_ITEMS) }))
        .route("/malformed.xml", get(|| async { xml(NOT_A_FEED) }))
        .route(
            "/huge.xml",
            get(|| async { ([(header::CONTENT_TYPE, "application/rss+xml")], oversized_feed()) }),
        )
        .route("/missing.xml", get(|| async { (StatusCode::NOT_FOUND, "not found") }))
        .route(
            "/broken.xml",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, RSS_THREE_ITEMS) }),
        )
        .route(
            "/slow.xml",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                xml(RSS_THREE_ITEMS)
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener.local_addr().expect("local addr should exist");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });

    TestServer {
        base: format!("http://{address}"),
        handle,
    }
}

/// A URL on a local port nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("listener should bind");
    let address = listener.local_addr().expect("local addr should exist");
    drop(listener);
    format!("http://{address}/feed.xml")
}
