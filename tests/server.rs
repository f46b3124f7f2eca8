//! Integration tests for the HTTP server: viewer assets, the rewrite
//! endpoint, health, and graceful shutdown.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use docgate::config::model::Config;
use docgate::config::ConfigVersion;
use docgate::health::HealthResponse;
use docgate::rewrite::handler::RewriteErrorBody;
use docgate::rewrite::RequestDescriptor;
use docgate::server::{self, AppState, LoadedConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn start_test_server() -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let state = Arc::new(AppState::new(LoadedConfig::new(
        Config::default(),
        ConfigVersion::Hash("test-hash-0123456789".into()),
        "test",
    )));

    let router = server::build_router(state, Path::new("demos/docs"), 65_536);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

async fn post_rewrite(
    client: &reqwest::Client,
    addr: SocketAddr,
    host: Option<&str>,
    body: serde_json::Value,
) -> reqwest::Response {
    let mut req = client.post(format!("http://{addr}/rewrite")).json(&body);
    if let Some(host) = host {
        req = req.header("host", host);
    }
    req.send().await.unwrap()
}

#[tokio::test]
async fn versioned_request_is_redirected_to_page_host() {
    let (addr, shutdown) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = post_rewrite(
        &client,
        addr,
        Some("docs.local:8082"),
        serde_json::json!({ "url": "http://docs.local:8082/api/v1/orders?x=1", "method": "GET" }),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let rewritten: RequestDescriptor = resp.json().await.unwrap();
    assert_eq!(rewritten.url, "http://docs.local:8080/api/v1/orders?x=1");
    assert_eq!(rewritten.extra["method"], "GET");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn forwarded_host_is_preferred() {
    let (addr, shutdown) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/rewrite"))
        .header("x-forwarded-host", "docs.example.com")
        .json(&serde_json::json!({ "url": "/v1/orders" }))
        .send()
        .await
        .unwrap();
    let rewritten: RequestDescriptor = resp.json().await.unwrap();
    assert_eq!(rewritten.url, "http://docs.example.com:8080/v1/orders");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unversioned_request_passes_through() {
    let (addr, shutdown) = start_test_server().await;
    let client = reqwest::Client::new();

    let body = serde_json::json!({ "url": "./orders.swagger.json", "method": "GET" });
    let resp = post_rewrite(&client, addr, None, body.clone()).await;
    assert_eq!(resp.status(), 200);
    let echoed: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(echoed, body);

    let _ = shutdown.send(());
}

/// Send a raw HTTP/1.0 `POST /rewrite` without a Host header.
async fn post_rewrite_without_host(addr: SocketAddr, body: &str) -> (String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "POST /rewrite HTTP/1.0\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();
    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status_line = head.lines().next().unwrap().to_string();
    (status_line, body.to_string())
}

#[tokio::test]
async fn unversioned_request_needs_no_host() {
    let (addr, shutdown) = start_test_server().await;

    let (status, body) =
        post_rewrite_without_host(addr, r#"{"url":"./orders.swagger.json","method":"GET"}"#).await;
    assert!(status.contains(" 200 "), "{status}");
    let echoed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        echoed,
        serde_json::json!({ "url": "./orders.swagger.json", "method": "GET" })
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn redirect_without_host_is_bad_request() {
    let (addr, shutdown) = start_test_server().await;

    let (status, body) = post_rewrite_without_host(addr, r#"{"url":"/v1/orders"}"#).await;
    assert!(status.contains(" 400 "), "{status}");
    let error: RewriteErrorBody = serde_json::from_str(&body).unwrap();
    assert!(error.error.contains("Host"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn malformed_url_is_rejected() {
    let (addr, shutdown) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = post_rewrite(
        &client,
        addr,
        None,
        serde_json::json!({ "url": "http://[broken/v1/orders" }),
    )
    .await;
    assert_eq!(resp.status(), 422);
    let body: RewriteErrorBody = resp.json().await.unwrap();
    assert!(body.error.contains("malformed request URL"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn missing_url_field_is_client_error() {
    let (addr, shutdown) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = post_rewrite(&client, addr, None, serde_json::json!({ "method": "GET" })).await;
    assert!(resp.status().is_client_error());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn health_counts_rewrites() {
    let (addr, shutdown) = start_test_server().await;
    let client = reqwest::Client::new();

    post_rewrite(&client, addr, None, serde_json::json!({ "url": "/v1/a" })).await;
    post_rewrite(&client, addr, None, serde_json::json!({ "url": "/a" })).await;
    post_rewrite(&client, addr, None, serde_json::json!({ "url": "http://[x/v1/" })).await;

    let health: HealthResponse = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.config.source, "test");
    assert_eq!(health.config.version, "test-has");
    assert_eq!(health.config.documents, 2);
    assert_eq!(health.stats.requests_redirected, 1);
    assert_eq!(health.stats.requests_passed_through, 1);
    assert_eq!(health.stats.requests_rejected, 1);
    assert_eq!(health.stats.config_reloads, 0);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn index_and_initializer_are_served() {
    let (addr, shutdown) = start_test_server().await;

    let index = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(index.status(), 200);
    let html = index.text().await.unwrap();
    assert!(html.contains("./swagger-initializer.js"));

    let script = reqwest::get(format!("http://{addr}/swagger-initializer.js"))
        .await
        .unwrap();
    assert_eq!(script.status(), 200);
    assert!(script
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/javascript"));
    let js = script.text().await.unwrap();
    assert!(js.contains("requestInterceptor: rewriteRequest"));
    assert!(js.contains("Orders API"));
    assert!(js.contains("Admin API"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn api_documents_are_served_from_docs_dir() {
    let (addr, shutdown) = start_test_server().await;

    let resp = reqwest::get(format!("http://{addr}/orders.swagger.json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let doc: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(doc["info"]["title"], "Orders API");

    let missing = reqwest::get(format!("http://{addr}/nonexistent.json"))
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn graceful_shutdown_works() {
    let (addr, shutdown) = start_test_server().await;

    let url = format!("http://{addr}/health");
    assert!(reqwest::get(&url).await.is_ok());

    let _ = shutdown.send(());

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let result = reqwest::get(&url).await;
    assert!(result.is_err());
}
