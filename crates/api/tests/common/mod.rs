#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use proxyhub_api::config::{AppConfig, DatabaseConfig, LogConfig, LogFormat, ServerConfig};
use proxyhub_api::router::build_app_router;
use proxyhub_api::state::AppState;
use proxyhub_db::repositories::InMemoryProxyClientRepo;
use tower::ServiceExt;

/// Test configuration: loopback on an ephemeral port, short timeout.
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
        },
        log: LogConfig {
            filter: "debug".to_string(),
            format: LogFormat::Pretty,
        },
    }
}

/// Build the production router over an in-memory store.
///
/// The returned repo handle shares storage with the router, so tests can
/// seed it, inspect it, or flip it unhealthy.
pub fn build_test_app() -> (Router, InMemoryProxyClientRepo) {
    let repo = InMemoryProxyClientRepo::new();
    let state = AppState::new(test_config(), Arc::new(repo.clone()));
    (build_app_router(state), repo)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Send a raw, possibly malformed, body.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn client_json(title: &str, os: &str, link: &str) -> serde_json::Value {
    serde_json::json!({ "title": title, "os": os, "download_link": link })
}
