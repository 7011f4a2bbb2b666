//! HTTP-level tests for the proxy client endpoints.
//!
//! Requests go straight into the router via `tower::ServiceExt::oneshot`,
//! backed by the in-memory store.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_bytes, body_json, client_json, delete, get, patch_json, post_json, send_raw};

/// Create a client through the API and return its id.
async fn create_client(app: axum::Router, title: &str, os: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/proxy-clients",
        client_json(title, os, "https://example.com/download"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_full_record() {
    let (app, repo) = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/proxy-clients",
        client_json("Hiddify", "android", "https://example.com/hiddify.apk"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["title"], "Hiddify");
    assert_eq!(json["os"], "android");
    assert_eq!(json["download_link"], "https://example.com/hiddify.apk");
    let created_at = json["created_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
    assert_eq!(json["created_at"], json["updated_at"]);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn create_with_unsupported_os_returns_400() {
    let (app, repo) = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/proxy-clients",
        client_json("X", "bsd", "https://example.com/x"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"][0]["field"], "os");
    assert!(repo.is_empty());
}

#[tokio::test]
async fn create_without_download_link_returns_400() {
    let (app, repo) = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/proxy-clients",
        serde_json::json!({ "title": "X", "os": "linux" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.iter().all(|f| *f == "download_link"));
    assert!(repo.is_empty());
}

#[tokio::test]
async fn create_with_non_url_link_returns_400() {
    let (app, repo) = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/proxy-clients",
        client_json("X", "linux", "not-a-url"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"][0]["field"], "download_link");
    assert_eq!(json["details"][0]["code"], "url");
    assert!(repo.is_empty());
}

#[tokio::test]
async fn create_with_blank_title_returns_400() {
    let (app, repo) = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/proxy-clients",
        client_json("   ", "linux", "https://example.com/x"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert!(repo.is_empty());
}

#[tokio::test]
async fn create_with_malformed_json_returns_400() {
    let (app, repo) = common::build_test_app();
    let response = send_raw(app, Method::POST, "/api/v1/proxy-clients", "{\"title\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    assert!(repo.is_empty());
}

// ---------------------------------------------------------------------------
// List & filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_on_empty_store_returns_404() {
    let (app, _) = common::build_test_app();
    let response = get(app, "/api/v1/proxy-clients").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn list_without_filters_returns_everything() {
    let (app, _) = common::build_test_app();
    create_client(app.clone(), "A", "linux").await;
    create_client(app.clone(), "B", "ios").await;

    let response = get(app, "/api/v1/proxy-clients").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_filters_by_os() {
    let (app, _) = common::build_test_app();
    create_client(app.clone(), "A", "linux").await;
    create_client(app.clone(), "B", "ios").await;
    create_client(app.clone(), "C", "linux").await;

    let response = get(app, "/api/v1/proxy-clients?os=linux").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let clients = json.as_array().unwrap();
    assert_eq!(clients.len(), 2);
    assert!(clients.iter().all(|c| c["os"] == "linux"));
}

#[tokio::test]
async fn list_filters_combine_with_and() {
    let (app, _) = common::build_test_app();
    create_client(app.clone(), "A", "linux").await;
    create_client(app.clone(), "B", "linux").await;

    let response = get(app.clone(), "/api/v1/proxy-clients?os=linux&title=B").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "B");

    let response = get(app, "/api/v1/proxy-clients?os=ios&title=B").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_id_as_string() {
    let (app, _) = common::build_test_app();
    let id = create_client(app.clone(), "A", "linux").await;
    create_client(app.clone(), "B", "linux").await;

    let response = get(app.clone(), &format!("/api/v1/proxy-clients?id={id}")).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], id);

    // A non-numeric id simply matches nothing.
    let response = get(app, "/api/v1/proxy-clients?id=abc").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_filter_values_are_ignored() {
    let (app, _) = common::build_test_app();
    create_client(app.clone(), "A", "linux").await;

    let response = get(app, "/api/v1/proxy-clients?id=&title=&os=").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn repeated_filter_key_uses_first_value() {
    let (app, _) = common::build_test_app();
    create_client(app.clone(), "A", "linux").await;

    let response = get(app.clone(), "/api/v1/proxy-clients?os=linux&os=linux").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = get(app.clone(), "/api/v1/proxy-clients?os=linux&os=ios").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/v1/proxy-clients?os=ios&os=linux").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unknown_query_keys_are_ignored() {
    let (app, _) = common::build_test_app();
    create_client(app.clone(), "A", "linux").await;

    let response = get(app, "/api/v1/proxy-clients?os=linux&page=2&sort=title").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Get by id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_by_id_round_trips_created_record() {
    let (app, _) = common::build_test_app();
    let created = body_json(
        post_json(
            app.clone(),
            "/api/v1/proxy-clients",
            client_json("Happ", "macos", "https://example.com/happ.dmg"),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = get(app, &format!("/api/v1/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let (app, _) = common::build_test_app();
    let response = get(app, "/api/v1/clients/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "ProxyClient with id 999 not found");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_replaces_fields_and_returns_success() {
    let (app, _) = common::build_test_app();
    let id = create_client(app.clone(), "Old", "linux").await;
    let before = body_json(get(app.clone(), &format!("/api/v1/clients/{id}")).await).await;

    let response = patch_json(
        app.clone(),
        &format!("/api/v1/clients/{id}"),
        client_json("New", "windows", "https://example.com/new.exe"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "success": true }));

    let after = body_json(get(app, &format!("/api/v1/clients/{id}")).await).await;
    assert_eq!(after["title"], "New");
    assert_eq!(after["os"], "windows");
    assert_eq!(after["download_link"], "https://example.com/new.exe");
    assert_eq!(after["created_at"], before["created_at"]);
    assert_ne!(after["updated_at"], before["updated_at"]);
}

#[tokio::test]
async fn update_with_non_numeric_id_returns_400_and_leaves_store_untouched() {
    let (app, repo) = common::build_test_app();
    let id = create_client(app.clone(), "Keep", "linux").await;

    let response = patch_json(
        app.clone(),
        "/api/v1/clients/abc",
        client_json("Changed", "ios", "https://example.com/c"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    assert_eq!(repo.len(), 1);
    let stored = body_json(get(app, &format!("/api/v1/clients/{id}")).await).await;
    assert_eq!(stored["title"], "Keep");
}

#[tokio::test]
async fn update_with_invalid_body_returns_400() {
    let (app, _) = common::build_test_app();
    let id = create_client(app.clone(), "Keep", "linux").await;

    let response = patch_json(
        app.clone(),
        &format!("/api/v1/clients/{id}"),
        client_json("Keep", "bsd", "https://example.com/c"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stored = body_json(get(app, &format!("/api/v1/clients/{id}")).await).await;
    assert_eq!(stored["os"], "linux");
}

#[tokio::test]
async fn update_unknown_id_returns_404() {
    let (app, _) = common::build_test_app();
    let response = patch_json(
        app,
        "/api/v1/clients/404",
        client_json("X", "linux", "https://example.com/x"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_zero_id_returns_400() {
    let (app, _) = common::build_test_app();
    let response = patch_json(
        app,
        "/api/v1/clients/0",
        client_json("X", "linux", "https://example.com/x"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_returns_204_with_empty_body_then_404() {
    let (app, repo) = common::build_test_app();
    let id = create_client(app.clone(), "Gone", "linux").await;

    let response = delete(app.clone(), &format!("/api/v1/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());
    assert!(repo.is_empty());

    let response = delete(app.clone(), &format!("/api/v1/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &format!("/api/v1/clients/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_with_non_numeric_id_returns_400() {
    let (app, _) = common::build_test_app();
    let response = delete(app, "/api/v1/clients/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_returns_sanitized_500() {
    let (app, repo) = common::build_test_app();
    repo.set_healthy(false);

    for response in [
        get(app.clone(), "/api/v1/proxy-clients").await,
        get(app.clone(), "/api/v1/clients/1").await,
        post_json(
            app.clone(),
            "/api/v1/proxy-clients",
            client_json("X", "linux", "https://example.com/x"),
        )
        .await,
        delete(app, "/api/v1/clients/1").await,
    ] {
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}
