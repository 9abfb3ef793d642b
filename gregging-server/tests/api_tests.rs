//! Health, lesson catalog, fallback routing and static frontend

mod helpers;

use axum::http::{header, StatusCode};
use gregging_common::config::TomlConfig;
use helpers::{error_code, extract_json, request, TestApp};
use http_body_util::BodyExt;
use tempfile::TempDir;

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "gregging-server");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_topic_list_omits_content() {
    let app = TestApp::new().await;

    let response = app.get("/api/topics", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let topics = extract_json(response).await;
    let topics = topics.as_array().unwrap();
    assert_eq!(topics.len(), gregging_common::topics::all().len());
    assert!(topics.iter().all(|t| t.get("content").is_none()));
    assert!(topics.iter().any(|t| t["slug"] == "arrays"));
}

#[tokio::test]
async fn test_topic_list_by_category() {
    let app = TestApp::new().await;

    let response = app.get("/api/topics?category=algorithms", None).await;
    let topics = extract_json(response).await;
    let topics = topics.as_array().unwrap();
    assert!(!topics.is_empty());
    assert!(topics.iter().all(|t| t["category"] == "algorithms"));

    let response = app.get("/api/topics?category=cooking", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_topic_detail() {
    let app = TestApp::new().await;

    let response = app.get("/api/topics/graphs", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let topic = extract_json(response).await;
    assert_eq!(topic["title"], "Graphs");
    assert!(topic["content"].as_str().unwrap().contains("<h2>"));
    assert!(topic["exampleCode"]["python"].is_string());

    let response = app.get("/api/topics/no-such-topic", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let response = app.get("/api/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_code(response).await, "NOT_FOUND");
}

#[tokio::test]
async fn test_static_frontend_with_spa_fallback() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>gregging</html>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('hi')").unwrap();

    let app = TestApp::with_config(TomlConfig {
        static_dir: Some(dir.path().to_path_buf()),
        ..TomlConfig::default()
    })
    .await;

    let response = app.get("/app.js", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Client-side routes get index.html
    let response = app.get("/topics/arrays", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<html>gregging</html>");

    // API routes still win
    let response = app.get("/api/topics/arrays", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_configured_origin_with_credentials() {
    let app = TestApp::new().await;

    let mut req = request("GET", "/api/topics", None, None);
    req.headers_mut()
        .insert(header::ORIGIN, "http://localhost:3000".parse().unwrap());
    let response = app.send(req).await;

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    let mut req = request("GET", "/api/topics", None, None);
    req.headers_mut()
        .insert(header::ORIGIN, "http://evil.example".parse().unwrap());
    let response = app.send(req).await;
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
