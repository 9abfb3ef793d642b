//! Shared utilities for gregging-server integration tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use gregging_common::config::TomlConfig;
use gregging_common::db::{init_memory_database, seed};
use gregging_server::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot`

/// Password of every user created by [`register`]
pub const TEST_PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
}

impl TestApp {
    /// Fresh in-memory database, default configuration
    pub async fn new() -> Self {
        Self::with_config(TomlConfig::default()).await
    }

    /// In-memory database with the demo seed applied
    pub async fn seeded() -> Self {
        let app = Self::new().await;
        seed::seed_demo_data(&app.db).await.unwrap();
        app
    }

    pub async fn with_config(config: TomlConfig) -> Self {
        let db = init_memory_database().await.unwrap();
        let state = AppState::new(db.clone(), config).unwrap();
        Self {
            router: build_router(state),
            db,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request("GET", uri, None, cookie)).await
    }

    pub async fn post(&self, uri: &str, body: Value, cookie: Option<&str>) -> Response<Body> {
        self.send(request("POST", uri, Some(body), cookie)).await
    }

    pub async fn patch(&self, uri: &str, body: Value, cookie: Option<&str>) -> Response<Body> {
        self.send(request("PATCH", uri, Some(body), cookie)).await
    }

    /// Register `username` and return its session cookie
    pub async fn register(&self, username: &str) -> String {
        let response = self
            .post(
                "/api/register",
                json!({
                    "username": username,
                    "password": TEST_PASSWORD,
                    "email": format!("{}@example.com", username),
                }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        session_cookie(&response).expect("register should set a session cookie")
    }

    /// Log in and return the session cookie
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post(
                "/api/login",
                json!({ "username": username, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response).expect("login should set a session cookie")
    }
}

/// Build a request, with an optional JSON body and `Cookie` header
pub fn request(method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// `name=value` part of the response's `Set-Cookie` header
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.trim().to_string())
}

/// Full `Set-Cookie` header value
pub fn set_cookie_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Read and parse a JSON response body
pub async fn extract_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Assert the standard error envelope and return its code
pub async fn error_code(response: Response<Body>) -> String {
    let body = extract_json(response).await;
    assert!(body["error"]["message"].is_string(), "missing error message: {}", body);
    body["error"]["code"].as_str().unwrap_or_default().to_string()
}
