//! Shared setup for router level tests

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use flowsense::config::{Config, ObservabilityConfig, ServerConfig, WebhookConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const API_KEY: &str = "qv_test_key";

pub fn create_test_config(webhook_url: impl Into<String>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        webhook: WebhookConfig {
            url: webhook_url.into(),
            api_key: API_KEY.to_string(),
            timeout_secs: 5,
            ..Default::default()
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn create_test_app(webhook_url: impl Into<String>) -> Router {
    flowsense::create_app(create_test_config(webhook_url)).expect("Failed to build app")
}

/// Sends a raw JSON body to `/api/contact` and returns status, headers and
/// decoded body.
pub async fn post_contact(app: Router, body: impl Into<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, headers, json)
}

/// Address nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}/webhook")
}
