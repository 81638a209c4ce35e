//! End to end tests of the contact relay route

mod helpers;

use axum::http::{StatusCode, header};
use flowsense_contact::{ContactForm, Field, FormState, ProxyReply, Transport};
use helpers::{API_KEY, closed_port_url, create_test_app, post_contact};
use serde_json::json;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header as header_matcher, method, path},
};

const JANE: &str = r#"{"firstName":"Jane","lastName":"","email":"jane@x.com","phone":"","company":"","companySize":"","title":"","message":"","pageUrl":"https://flowsense.ai/"}"#;

#[tokio::test]
async fn test_relays_submission_and_returns_upstream_json() -> anyhow::Result<()> {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(header_matcher("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&webhook)
        .await;

    let app = create_test_app(format!("{}/webhook", webhook.uri()));
    let (status, headers, body) = post_contact(app, JANE).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
    assert!(
        headers[header::CACHE_CONTROL]
            .to_str()?
            .contains("no-store")
    );

    let requests = webhook.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, JANE.as_bytes());

    Ok(())
}

#[tokio::test]
async fn test_upstream_error_is_mirrored() -> anyhow::Result<()> {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&webhook)
        .await;

    let app = create_test_app(format!("{}/webhook", webhook.uri()));
    let (status, _, body) = post_contact(app, JANE).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Submission failed");
    assert!(body["details"].as_str().unwrap().contains("upstream down"));

    Ok(())
}

#[tokio::test]
async fn test_upstream_client_error_keeps_status() -> anyhow::Result<()> {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&webhook)
        .await;

    let app = create_test_app(format!("{}/webhook", webhook.uri()));
    let (status, _, body) = post_contact(app, JANE).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "error": "Submission failed", "details": "invalid api key" })
    );

    Ok(())
}

#[tokio::test]
async fn test_unreachable_webhook_returns_generic_error() -> anyhow::Result<()> {
    let app = create_test_app(closed_port_url());
    let (status, _, body) = post_contact(app, JANE).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));

    Ok(())
}

#[tokio::test]
async fn test_empty_upstream_body_is_empty_object() -> anyhow::Result<()> {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&webhook)
        .await;

    let app = create_test_app(format!("{}/webhook", webhook.uri()));
    let (status, _, body) = post_contact(app, JANE).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    Ok(())
}

#[tokio::test]
async fn test_malformed_request_is_not_forwarded() -> anyhow::Result<()> {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&webhook)
        .await;

    let app = create_test_app(format!("{}/webhook", webhook.uri()));
    let (status, _, body) = post_contact(app, "firstName=Jane").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));

    Ok(())
}

#[tokio::test]
async fn test_unregistered_upstream_status_is_mirrored() -> anyhow::Result<()> {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(599).set_body_string("proxy hiccup"))
        .mount(&webhook)
        .await;

    let app = create_test_app(format!("{}/webhook", webhook.uri()));
    let (status, _, body) = post_contact(app, JANE).await;

    assert_eq!(status.as_u16(), 599);
    assert_eq!(
        body,
        json!({ "error": "Submission failed", "details": "proxy hiccup" })
    );

    Ok(())
}

#[tokio::test]
async fn test_oversized_request_gets_json_error() -> anyhow::Result<()> {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&webhook)
        .await;

    let message = "x".repeat(3 * 1024 * 1024);
    let oversized = serde_json::to_vec(&json!({
        "firstName": "Jane",
        "email": "jane@x.com",
        "message": message,
    }))?;

    let app = create_test_app(format!("{}/webhook", webhook.uri()));
    let (status, headers, body) = post_contact(app, oversized).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body, json!({ "error": "Internal server error" }));

    Ok(())
}

/// Drives the form controller against the router in process.
struct RouterTransport(axum::Router);

#[async_trait::async_trait]
impl Transport for RouterTransport {
    async fn send(
        &self,
        submission: &flowsense_contact::ContactSubmission,
    ) -> flowsense_contact::Result<ProxyReply> {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri(flowsense_contact::CONTACT_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(submission)?))
            .map_err(|e| flowsense_contact::Error::Server(e.to_string()))?;

        let response = self
            .0
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| flowsense_contact::Error::Server(e.to_string()))?;
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| flowsense_contact::Error::Server(e.to_string()))?;

        Ok(ProxyReply {
            status,
            body: serde_json::from_slice(&bytes).unwrap_or(json!({})),
        })
    }
}

#[tokio::test]
async fn test_form_to_webhook_scenario() -> anyhow::Result<()> {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header_matcher("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&webhook)
        .await;

    let transport = RouterTransport(create_test_app(format!("{}/webhook", webhook.uri())));

    let mut form = ContactForm::new();
    form.open();
    form.edit(Field::FirstName, "Jane");
    form.edit(Field::Email, "jane@x.com");

    let state = form.submit(&transport, "https://flowsense.ai/").await?;
    assert!(matches!(state, FormState::Submitted { .. }));

    let requests = webhook.received_requests().await.unwrap();
    let forwarded: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(forwarded, serde_json::from_str::<serde_json::Value>(JANE)?);

    Ok(())
}

#[tokio::test]
async fn test_form_failure_when_webhook_down() -> anyhow::Result<()> {
    let transport = RouterTransport(create_test_app(closed_port_url()));

    let mut form = ContactForm::new();
    form.edit(Field::FirstName, "Jane");
    form.edit(Field::Email, "jane@x.com");

    form.submit(&transport, "https://flowsense.ai/").await?;
    assert_eq!(form.error(), Some(flowsense_contact::FAILURE_MESSAGE));
    assert_eq!(form.draft().unwrap().email, "jane@x.com");

    Ok(())
}
