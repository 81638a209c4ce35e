use async_trait::async_trait;
use serde_json::Value;

use crate::{ContactSubmission, Result};

/// Route served by the submission proxy.
pub const CONTACT_PATH: &str = "/api/contact";

/// What the proxy answered to a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: u16,
    pub body: Value,
}

impl ProxyReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries a submission from the form to the proxy.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, submission: &ContactSubmission) -> Result<ProxyReply>;
}

/// Posts submissions as JSON to `<base>/api/contact`. No timeout is applied,
/// the form waits for the proxy to answer or the connection to fail.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: url::Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = match url::Url::parse(base_url) {
            Ok(base) => base,
            Err(e) => crate::bail!("invalid site url {base_url}: {e}"),
        };
        let endpoint = match base.join(CONTACT_PATH) {
            Ok(endpoint) => endpoint,
            Err(e) => crate::bail!("invalid site url {base_url}: {e}"),
        };

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, submission: &ContactSubmission) -> Result<ProxyReply> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::Object(Default::default()));

        Ok(ProxyReply { status, body })
    }
}
