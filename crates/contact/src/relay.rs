use std::{fmt, time::Duration};

use bytes::Bytes;
use reqwest::{
    StatusCode,
    header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use serde_json::Value;

use crate::Result;

pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Where the relay delivers submissions.
#[derive(Clone)]
pub struct RelayOptions {
    pub url: String,
    pub api_key_header: String,
    pub api_key: String,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for RelayOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayOptions")
            .field("url", &self.url)
            .field("api_key_header", &self.api_key_header)
            .field("api_key", &"[redacted]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Result of a delivery that reached the webhook.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// Webhook answered 2xx. Carries its JSON body, or `{}` when the body was
    /// empty or not JSON.
    Accepted(Value),
    /// Webhook answered with a non-success status.
    Rejected { status: StatusCode, details: String },
}

/// Forwards contact submissions to the lead webhook.
///
/// Stateless apart from the pooled HTTP client: each call makes exactly one
/// upstream request, without retry or deduplication.
#[derive(Clone)]
pub struct Relay {
    client: reqwest::Client,
    url: url::Url,
    api_key_header: HeaderName,
    api_key: HeaderValue,
}

impl Relay {
    pub fn new(options: RelayOptions) -> Result<Self> {
        let url = match url::Url::parse(&options.url) {
            Ok(url) => url,
            Err(e) => crate::bail!("invalid webhook url: {e}"),
        };

        let api_key_header = match HeaderName::from_bytes(options.api_key_header.as_bytes()) {
            Ok(name) => name,
            Err(e) => crate::bail!("invalid api key header name: {e}"),
        };

        let mut api_key = match HeaderValue::from_str(&options.api_key) {
            Ok(value) => value,
            Err(e) => crate::bail!("invalid api key: {e}"),
        };
        api_key.set_sensitive(true);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url,
            api_key_header,
            api_key,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Sends `body` to the webhook byte for byte.
    ///
    /// The body only has to parse as JSON, its fields are not inspected.
    /// Transport failures come back as `Err`, upstream refusals as
    /// [`Delivery::Rejected`].
    #[tracing::instrument(skip_all, fields(webhook = %self.url.host_str().unwrap_or_default()))]
    pub async fn forward(&self, body: Bytes) -> Result<Delivery> {
        serde_json::from_slice::<serde::de::IgnoredAny>(&body)?;

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(self.api_key_header.clone(), self.api_key.clone())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await?;
            tracing::warn!(%status, "webhook rejected submission");

            return Ok(Delivery::Rejected { status, details });
        }

        let payload = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).ok(),
            Err(e) => {
                tracing::warn!("failed to read webhook response: {e}");
                None
            }
        };

        Ok(Delivery::Accepted(
            payload.unwrap_or_else(|| Value::Object(Default::default())),
        ))
    }
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("url", &self.url.as_str())
            .field("api_key_header", &self.api_key_header)
            .finish_non_exhaustive()
    }
}
