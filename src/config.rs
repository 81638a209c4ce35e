use std::{env, fmt, time::Duration};

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use flowsense_contact::{DEFAULT_API_KEY_HEADER, RelayOptions};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Lead webhook the contact form is relayed to. Both the url and the key are
/// deployment secrets and have no default.
#[derive(Deserialize, Clone)]
pub struct WebhookConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_key_header: default_api_key_header(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("url", &self.url)
            .field("api_key", &"[redacted]")
            .field("api_key_header", &self.api_key_header)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WebhookConfig {
    pub fn relay_options(&self) -> RelayOptions {
        RelayOptions {
            url: self.url.to_owned(),
            api_key_header: self.api_key_header.to_owned(),
            api_key: self.api_key.to_owned(),
            timeout: Some(Duration::from_secs(self.timeout_secs)),
        }
    }
}

fn default_api_key_header() -> String {
    DEFAULT_API_KEY_HEADER.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FLOWSENSE__WEBHOOK__URL, CONTACT_WEBHOOK_URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Missing file is fine, everything can come from the environment
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FLOWSENSE")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(url) = env::var("CONTACT_WEBHOOK_URL") {
            builder = builder.set_override("webhook.url", url)?;
        }
        if let Ok(api_key) = env::var("CONTACT_WEBHOOK_API_KEY") {
            builder = builder.set_override("webhook.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.webhook.url.is_empty() {
            return Err("Webhook url is not configured".to_string());
        }
        match url::Url::parse(&self.webhook.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(format!("Webhook url scheme {} is not supported", url.scheme()));
            }
            Err(e) => return Err(format!("Webhook url is invalid: {e}")),
        }
        if self.webhook.api_key.is_empty() {
            return Err("Webhook api key is not configured".to_string());
        }
        if self.webhook.timeout_secs == 0 {
            return Err("Webhook timeout must be at least 1 second".to_string());
        }
        Ok(())
    }
}
