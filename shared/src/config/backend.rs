//! Auth backend configuration module

use serde::{Deserialize, Serialize};

/// Which backend implementation serves verify/resend calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// Hosted auth REST API
    Http,
    /// In-process backend for local development
    Mock,
}

/// Hosted auth backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend implementation to use
    #[serde(default = "default_provider")]
    pub provider: BackendProvider,

    /// Project base URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub base_url: String,

    /// Public (anon) API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum attempts for retryable failures (transport errors, 5xx)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubled per attempt
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Code accepted by the mock backend
    #[serde(default = "default_mock_code")]
    pub mock_code: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: String::new(),
            api_key: String::new(),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            mock_code: default_mock_code(),
        }
    }
}

impl BackendConfig {
    /// Create an HTTP backend configuration
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Configuration for the in-process mock backend
    pub fn mock() -> Self {
        Self {
            provider: BackendProvider::Mock,
            ..Default::default()
        }
    }

    /// Base URL without a trailing slash
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_provider() -> BackendProvider {
    BackendProvider::Http
}

fn default_request_timeout() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    500
}

fn default_mock_code() -> String {
    String::from("123456")
}
