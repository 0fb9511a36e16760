//! Hosted Auth Backend Implementation
//!
//! Verify and resend calls against a GoTrue-style REST API
//! (`/auth/v1/verify`, `/auth/v1/resend`).
//!
//! ## Features
//!
//! - Public API key sent as `apikey` and bearer token
//! - Automatic retry with exponential backoff for transport errors and 5xx
//! - Client errors (4xx) returned at once with the backend's own message
//! - Security: email masking in logs

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use em_core::errors::BackendFailure;
use em_core::services::verification::VerificationBackend;
use em_shared::BackendConfig;

use super::mask_email;
use crate::InfrastructureError;

/// Fields checked, in order, for a human-readable error message
const ERROR_MESSAGE_FIELDS: [&str; 4] = ["msg", "error_description", "message", "error"];

/// One failed attempt and whether another may follow
struct AttemptError {
    failure: BackendFailure,
    retryable: bool,
}

/// Auth backend bound to one account's email address
pub struct HttpAuthBackend {
    client: reqwest::Client,
    config: BackendConfig,
    email: String,
}

impl HttpAuthBackend {
    /// Create a backend for `email`
    ///
    /// Fails when the base URL is missing or the HTTP client cannot be built.
    pub fn new(config: BackendConfig, email: impl Into<String>) -> Result<Self, InfrastructureError> {
        if config.trimmed_base_url().trim().is_empty() {
            return Err(InfrastructureError::Config(
                "backend.base_url must be set for the http provider".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let email = email.into();

        info!(
            base_url = %config.trimmed_base_url(),
            email = %mask_email(&email),
            "Hosted auth backend initialized"
        );

        Ok(Self {
            client,
            config,
            email,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.trimmed_base_url(), path)
    }

    /// POST `body` to `path`, retrying transient failures
    async fn post_with_retry(&self, path: &str, body: &Value) -> Result<(), BackendFailure> {
        let url = self.endpoint(path);
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                endpoint = path,
                attempt = attempts,
                max_attempts = max_attempts,
                "Calling auth backend"
            );

            match self.post_once(&url, body).await {
                Ok(()) => return Ok(()),
                Err(AttemptError { failure, retryable }) => {
                    if !retryable || attempts >= max_attempts {
                        return Err(failure);
                    }
                    warn!(
                        endpoint = path,
                        attempt = attempts,
                        status = ?failure.status,
                        error = %failure,
                        "Auth backend call failed, retrying after {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    async fn post_once(&self, url: &str, body: &Value) -> Result<(), AttemptError> {
        let response = self
            .client
            .post(url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AttemptError {
                failure: BackendFailure::new(format!("Network error: {}", e)),
                retryable: true,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // An unreadable body still leaves the status to report
        let text = response.text().await.unwrap_or_default();
        let message =
            extract_error_message(&text).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        Err(AttemptError {
            failure: BackendFailure::new(message).with_status(status.as_u16()),
            retryable: status.is_server_error(),
        })
    }
}

#[async_trait]
impl VerificationBackend for HttpAuthBackend {
    async fn verify_code(&self, code: &str) -> Result<(), BackendFailure> {
        info!(email = %mask_email(&self.email), "Verifying signup code");
        let body = json!({
            "type": "signup",
            "email": self.email,
            "token": code,
        });
        self.post_with_retry("verify", &body).await
    }

    async fn resend_code(&self) -> Result<(), BackendFailure> {
        info!(email = %mask_email(&self.email), "Requesting new signup code");
        let body = json!({
            "type": "signup",
            "email": self.email,
        });
        self.post_with_retry("resend", &body).await
    }
}

/// Pull the user-facing message out of an error response body
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ERROR_MESSAGE_FIELDS.iter().find_map(|field| {
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
