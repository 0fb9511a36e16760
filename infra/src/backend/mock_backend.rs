//! Mock Auth Backend Implementation
//!
//! In-process backend for local development. The "email" with the code is
//! written to the log instead of being sent.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

use em_core::errors::BackendFailure;
use em_core::services::verification::VerificationBackend;

use super::mask_email;

/// Message returned for a wrong code, matching the hosted backend
pub const INVALID_CODE_MESSAGE: &str = "Token has expired or is invalid";

/// Development backend accepting a single expected code
pub struct MockAuthBackend {
    expected_code: String,
    email: String,
    latency: Option<Duration>,
    fail_resend: AtomicBool,
    verify_calls: AtomicUsize,
    resend_calls: AtomicUsize,
}

impl MockAuthBackend {
    pub fn new(expected_code: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            expected_code: expected_code.into(),
            email: email.into(),
            latency: None,
            fail_resend: AtomicBool::new(false),
            verify_calls: AtomicUsize::new(0),
            resend_calls: AtomicUsize::new(0),
        }
    }

    /// Delay every call, to make the in-flight state visible
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make subsequent resend calls fail
    pub fn set_fail_resend(&self, fail: bool) {
        self.fail_resend.store(fail, Ordering::SeqCst);
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn resend_calls(&self) -> usize {
        self.resend_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl VerificationBackend for MockAuthBackend {
    async fn verify_code(&self, code: &str) -> Result<(), BackendFailure> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if code == self.expected_code {
            info!(email = %mask_email(&self.email), "[MOCK AUTH] Code accepted");
            Ok(())
        } else {
            info!(email = %mask_email(&self.email), "[MOCK AUTH] Code rejected");
            Err(BackendFailure::new(INVALID_CODE_MESSAGE).with_status(403))
        }
    }

    async fn resend_code(&self) -> Result<(), BackendFailure> {
        self.resend_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.fail_resend.load(Ordering::SeqCst) {
            return Err(BackendFailure::new("Email rate limit exceeded").with_status(429));
        }

        info!(
            email = %mask_email(&self.email),
            code = %self.expected_code,
            "[MOCK AUTH] Verification email sent"
        );
        Ok(())
    }
}
