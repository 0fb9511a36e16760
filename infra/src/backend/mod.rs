//! Auth Backend Module
//!
//! Implementations of [`VerificationBackend`] for the verification screen.
//!
//! ## Features
//!
//! - **HTTP Backend**: hosted auth REST API with retry on transient failures
//! - **Mock Backend**: in-process backend for local development
//! - **Security**: email masking in logs

use std::sync::Arc;

use em_core::services::verification::VerificationBackend;
use em_shared::{BackendConfig, BackendProvider};

use crate::InfrastructureError;

pub mod http_auth;
pub mod mock_backend;

pub use http_auth::HttpAuthBackend;
pub use mock_backend::MockAuthBackend;

#[cfg(test)]
mod tests;

/// Create an auth backend for `email` based on configuration
///
/// A misconfigured HTTP backend is an error; there is no fallback to the mock.
///
/// # Arguments
///
/// * `config` - Backend provider and connection settings
/// * `email` - Address of the account being verified
pub fn create_backend(
    config: &BackendConfig,
    email: &str,
) -> Result<Arc<dyn VerificationBackend>, InfrastructureError> {
    match config.provider {
        BackendProvider::Http => {
            let backend = HttpAuthBackend::new(config.clone(), email)?;
            Ok(Arc::new(backend))
        }
        BackendProvider::Mock => {
            tracing::warn!(
                email = %mask_email(email),
                "Using mock auth backend; codes are not checked by a server"
            );
            Ok(Arc::new(MockAuthBackend::new(config.mock_code.clone(), email)))
        }
    }
}

/// Mask an email address for logging, keeping the first character and domain
///
/// # Examples
///
/// ```
/// use em_infra::backend::mask_email;
/// assert_eq!(mask_email("buyer@example.com"), "b****@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let mut chars = local.chars();
            match chars.next() {
                Some(first) => format!("{}{}@{}", first, "*".repeat(chars.count()), domain),
                None => format!("@{}", domain),
            }
        }
        None => "*".repeat(email.chars().count()),
    }
}
