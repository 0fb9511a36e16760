//! Traits for the verification screen's external collaborators

use async_trait::async_trait;

use crate::domain::value_objects::{Notification, Route};
use crate::errors::BackendFailure;

/// Hosted auth backend operations for one verification session
///
/// Implementations are bound to the account being verified (its email
/// address), so neither call takes it as input.
#[async_trait]
pub trait VerificationBackend: Send + Sync {
    /// Confirm the account with the code the user entered
    async fn verify_code(&self, code: &str) -> Result<(), BackendFailure>;
    /// Ask the backend to email a fresh code
    async fn resend_code(&self) -> Result<(), BackendFailure>;
}

/// Router the screen uses to leave the verification flow
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Toast/notification display
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
