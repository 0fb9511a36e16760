//! # Infrastructure Layer
//!
//! Concrete adapters for the collaborators of the email verification
//! controller in `em_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Backend**: hosted auth REST client (reqwest) and an in-process mock
//! - **Notify**: console toast surface
//! - **Navigation**: router that forwards routes over a channel
//! - **Analytics**: sink that emits events as structured tracing records

// Re-export core types for convenience
pub use em_core::errors::*;

/// Backend module - verify/resend implementations
pub mod backend;

/// Notification module - toast surfaces
pub mod notify;

/// Navigation module - routers for the screen loop
pub mod navigation;

/// Analytics module - event sinks
pub mod analytics;

pub use analytics::TracingAnalyticsSink;
pub use backend::{create_backend, HttpAuthBackend, MockAuthBackend};
pub use navigation::ChannelNavigator;
pub use notify::ConsoleNotifier;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction or request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Auth backend reported a failure
    #[error("Auth backend error: {0}")]
    Backend(#[from] BackendFailure),
}
