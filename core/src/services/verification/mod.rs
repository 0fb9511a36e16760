//! Email verification flow for the "verify your email" screen
//!
//! This module provides:
//! - The flow controller owning one verification session
//! - The resend countdown task and its teardown
//! - Collaborator traits for the auth backend, router and toast surface

mod config;
mod controller;
mod liveness;
mod traits;
mod types;


pub use config::VerificationConfig;
pub use controller::VerificationFlowController;
pub use liveness::LivenessToken;
pub use traits::{Navigator, Notifier, VerificationBackend};
pub use types::{ResendOutcome, SubmitOutcome};
