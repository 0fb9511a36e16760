//! # ElectroMart Core
//!
//! Client-side domain layer for the email verification screen.
//! This crate contains the verification session state machine, the flow
//! controller that drives it, analytics events, and error types shared with
//! the infrastructure adapters.

pub mod domain;
pub mod errors;
pub mod i18n;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
