//! Shared utilities and common types for the ElectroMart client
//!
//! This crate provides common functionality used across all client modules:
//! - Configuration types (environment, backend, verification flow, logging)
//! - Language selection for user-facing text
//! - Validation helpers (email address, verification code)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackendConfig, BackendProvider, Environment, LogFormat, LoggingConfig,
    VerificationConfig,
};
pub use types::Language;
pub use utils::validation;
