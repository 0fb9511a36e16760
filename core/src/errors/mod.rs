//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types and utilities
pub use types::{
    extract_chinese_message, extract_english_message, localized_message, BackendFailure,
    VerificationError,
};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Whether the user can recover from this error on the same screen
    pub fn is_recoverable(&self) -> bool {
        match self {
            DomainError::Validation { .. } | DomainError::Internal { .. } => true,
            DomainError::Verification(err) => err.is_recoverable(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
