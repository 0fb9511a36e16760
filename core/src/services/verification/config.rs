//! Configuration for the verification flow controller

use crate::errors::{DomainError, DomainResult};

pub use em_shared::VerificationConfig;

/// Reject configurations the controller cannot run with
pub(crate) fn validate(config: &VerificationConfig) -> DomainResult<()> {
    if config.code_length == 0 {
        return Err(DomainError::Validation {
            message: "verification code length must be greater than zero".to_string(),
        });
    }
    Ok(())
}
