//! Error types for the email verification flow
//!
//! Display strings are bilingual (`English | Chinese`); use
//! [`localized_message`] to pick the half matching the user's language.

use em_shared::Language;
use thiserror::Error;

/// Errors raised by the verification flow controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Enter the {expected}-digit code (got {actual} characters) | 请输入 {expected} 位验证码（当前 {actual} 位）")]
    InvalidCodeLength { expected: usize, actual: usize },

    #[error("Verification already in progress | 正在验证中")]
    SubmitInProgress,

    #[error("Verification screen has been closed | 验证页面已关闭")]
    SessionDisposed,

    #[error("{message}")]
    VerifyRejected { message: String },

    #[error("{message}")]
    ResendFailed { message: String },
}

impl VerificationError {
    /// Stable error code for logs and analytics
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::InvalidCodeLength { .. } => "INVALID_CODE_LENGTH",
            VerificationError::SubmitInProgress => "SUBMIT_IN_PROGRESS",
            VerificationError::SessionDisposed => "SESSION_DISPOSED",
            VerificationError::VerifyRejected { .. } => "VERIFY_REJECTED",
            VerificationError::ResendFailed { .. } => "RESEND_FAILED",
        }
    }

    /// Whether the user can act on this error without leaving the screen
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, VerificationError::SessionDisposed)
    }

    /// Message in the requested language
    pub fn localized(&self, language: Language) -> String {
        localized_message(&self.to_string(), language).to_string()
    }
}

/// Failure reported by the auth backend for a verify or resend call
///
/// `message` is shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendFailure {
    pub message: String,
    /// HTTP status when the failure came from a response
    pub status: Option<u16>,
}

impl BackendFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Helper function to extract English message from bilingual error
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message)
}

/// Helper function to extract Chinese message from bilingual error
pub fn extract_chinese_message(message: &str) -> &str {
    message.split(" | ").nth(1).unwrap_or(message)
}

/// Pick the half of a bilingual message for `language`
///
/// Single-language messages (backend text) come back unchanged.
pub fn localized_message(message: &str, language: Language) -> &str {
    match language {
        Language::English => extract_english_message(message),
        Language::Chinese => extract_chinese_message(message),
    }
}
