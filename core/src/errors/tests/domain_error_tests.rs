//! Unit tests for domain error types

use em_shared::Language;

use crate::errors::{
    extract_chinese_message, extract_english_message, localized_message, BackendFailure,
    DomainError, VerificationError,
};

#[test]
fn test_invalid_code_length_message() {
    let error = VerificationError::InvalidCodeLength {
        expected: 6,
        actual: 5,
    };
    let message = error.to_string();
    assert!(message.contains("6-digit code"));
    assert!(message.contains("got 5 characters"));
    assert!(message.contains("请输入 6 位验证码"));
}

#[test]
fn test_localized_picks_language_half() {
    let error = VerificationError::SubmitInProgress;
    assert_eq!(error.localized(Language::English), "Verification already in progress");
    assert_eq!(error.localized(Language::Chinese), "正在验证中");
}

#[test]
fn test_backend_messages_pass_through_verbatim() {
    let error = VerificationError::VerifyRejected {
        message: "Token has expired or is invalid".to_string(),
    };
    assert_eq!(error.localized(Language::English), "Token has expired or is invalid");
    assert_eq!(error.localized(Language::Chinese), "Token has expired or is invalid");
}

#[test]
fn test_error_codes() {
    assert_eq!(VerificationError::SessionDisposed.code(), "SESSION_DISPOSED");
    assert_eq!(
        VerificationError::ResendFailed {
            message: "x".to_string()
        }
        .code(),
        "RESEND_FAILED"
    );
}

#[test]
fn test_recoverability() {
    let validation: DomainError = VerificationError::InvalidCodeLength {
        expected: 6,
        actual: 0,
    }
    .into();
    assert!(validation.is_recoverable());

    let disposed: DomainError = VerificationError::SessionDisposed.into();
    assert!(!disposed.is_recoverable());

    let internal = DomainError::Internal {
        message: "boom".to_string(),
    };
    assert!(internal.is_recoverable());
}

#[test]
fn test_domain_error_is_transparent() {
    let error: DomainError = VerificationError::SubmitInProgress.into();
    assert_eq!(
        error.to_string(),
        VerificationError::SubmitInProgress.to_string()
    );
}

#[test]
fn test_backend_failure() {
    let failure = BackendFailure::new("Email rate limit exceeded").with_status(429);
    assert_eq!(failure.to_string(), "Email rate limit exceeded");
    assert_eq!(failure.status, Some(429));
}

#[test]
fn test_message_extraction() {
    let bilingual = "Token expired | 令牌已过期";
    assert_eq!(extract_english_message(bilingual), "Token expired");
    assert_eq!(extract_chinese_message(bilingual), "令牌已过期");
    assert_eq!(localized_message("plain", Language::Chinese), "plain");
}
