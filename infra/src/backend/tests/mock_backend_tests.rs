//! Unit tests for the mock auth backend

use em_core::services::verification::VerificationBackend;
use tokio_test::{assert_err, assert_ok};

use crate::backend::mock_backend::{MockAuthBackend, INVALID_CODE_MESSAGE};

#[tokio::test]
async fn test_accepts_expected_code() {
    let backend = MockAuthBackend::new("123456", "buyer@example.com");

    assert_ok!(backend.verify_code("123456").await);
    assert_eq!(backend.verify_calls(), 1);
}

#[tokio::test]
async fn test_rejects_other_codes() {
    let backend = MockAuthBackend::new("123456", "buyer@example.com");

    let failure = backend.verify_code("654321").await.unwrap_err();
    assert_eq!(failure.message, INVALID_CODE_MESSAGE);
    assert_eq!(failure.status, Some(403));
}

#[tokio::test]
async fn test_resend_can_be_made_to_fail() {
    let backend = MockAuthBackend::new("123456", "buyer@example.com");
    assert_ok!(backend.resend_code().await);

    backend.set_fail_resend(true);
    let failure = assert_err!(backend.resend_code().await);
    assert_eq!(failure.status, Some(429));
    assert_eq!(backend.resend_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_latency_is_simulated() {
    let backend = MockAuthBackend::new("123456", "buyer@example.com")
        .with_latency(std::time::Duration::from_secs(2));

    let started = tokio::time::Instant::now();
    backend.verify_code("123456").await.unwrap();
    assert!(started.elapsed() >= std::time::Duration::from_secs(2));
}

#[test]
fn test_usable_without_async_test_harness() {
    let backend = MockAuthBackend::new("123456", "buyer@example.com");

    let result = tokio_test::block_on(backend.verify_code("123456"));
    assert_ok!(result);
}
