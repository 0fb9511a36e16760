//! Unit tests for backend creation

use em_shared::BackendConfig;

use crate::backend::{create_backend, mask_email};
use crate::InfrastructureError;

#[tokio::test]
async fn test_create_mock_backend() {
    let backend = create_backend(&BackendConfig::mock(), "buyer@example.com").unwrap();

    // Mock accepts its configured code
    assert!(backend.verify_code("123456").await.is_ok());
    assert!(backend.verify_code("000000").await.is_err());
}

#[test]
fn test_create_http_backend() {
    let config = BackendConfig::new("https://auth.example.com", "anon-key");
    assert!(create_backend(&config, "buyer@example.com").is_ok());
}

#[test]
fn test_http_backend_without_url_is_an_error() {
    let config = BackendConfig::default();
    let result = create_backend(&config, "buyer@example.com");
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_mask_email() {
    assert_eq!(mask_email("buyer@example.com"), "b****@example.com");
    assert_eq!(mask_email("a@example.com"), "a@example.com");
    assert_eq!(mask_email("@example.com"), "@example.com");
    assert_eq!(mask_email("nodomain"), "********");
}
