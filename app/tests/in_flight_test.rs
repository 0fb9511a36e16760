//! Screen behaviour while a backend call is outstanding

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use em_app::screen::{run_screen, ExitReason};
use em_core::domain::value_objects::Route;
use em_core::errors::BackendFailure;
use em_core::services::analytics::{AnalyticsService, AnalyticsServiceConfig};
use em_core::services::verification::{VerificationBackend, VerificationFlowController};
use em_infra::{ChannelNavigator, ConsoleNotifier, MockAuthBackend};
use em_shared::{Language, VerificationConfig};

/// Backend whose calls never return
struct HangingBackend;

#[async_trait]
impl VerificationBackend for HangingBackend {
    async fn verify_code(&self, _code: &str) -> Result<(), BackendFailure> {
        std::future::pending().await
    }

    async fn resend_code(&self) -> Result<(), BackendFailure> {
        std::future::pending().await
    }
}

type Controller<B> = VerificationFlowController<B, ChannelNavigator, ConsoleNotifier, ()>;

fn start<B: VerificationBackend + 'static>(
    backend: B,
    config: VerificationConfig,
) -> (Controller<B>, mpsc::UnboundedReceiver<Route>) {
    let (navigator, routes) = ChannelNavigator::channel();
    let controller = VerificationFlowController::start(
        config,
        Arc::new(backend),
        Arc::new(navigator),
        Arc::new(ConsoleNotifier::with_writer(Box::new(std::io::sink()))),
        AnalyticsService::new(Arc::new(()), AnalyticsServiceConfig::default()),
    )
    .unwrap();
    (controller, routes)
}

#[tokio::test]
async fn test_quit_leaves_while_verify_is_outstanding() {
    let (controller, routes) = start(HangingBackend, VerificationConfig::default());
    let mut out = Vec::new();

    let reason = timeout(
        Duration::from_secs(3),
        run_screen(
            &controller,
            routes,
            "123456\nquit\n".as_bytes(),
            &mut out,
            Language::English,
        ),
    )
    .await
    .expect("screen should close without waiting for the backend")
    .unwrap();

    assert_eq!(reason, ExitReason::Quit);
    assert!(!controller.is_alive());
    assert!(!controller.snapshot().submitting);
}

#[tokio::test]
async fn test_quit_leaves_while_resend_is_outstanding() {
    let config = VerificationConfig {
        resend_cooldown_seconds: 0,
        ..VerificationConfig::default()
    };
    let (controller, routes) = start(HangingBackend, config);
    let mut out = Vec::new();

    let reason = timeout(
        Duration::from_secs(3),
        run_screen(
            &controller,
            routes,
            "resend\nq\n".as_bytes(),
            &mut out,
            Language::English,
        ),
    )
    .await
    .expect("screen should close without waiting for the backend")
    .unwrap();

    assert_eq!(reason, ExitReason::Quit);
    assert!(!controller.is_alive());
}

#[tokio::test]
async fn test_lines_typed_during_a_call_run_afterwards() {
    let backend = MockAuthBackend::new("123456", "buyer@example.com")
        .with_latency(Duration::from_millis(50));
    let (controller, routes) = start(backend, VerificationConfig::default());
    let mut out = Vec::new();

    let reason = run_screen(
        &controller,
        routes,
        "000000\n123456\n".as_bytes(),
        &mut out,
        Language::English,
    )
    .await
    .unwrap();

    assert_eq!(reason, ExitReason::Navigated(Route::Login));
    assert!(!controller.is_alive());
}
