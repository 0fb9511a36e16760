//! End-to-end verification flow against a mock hosted auth server
//!
//! Wires the core controller to the real HTTP backend, channel navigator and
//! tracing analytics sink.

use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use em_core::domain::value_objects::{Notification, NotificationLevel, Route};
use em_core::services::analytics::{AnalyticsService, AnalyticsServiceConfig};
use em_core::services::verification::{
    Notifier, ResendOutcome, SubmitOutcome, VerificationConfig, VerificationFlowController,
};
use em_infra::{create_backend, ChannelNavigator, TracingAnalyticsSink};
use em_shared::BackendConfig;

#[derive(Default)]
struct CollectingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

#[tokio::test]
async fn test_wrong_code_then_right_code_reaches_login() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/verify"))
        .respond_with(move |req: &wiremock::Request| -> ResponseTemplate {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap_or_default();
            if body["token"] == "424242" {
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "t" }))
            } else {
                ResponseTemplate::new(403)
                    .set_body_json(json!({ "msg": "Token has expired or is invalid" }))
            }
        })
        .expect(2)
        .mount(&server)
        .await;

    let backend = create_backend(
        &BackendConfig::new(server.uri(), "anon-key"),
        "buyer@example.com",
    )
    .unwrap();
    let (navigator, mut routes) = ChannelNavigator::channel();
    let notifier = Arc::new(CollectingNotifier::default());
    let analytics = AnalyticsService::new(
        Arc::new(TracingAnalyticsSink::new()),
        AnalyticsServiceConfig::default(),
    );

    let controller = VerificationFlowController::start(
        VerificationConfig::default(),
        backend,
        Arc::new(navigator),
        notifier.clone(),
        analytics,
    )
    .unwrap();

    controller.set_code("000000");
    assert_eq!(
        controller.submit().await.unwrap(),
        SubmitOutcome::Rejected {
            message: "Token has expired or is invalid".to_string()
        }
    );
    assert!(routes.try_recv().is_err());

    controller.set_code("424242");
    assert_eq!(controller.submit().await.unwrap(), SubmitOutcome::Verified);
    assert_eq!(routes.recv().await, Some(Route::Login));
    assert!(!controller.is_alive());

    let levels: Vec<NotificationLevel> = notifier
        .seen
        .lock()
        .unwrap()
        .iter()
        .map(|n| n.level)
        .collect();
    assert_eq!(levels, vec![NotificationLevel::Error, NotificationLevel::Success]);
}

#[tokio::test]
async fn test_resend_rate_limited_by_server() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/resend"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({ "msg": "For security purposes, you can only request this once every 60 seconds" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = create_backend(
        &BackendConfig::new(server.uri(), "anon-key"),
        "buyer@example.com",
    )
    .unwrap();
    let (navigator, _routes) = ChannelNavigator::channel();
    let notifier = Arc::new(CollectingNotifier::default());
    let config = VerificationConfig {
        resend_cooldown_seconds: 0,
        ..VerificationConfig::default()
    };

    let controller = VerificationFlowController::start(
        config,
        backend,
        Arc::new(navigator),
        notifier.clone(),
        AnalyticsService::disabled(),
    )
    .unwrap();

    let outcome = controller.resend().await.unwrap();
    assert!(matches!(outcome, ResendOutcome::Failed { ref message } if message.starts_with("For security purposes")));

    let seen = notifier.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, NotificationLevel::Error);
}
