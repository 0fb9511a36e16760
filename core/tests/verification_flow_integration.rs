//! Integration test for a full visit to the verification screen

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use em_core::domain::value_objects::{Notification, NotificationLevel, Route};
    use em_core::errors::BackendFailure;
    use em_core::services::analytics::AnalyticsService;
    use em_core::services::verification::{
        Navigator, Notifier, ResendOutcome, SubmitOutcome, VerificationBackend,
        VerificationConfig, VerificationFlowController,
    };

    // Backend that accepts whichever code it sent last
    struct MailboxBackend {
        sent: Mutex<Vec<String>>,
    }

    impl MailboxBackend {
        fn new() -> Self {
            Self {
                sent: Mutex::new(vec!["111111".to_string()]),
            }
        }

        fn latest(&self) -> String {
            self.sent.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl VerificationBackend for MailboxBackend {
        async fn verify_code(&self, code: &str) -> Result<(), BackendFailure> {
            if code == self.latest() {
                Ok(())
            } else {
                Err(BackendFailure::new("Token has expired or is invalid").with_status(403))
            }
        }

        async fn resend_code(&self) -> Result<(), BackendFailure> {
            let mut sent = self.sent.lock().unwrap();
            let next = format!("{:06}", sent.len() * 222_222);
            sent.push(next);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Screen {
        routes: Mutex<Vec<Route>>,
        toasts: Mutex<Vec<Notification>>,
    }

    impl Navigator for Screen {
        fn navigate(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    impl Notifier for Screen {
        fn notify(&self, notification: Notification) {
            self.toasts.lock().unwrap().push(notification);
        }
    }

    async fn wait(seconds: u64) {
        for _ in 0..seconds {
            tokio::time::advance(Duration::from_secs(1)).await;
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_requests_new_code_and_verifies_with_it() {
        let backend = Arc::new(MailboxBackend::new());
        let screen = Arc::new(Screen::default());
        let controller = VerificationFlowController::start(
            VerificationConfig::default(),
            backend.clone(),
            screen.clone(),
            screen.clone(),
            AnalyticsService::disabled(),
        )
        .unwrap();

        // Too early to resend
        wait(30).await;
        assert!(matches!(
            controller.resend().await.unwrap(),
            ResendOutcome::NotReady {
                seconds_remaining: 30
            }
        ));

        wait(30).await;
        assert_eq!(controller.resend().await.unwrap(), ResendOutcome::Dispatched);
        assert_eq!(controller.snapshot().seconds_until_resend_allowed, 60);

        // The old code no longer works
        controller.set_code("111111");
        assert!(matches!(
            controller.submit().await.unwrap(),
            SubmitOutcome::Rejected { .. }
        ));
        assert!(screen.routes.lock().unwrap().is_empty());

        controller.set_code(backend.latest());
        assert_eq!(controller.submit().await.unwrap(), SubmitOutcome::Verified);
        assert_eq!(*screen.routes.lock().unwrap(), vec![Route::Login]);

        let levels: Vec<NotificationLevel> = screen
            .toasts
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.level)
            .collect();
        assert_eq!(
            levels,
            vec![
                NotificationLevel::Info,
                NotificationLevel::Error,
                NotificationLevel::Success
            ]
        );
    }
}
