//! Terminal client for the email verification screen
//!
//! Wires the core flow controller to the infrastructure adapters chosen by
//! configuration and runs it against line-based input.

pub mod screen;
pub mod telemetry;

use std::sync::Arc;
use tokio::sync::mpsc;

use em_core::domain::value_objects::Route;
use em_core::services::analytics::{AnalyticsService, AnalyticsServiceConfig};
use em_core::services::verification::{VerificationBackend, VerificationFlowController};
use em_infra::{create_backend, ChannelNavigator, ConsoleNotifier, TracingAnalyticsSink};
use em_shared::validation;
use em_shared::AppConfig;

/// Controller type used by the terminal screen
pub type ScreenController = VerificationFlowController<
    dyn VerificationBackend,
    ChannelNavigator,
    ConsoleNotifier,
    TracingAnalyticsSink,
>;

/// Start a verification session for `email`
///
/// Returns the controller and the receiver for its navigation requests.
/// Must be called inside a tokio runtime.
pub fn start_session(
    config: &AppConfig,
    email: &str,
) -> anyhow::Result<(ScreenController, mpsc::UnboundedReceiver<Route>)> {
    if !validation::is_valid_email(email) {
        anyhow::bail!("invalid email address: {}", email);
    }
    let email = validation::normalize_email(email);

    let backend = create_backend(&config.backend, &email)?;
    let (navigator, routes) = ChannelNavigator::channel();
    let analytics = AnalyticsService::new(
        Arc::new(TracingAnalyticsSink::new()),
        AnalyticsServiceConfig::default(),
    );

    let controller = VerificationFlowController::start(
        config.verification.clone(),
        backend,
        Arc::new(navigator),
        Arc::new(ConsoleNotifier::stdout()),
        analytics,
    )?;

    Ok((controller, routes))
}
