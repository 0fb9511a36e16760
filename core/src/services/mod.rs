//! Client services containing the verification flow and its side channels.

pub mod analytics;
pub mod verification;

// Re-export commonly used types
pub use analytics::{AnalyticsService, AnalyticsServiceConfig, AnalyticsSink};
pub use verification::{
    LivenessToken, Navigator, Notifier, ResendOutcome, SubmitOutcome, VerificationBackend,
    VerificationConfig, VerificationFlowController,
};
