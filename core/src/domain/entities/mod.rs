//! Domain entities representing core client-side objects.

pub mod analytics;
pub mod verification_session;

// Re-export commonly used types
pub use analytics::{actions, AnalyticsEvent};
pub use verification_session::{
    ResendPhase, SessionSnapshot, TickOutcome, VerificationSession, CODE_LENGTH,
    RESEND_COOLDOWN_SECONDS,
};
