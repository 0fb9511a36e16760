//! Verification session entity for the email verification screen.
//!
//! The session is the in-memory state of one visit to the screen. It is
//! never persisted; navigating away discards it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::VerificationError;
use em_shared::validation::char_count;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Seconds before a new code may be requested
pub const RESEND_COOLDOWN_SECONDS: u32 = 60;

/// Phase of the resend sub-flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResendPhase {
    /// Counter above zero; resend is a no-op
    CoolingDown,
    /// Counter at zero; resend allowed
    Ready,
}

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Counter decremented and still above zero
    Counting(u32),
    /// Counter reached zero on this tick
    BecameReady,
    /// Counter was already zero; nothing changed
    Idle,
}

/// State of one visit to the verification screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSession {
    /// Identifies the visit in logs and analytics
    pub id: Uuid,

    /// When the screen was opened
    pub started_at: DateTime<Utc>,

    code: String,
    submitting: bool,
    seconds_until_resend_allowed: u32,
    cooldown_seconds: u32,
    validation_message: Option<String>,
}

impl VerificationSession {
    /// Creates a session with the default 60 second cooldown
    pub fn new() -> Self {
        Self::with_cooldown(RESEND_COOLDOWN_SECONDS)
    }

    /// Creates a session whose resend countdown starts at `cooldown_seconds`
    pub fn with_cooldown(cooldown_seconds: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            code: String::new(),
            submitting: false,
            seconds_until_resend_allowed: cooldown_seconds,
            cooldown_seconds,
            validation_message: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn seconds_until_resend_allowed(&self) -> u32 {
        self.seconds_until_resend_allowed
    }

    /// Derived: resend is allowed exactly when the counter is zero
    pub fn resend_allowed(&self) -> bool {
        self.seconds_until_resend_allowed == 0
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    pub fn phase(&self) -> ResendPhase {
        if self.resend_allowed() {
            ResendPhase::Ready
        } else {
            ResendPhase::CoolingDown
        }
    }

    /// Replaces the entered code and clears any inline message
    pub fn set_code(&mut self, value: impl Into<String>) {
        self.code = value.into();
        self.validation_message = None;
    }

    /// Checks the submit preconditions without changing state
    pub fn check_submittable(&self, code_length: usize) -> Result<(), VerificationError> {
        if self.submitting {
            return Err(VerificationError::SubmitInProgress);
        }
        let actual = char_count(&self.code);
        if actual != code_length {
            return Err(VerificationError::InvalidCodeLength {
                expected: code_length,
                actual,
            });
        }
        Ok(())
    }

    /// Shows an inline message under the code input
    pub fn set_validation_message(&mut self, message: impl Into<String>) {
        self.validation_message = Some(message.into());
    }

    /// Marks a verify call as outstanding and returns the code to send
    ///
    /// Callers must have passed [`check_submittable`](Self::check_submittable).
    pub fn begin_submit(&mut self) -> String {
        self.submitting = true;
        self.validation_message = None;
        self.code.clone()
    }

    /// Clears the in-flight flag once the verify call has returned
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Advances the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        match self.seconds_until_resend_allowed {
            0 => TickOutcome::Idle,
            1 => {
                self.seconds_until_resend_allowed = 0;
                TickOutcome::BecameReady
            }
            n => {
                self.seconds_until_resend_allowed = n - 1;
                TickOutcome::Counting(n - 1)
            }
        }
    }

    /// Starts a new cooldown if resend is allowed
    ///
    /// Returns `false` and leaves the session untouched while cooling down.
    pub fn try_begin_resend(&mut self) -> bool {
        if !self.resend_allowed() {
            return false;
        }
        self.seconds_until_resend_allowed = self.cooldown_seconds;
        true
    }

    /// Serializable view for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            code: self.code.clone(),
            submitting: self.submitting,
            seconds_until_resend_allowed: self.seconds_until_resend_allowed,
            resend_allowed: self.resend_allowed(),
            phase: self.phase(),
            validation_message: self.validation_message.clone(),
        }
    }
}

impl Default for VerificationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of a session, published to the screen on every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub code: String,
    pub submitting: bool,
    pub seconds_until_resend_allowed: u32,
    pub resend_allowed: bool,
    pub phase: ResendPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
}
