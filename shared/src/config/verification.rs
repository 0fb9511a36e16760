//! Email verification screen configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::Language;

/// Configuration for the email verification flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Required number of characters in a verification code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds the user must wait before requesting a new code
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: u32,

    /// Countdown tick interval in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Show an error toast when a resend request fails
    #[serde(default = "default_surface_resend_failures")]
    pub surface_resend_failures: bool,

    /// Language of notification text
    #[serde(default)]
    pub language: Language,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            resend_cooldown_seconds: default_resend_cooldown(),
            tick_interval_ms: default_tick_interval(),
            surface_resend_failures: default_surface_resend_failures(),
            language: Language::default(),
        }
    }
}

impl VerificationConfig {
    /// Countdown tick interval as a `Duration`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Set the notification language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

fn default_code_length() -> usize {
    6
}

fn default_resend_cooldown() -> u32 {
    60
}

fn default_tick_interval() -> u64 {
    1000
}

fn default_surface_resend_failures() -> bool {
    true
}
