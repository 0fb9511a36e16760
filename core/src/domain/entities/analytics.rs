//! Analytics event entity for lightweight client-side event logging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// One analytics event emitted by the verification screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsEvent {
    /// Unique identifier for the event
    pub id: Uuid,

    /// Screen visit the event belongs to
    pub session_id: Uuid,

    /// Action name, see [`actions`]
    pub action: String,

    /// Whether the action succeeded
    pub success: bool,

    /// Stable error code for failed actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    /// Human-readable failure detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Additional properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<JsonValue>,

    /// Timestamp when the event occurred
    pub created_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Create a successful event
    pub fn new(session_id: Uuid, action: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            action: action.into(),
            success: true,
            error_code: None,
            detail: None,
            properties: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the event as failed with an error code and detail
    pub fn with_error(mut self, error_code: impl Into<String>, detail: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self.detail = Some(detail.into());
        self.success = false;
        self
    }

    /// Attach extra properties
    pub fn with_properties(mut self, properties: JsonValue) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// Analytics actions emitted by the verification flow
pub mod actions {
    /// Verify call started
    pub const VERIFICATION_SUBMITTED: &str = "verification_submitted";
    /// Backend accepted the code
    pub const VERIFICATION_SUCCEEDED: &str = "verification_succeeded";
    /// Backend rejected the code
    pub const VERIFICATION_FAILED: &str = "verification_failed";
    /// Submit blocked locally (wrong length, already submitting)
    pub const VERIFICATION_BLOCKED: &str = "verification_blocked";
    /// New code requested
    pub const CODE_RESENT: &str = "code_resent";
    /// Resend request failed
    pub const CODE_RESEND_FAILED: &str = "code_resend_failed";
    /// Screen left, session discarded
    pub const SESSION_ENDED: &str = "session_ended";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_event() {
        let session_id = Uuid::new_v4();
        let event = AnalyticsEvent::new(session_id, actions::CODE_RESENT);

        assert_eq!(event.session_id, session_id);
        assert_eq!(event.action, actions::CODE_RESENT);
        assert!(event.success);
        assert!(event.error_code.is_none());
        assert!(event.detail.is_none());
    }

    #[test]
    fn test_with_error_marks_failure() {
        let event = AnalyticsEvent::new(Uuid::new_v4(), actions::VERIFICATION_FAILED)
            .with_error("VERIFY_REJECTED", "Token has expired or is invalid");

        assert!(!event.success);
        assert_eq!(event.error_code.as_deref(), Some("VERIFY_REJECTED"));
        assert_eq!(event.detail.as_deref(), Some("Token has expired or is invalid"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let event = AnalyticsEvent::new(Uuid::new_v4(), actions::SESSION_ENDED)
            .with_properties(serde_json::json!({ "reason": "verified" }));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["action"], "session_ended");
        assert_eq!(json["properties"]["reason"], "verified");
        assert!(json.get("error_code").is_none());

        let parsed: AnalyticsEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }
}
