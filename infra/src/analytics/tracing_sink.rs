//! Analytics sink writing events as structured log records
//!
//! Records go to the `analytics` target so they can be filtered or routed
//! separately, e.g. `RUST_LOG=analytics=info`.

use async_trait::async_trait;

use em_core::domain::entities::analytics::AnalyticsEvent;
use em_core::errors::{DomainError, DomainResult};
use em_core::services::analytics::AnalyticsSink;

/// Emits each analytics event through `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingAnalyticsSink;

impl TracingAnalyticsSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalyticsSink for TracingAnalyticsSink {
    async fn record(&self, event: &AnalyticsEvent) -> DomainResult<()> {
        let properties = match &event.properties {
            Some(value) => serde_json::to_string(value).map_err(|e| DomainError::Internal {
                message: format!("failed to serialize analytics properties: {}", e),
            })?,
            None => String::new(),
        };

        tracing::info!(
            target: "analytics",
            event_id = %event.id,
            session_id = %event.session_id,
            action = %event.action,
            success = event.success,
            error_code = event.error_code.as_deref().unwrap_or(""),
            detail = event.detail.as_deref().unwrap_or(""),
            properties = %properties,
            created_at = %event.created_at,
            "analytics event"
        );
        Ok(())
    }
}
