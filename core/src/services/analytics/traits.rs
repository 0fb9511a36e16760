//! Trait for analytics sink integration

use async_trait::async_trait;

use crate::domain::entities::analytics::AnalyticsEvent;
use crate::errors::DomainResult;

/// Destination for analytics events
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Record one event
    async fn record(&self, event: &AnalyticsEvent) -> DomainResult<()>;
}

// Allow `()` as a no-op sink
#[async_trait]
impl AnalyticsSink for () {
    async fn record(&self, _event: &AnalyticsEvent) -> DomainResult<()> {
        Ok(())
    }
}
