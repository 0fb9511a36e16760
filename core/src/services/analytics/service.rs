//! Analytics service wrapping a sink with background writes.

use std::sync::Arc;

use crate::domain::entities::analytics::AnalyticsEvent;

use super::traits::AnalyticsSink;

/// Configuration for the analytics service
#[derive(Debug, Clone)]
pub struct AnalyticsServiceConfig {
    /// Whether events are recorded at all
    pub enabled: bool,
    /// Whether to run sink writes in a background task
    pub async_writes: bool,
}

impl Default for AnalyticsServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            async_writes: true,
        }
    }
}

/// Service for recording analytics events
pub struct AnalyticsService<S>
where
    S: AnalyticsSink,
{
    sink: Arc<S>,
    config: AnalyticsServiceConfig,
}

impl<S> AnalyticsService<S>
where
    S: AnalyticsSink + 'static,
{
    /// Create a new analytics service
    pub fn new(sink: Arc<S>, config: AnalyticsServiceConfig) -> Self {
        Self { sink, config }
    }

    /// Record an event, inline or in the background depending on config
    pub async fn record(&self, event: AnalyticsEvent) {
        if !self.config.enabled {
            return;
        }
        if self.config.async_writes {
            self.spawn_write(event);
        } else {
            Self::write(&self.sink, &event).await;
        }
    }

    /// Record an event from synchronous code (e.g. `Drop`)
    ///
    /// Dropped with a debug log when no tokio runtime is running.
    pub fn record_detached(&self, event: AnalyticsEvent) {
        if !self.config.enabled {
            return;
        }
        self.spawn_write(event);
    }

    fn spawn_write(&self, event: AnalyticsEvent) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let sink = Arc::clone(&self.sink);
                handle.spawn(async move {
                    Self::write(&sink, &event).await;
                });
            }
            Err(_) => {
                tracing::debug!(
                    action = %event.action,
                    "No runtime available, analytics event dropped"
                );
            }
        }
    }

    async fn write(sink: &Arc<S>, event: &AnalyticsEvent) {
        if let Err(e) = sink.record(event).await {
            // Never fail the user-facing operation
            tracing::warn!(
                action = %event.action,
                session_id = %event.session_id,
                error = %e,
                "Failed to record analytics event"
            );
        }
    }
}

impl<S: AnalyticsSink> Clone for AnalyticsService<S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            config: self.config.clone(),
        }
    }
}

impl AnalyticsService<()> {
    /// Service that discards every event
    pub fn disabled() -> Self {
        Self::new(
            Arc::new(()),
            AnalyticsServiceConfig {
                enabled: false,
                async_writes: false,
            },
        )
    }
}
