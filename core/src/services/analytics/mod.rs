//! Analytics event logging for client screens
//!
//! Events are handed to an [`AnalyticsSink`]; writes never block or fail the
//! user-facing flow.

mod service;
mod traits;

pub use service::{AnalyticsService, AnalyticsServiceConfig};
pub use traits::AnalyticsSink;
