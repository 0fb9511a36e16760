//! Navigator forwarding route requests to the screen loop

use tokio::sync::mpsc;

use em_core::domain::value_objects::Route;
use em_core::services::verification::Navigator;

/// Sends every requested route over an unbounded channel
#[derive(Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    /// Create a navigator and the receiver the screen loop reads from
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, event = "navigate", "Navigation requested");
        if self.tx.send(route).is_err() {
            tracing::warn!(route = %route, "Screen loop is gone, navigation dropped");
        }
    }
}
