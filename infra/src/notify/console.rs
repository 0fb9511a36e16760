//! Console notifier
//!
//! Writes each toast as one line to a terminal (stdout by default) and to
//! the log.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use em_core::domain::value_objects::{Notification, NotificationLevel};
use em_core::services::verification::Notifier;

/// Toast surface for terminal screens
pub struct ConsoleNotifier {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNotifier {
    /// Notifier writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => tracing::warn!(
                title = %notification.title,
                body = %notification.body,
                "Error toast shown"
            ),
            _ => tracing::debug!(
                level = ?notification.level,
                title = %notification.title,
                "Toast shown"
            ),
        }

        let line = format_notification(&notification);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "Failed to write notification");
        }
    }
}

/// Single-line rendering of a toast
pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.level {
        NotificationLevel::Success => "[ok]",
        NotificationLevel::Info => "[info]",
        NotificationLevel::Error => "[error]",
    };
    if notification.body.is_empty() {
        format!("{} {}", marker, notification.title)
    } else {
        format!("{} {}: {}", marker, notification.title, notification.body)
    }
}
