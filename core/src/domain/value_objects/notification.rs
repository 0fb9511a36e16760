//! Notification and navigation value objects handed to the screen's collaborators.

use serde::{Deserialize, Serialize};

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A toast with a title and a body string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, body)
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, body)
    }

    fn new(level: NotificationLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Screens the verification flow can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
}

impl Route {
    /// Router path for the screen
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
