//! User-facing notifications
//!
//! Every lifecycle operation, successful or failed, emits one advisory
//! notification for the presentation layer. Notifications never affect the
//! correctness of a transition.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// How the presentation layer should style a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast-style message for the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Sink for advisory notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that forwards to the tracing subscriber
#[derive(Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::error!(
                title = %notification.title,
                "{}",
                notification.message
            ),
            Severity::Warning => tracing::warn!(
                title = %notification.title,
                "{}",
                notification.message
            ),
            _ => tracing::info!(
                title = %notification.title,
                "{}",
                notification.message
            ),
        }
    }
}

/// Notifier that collects messages in memory, for tests
#[derive(Default)]
pub struct MemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications emitted so far
    pub fn all(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// The most recent notification, if any
    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .lock()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.notifications.lock() {
            guard.push(notification);
        }
    }
}
