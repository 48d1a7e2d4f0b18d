//! User-facing notification sink
//!
//! Fire-and-forget messages shown to the user for a fixed duration. Front
//! ends provide the presentation; view-models only talk to the [`Notifier`]
//! trait.

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotifyLevel {
    /// Label shown in front ends
    pub fn label(&self) -> &'static str {
        match self {
            NotifyLevel::Info => "info",
            NotifyLevel::Success => "success",
            NotifyLevel::Warning => "warning",
            NotifyLevel::Error => "error",
        }
    }
}

/// A single notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Notification display settings
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// How long a notification stays visible, in milliseconds
    pub duration_ms: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { duration_ms: 1500 }
    }
}

/// Sink for user-facing messages
pub trait Notifier: Send + Sync {
    /// Emit a notification
    fn notify(&self, level: NotifyLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(NotifyLevel::Info, message);
    }

    fn success(&self, message: &str) {
        self.notify(NotifyLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.notify(NotifyLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotifyLevel::Error, message);
    }
}

/// Collecting notifier for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    /// Create a new empty notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications emitted so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.entries.lock().unwrap().clone()
    }

    /// Messages emitted at the given level
    pub fn messages_at(&self, level: NotifyLevel) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.entries.lock().unwrap().push(Notification {
            level,
            message: message.to_string(),
            created_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_config_default() {
        let config = NotifyConfig::default();
        assert_eq!(config.duration_ms, 1500);
    }

    #[test]
    fn test_memory_notifier_collects() {
        let notifier = MemoryNotifier::new();
        notifier.info("loading contacts");
        notifier.success("contact saved");
        notifier.error("server unreachable");

        let all = notifier.notifications();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].level, NotifyLevel::Info);
        assert_eq!(all[1].message, "contact saved");
    }

    #[test]
    fn test_messages_at_level() {
        let notifier = MemoryNotifier::new();
        notifier.warning("page out of range");
        notifier.warning("photo missing");
        notifier.success("contact saved");

        let warnings = notifier.messages_at(NotifyLevel::Warning);
        assert_eq!(warnings, vec!["page out of range", "photo missing"]);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(NotifyLevel::Info.label(), "info");
        assert_eq!(NotifyLevel::Error.label(), "error");
    }
}
