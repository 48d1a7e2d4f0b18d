//! sl-core: shared foundation for the SafeLink workspace
//!
//! Provides configuration loading and the user-facing notification sink
//! used by every front end.

pub mod config;
pub mod error;
pub mod notify;

pub use config::{ApiSettings, Config, UiSettings};
pub use error::{Error, Result};
pub use notify::{MemoryNotifier, Notification, Notifier, NotifyConfig, NotifyLevel};
