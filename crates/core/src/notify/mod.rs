//! Transient user-facing notifications.
//!
//! A process-wide, fire-and-forget broadcast queue of short-lived alerts.
//! Alerts are never persisted and never replayed to late subscribers.

pub mod hub;
pub mod types;

pub use hub::{AlertPanel, NotificationHub, AUTO_DISMISS};
pub use types::{Alert, Severity};
