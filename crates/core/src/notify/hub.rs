//! Notification hub and subscriber-side alert panel.
//!
//! [`NotificationHub`] is a multi-subscriber broadcast of [`Alert`] values:
//! fire-and-forget, no history for late subscribers, unordered delivery
//! across subscribers. [`AlertPanel`] is the visible set one subscriber
//! renders from; auto-close alerts are removed a fixed delay after DELIVERY
//! (not publish), so a slow-rendering subscriber still shows each alert for
//! the full duration.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use super::types::{Alert, Severity};

/// How long an auto-close alert stays visible after delivery.
pub const AUTO_DISMISS: Duration = Duration::from_millis(5000);

const CHANNEL_CAPACITY: usize = 32;

/// Process-wide broadcast queue of alerts.
///
/// Cheap to clone; all clones publish into the same channel. Publishing with
/// no live subscribers is a no-op, matching the fire-and-forget contract.
#[derive(Debug, Clone)]
pub struct NotificationHub {
    tx: broadcast::Sender<Alert>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    /// Creates a hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Registers a new subscriber. Only alerts published after this call are
    /// delivered to it.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Alert> {
        self.tx.subscribe()
    }

    /// Publishes an alert to all current subscribers and returns it.
    pub fn publish(&self, severity: Severity, message: impl Into<String>, auto_close: bool) -> Alert {
        let alert = Alert::new(severity, message, auto_close);
        debug!(severity = %alert.severity, auto_close, "alert published");
        // No subscribers is fine: the alert is simply dropped.
        let _ = self.tx.send(alert.clone());
        alert
    }

    /// Publishes a success alert (auto-closing).
    pub fn success(&self, message: impl Into<String>) -> Alert {
        self.publish(Severity::Success, message, true)
    }

    /// Publishes an error alert (auto-closing).
    pub fn error(&self, message: impl Into<String>) -> Alert {
        self.publish(Severity::Error, message, true)
    }

    /// Publishes a warning alert (auto-closing).
    pub fn warning(&self, message: impl Into<String>) -> Alert {
        self.publish(Severity::Warning, message, true)
    }

    /// Publishes an info alert (auto-closing).
    pub fn info(&self, message: impl Into<String>) -> Alert {
        self.publish(Severity::Info, message, true)
    }
}

/// The visible alert set of one subscriber.
///
/// Cheap to clone; clones share the same visible set.
#[derive(Debug, Clone, Default)]
pub struct AlertPanel {
    visible: Arc<Mutex<Vec<Alert>>>,
}

impl AlertPanel {
    /// Creates an empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes the panel to a hub and drives delivery on a background
    /// task. The task ends when the hub is dropped.
    pub fn attach(&self, hub: &NotificationHub) -> JoinHandle<()> {
        let panel = self.clone();
        let mut rx = hub.subscribe();
        tokio::spawn(async move {
            // Lagged receivers skip dropped alerts and keep going; alerts
            // are transient so losing the oldest under load is acceptable.
            while let Ok(alert) = recv_skipping_lag(&mut rx).await {
                panel.deliver(alert);
            }
        })
    }

    /// Delivers an alert into the visible set.
    ///
    /// For auto-close alerts the dismissal timer starts here, at delivery.
    pub fn deliver(&self, alert: Alert) {
        let auto_close = alert.auto_close;
        let id = alert.id;
        if let Ok(mut visible) = self.visible.lock() {
            visible.push(alert);
        }
        if auto_close {
            let panel = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(AUTO_DISMISS).await;
                panel.dismiss(id);
            });
        }
    }

    /// Removes an alert by id. Idempotent: dismissing an already-dismissed
    /// or unknown id is a no-op.
    pub fn dismiss(&self, id: Uuid) {
        if let Ok(mut visible) = self.visible.lock() {
            visible.retain(|alert| alert.id != id);
        }
    }

    /// Returns a snapshot of the currently visible alerts.
    #[must_use]
    pub fn visible(&self) -> Vec<Alert> {
        self.visible
            .lock()
            .map(|visible| visible.clone())
            .unwrap_or_default()
    }
}

async fn recv_skipping_lag(
    rx: &mut broadcast::Receiver<Alert>,
) -> Result<Alert, broadcast::error::RecvError> {
    loop {
        match rx.recv().await {
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            other => return other,
        }
    }
}
