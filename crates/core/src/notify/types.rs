//! Alert types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A completed action.
    Success,
    /// A failed action.
    Error,
    /// Something worth attention, not a failure.
    Warning,
    /// Neutral information.
    Info,
}

impl Severity {
    /// Returns the string representation of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A short-lived user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique per alert instance.
    pub id: Uuid,
    /// Severity of the message.
    pub severity: Severity,
    /// The message text.
    pub message: String,
    /// Whether the alert is removed automatically after the display
    /// duration, or only by explicit dismissal.
    pub auto_close: bool,
}

impl Alert {
    /// Creates an alert with a fresh unique id.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>, auto_close: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            auto_close,
        }
    }
}
