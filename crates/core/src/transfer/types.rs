//! Transfer workflow domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three wizard steps, 1-indexed.
///
/// The machine starts at step 1; only a successful submission resets it
/// back to step 1. There is no explicit "done" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TransferStep {
    /// Step 1: choose the source account.
    SelectSource,
    /// Step 2: choose the destination account.
    SelectDestination,
    /// Step 3: enter the amount and review.
    Review,
}

impl TransferStep {
    /// Returns the 1-indexed step number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::SelectSource => 1,
            Self::SelectDestination => 2,
            Self::Review => 3,
        }
    }

    /// Returns the previous step, if any.
    #[must_use]
    pub const fn previous(&self) -> Option<Self> {
        match self {
            Self::SelectSource => None,
            Self::SelectDestination => Some(Self::SelectSource),
            Self::Review => Some(Self::SelectDestination),
        }
    }
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Transfer mode.
///
/// External transfers are recognized but not completable: the backend does
/// not support them, so external mode can never advance past step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Between the customer's own accounts.
    Internal,
    /// To an account at another institution (not completable).
    External,
}

/// Mutable draft scoped to one workflow session.
///
/// Created empty at workflow start, reset to empty on successful submission
/// or explicit cancellation; never persisted across process restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDraft {
    /// Source account, set during step 1.
    pub source: Option<i64>,
    /// Destination account, set during step 2 (internal mode only).
    pub destination: Option<i64>,
    /// Amount to transfer; must be > 0 and <= the source balance.
    pub amount: Option<Decimal>,
    /// Optional description carried onto the transfer note.
    pub description: String,
}

/// Destination fields for external mode. Collected but never submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalDetails {
    /// Account number at the other institution.
    pub account_number: String,
    /// Routing number.
    pub routing_number: String,
    /// Name of the account holder.
    pub account_holder_name: String,
}

/// The request sent to `POST accounts/transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Source account ID.
    pub from_account_id: i64,
    /// Destination account ID.
    pub to_account_id: i64,
    /// Amount to transfer.
    pub amount: Decimal,
    /// Free-text note; empty when no description was entered.
    pub note: String,
}
