//! Transaction normalization: sign and category derivation.
//!
//! Maps a [`RawTransaction`] to an immutable [`LedgerEntry`] with no side
//! effects. Normalization is a pure, deterministic, idempotent mapping and
//! never fails: any kind string and any non-negative magnitude are accepted,
//! unrecognized values fall back to defined defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::{RawTransaction, TxnKind};

/// Normalized transaction category.
///
/// Closed enum derived from the open [`TxnKind`]; the `Transfer` variant is
/// the default bucket for anything not explicitly a deposit or withdrawal
/// pattern, not an error condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    /// Money in: `DEPOSIT` or `TRANSFER_IN`.
    Deposit,
    /// Money out: `WITHDRAWAL` or `TRANSFER_OUT`.
    Withdrawal,
    /// Everything else, including unrecognized kinds.
    Transfer,
}

impl EntryCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Transfer => "transfer",
        }
    }

    /// Returns the default display description for the category.
    #[must_use]
    pub const fn default_description(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derives the normalized category for a transaction kind.
#[must_use]
pub fn classify(kind: &TxnKind) -> EntryCategory {
    match kind {
        TxnKind::Deposit | TxnKind::TransferIn => EntryCategory::Deposit,
        TxnKind::Withdrawal | TxnKind::TransferOut => EntryCategory::Withdrawal,
        TxnKind::Other(_) => EntryCategory::Transfer,
    }
}

/// Applies the sign convention to an unsigned magnitude.
///
/// Unrecognized kinds pass through unsigned (positive). This is asymmetric
/// with [`classify`]: an unrecognized kind is categorized as `transfer` but
/// signed positive, not negative.
#[must_use]
pub fn signed_amount(kind: &TxnKind, magnitude: Decimal) -> Decimal {
    match kind {
        TxnKind::Withdrawal | TxnKind::TransferOut => -magnitude,
        TxnKind::Deposit | TxnKind::TransferIn | TxnKind::Other(_) => magnitude,
    }
}

/// A normalized, classified ledger entry.
///
/// Derived once per [`RawTransaction`] and immutable afterwards.
/// Invariant: `signed_amount.abs() == amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Server-assigned transaction ID.
    pub id: i64,
    /// The account this entry belongs to.
    pub account_id: i64,
    /// The raw transaction kind, preserved for transfer-bucket matching.
    #[serde(rename = "txnType")]
    pub kind: TxnKind,
    /// Unsigned magnitude.
    pub amount: Decimal,
    /// When the transaction happened.
    pub txn_date: chrono::DateTime<chrono::Utc>,
    /// Normalized category.
    pub category: EntryCategory,
    /// Magnitude with the sign convention applied.
    pub signed_amount: Decimal,
    /// The raw note if non-empty, else a category-based default.
    pub description: String,
}

impl LedgerEntry {
    /// Normalizes a raw transaction into a classified entry.
    #[must_use]
    pub fn from_raw(raw: &RawTransaction) -> Self {
        let category = classify(&raw.kind);
        let description = match raw.note.as_deref() {
            Some(note) if !note.is_empty() => note.to_string(),
            _ => category.default_description().to_string(),
        };

        Self {
            id: raw.id,
            account_id: raw.account_id,
            kind: raw.kind.clone(),
            amount: raw.amount,
            txn_date: raw.txn_date,
            category,
            signed_amount: signed_amount(&raw.kind, raw.amount),
            description,
        }
    }

    /// Returns true if the entry counts toward the transfer bucket
    /// (raw kind string starts with `TRANSFER`).
    #[must_use]
    pub fn is_transfer(&self) -> bool {
        self.kind.is_transfer_kind()
    }
}
