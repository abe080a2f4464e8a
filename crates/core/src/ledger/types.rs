//! Ledger domain types mirroring the banking service's records.
//!
//! The server owns these records; the client holds read-only snapshots that
//! are replaced wholesale after each refresh. String-valued categories coming
//! from the server are OPEN enums: unknown values pass through untouched and
//! must never be treated as errors.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account category as reported by the server.
///
/// Open string enum: `SAVINGS` and `CURRENT` are recognized, every other
/// value is carried through as [`AccountKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountKind {
    /// Savings account.
    Savings,
    /// Current account.
    Current,
    /// Any other server-side category, preserved verbatim.
    Other(String),
}

impl AccountKind {
    /// Parses a kind from the server's string form. Never fails.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("SAVINGS") {
            Self::Savings
        } else if s.eq_ignore_ascii_case("CURRENT") {
            Self::Current
        } else {
            Self::Other(s.to_string())
        }
    }

    /// Returns the wire string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Savings => "SAVINGS",
            Self::Current => "CURRENT",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AccountKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<AccountKind> for String {
    fn from(kind: AccountKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Transaction kind as reported by the server.
///
/// Open string enum: the four known kinds are recognized case-insensitively,
/// everything else is carried through as [`TxnKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TxnKind {
    /// Money paid into the account.
    Deposit,
    /// Money taken out of the account.
    Withdrawal,
    /// Incoming side of a transfer.
    TransferIn,
    /// Outgoing side of a transfer.
    TransferOut,
    /// Any other server-side kind, preserved verbatim.
    Other(String),
}

impl TxnKind {
    /// Parses a kind from the server's string form. Never fails.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("DEPOSIT") {
            Self::Deposit
        } else if s.eq_ignore_ascii_case("WITHDRAWAL") {
            Self::Withdrawal
        } else if s.eq_ignore_ascii_case("TRANSFER_IN") {
            Self::TransferIn
        } else if s.eq_ignore_ascii_case("TRANSFER_OUT") {
            Self::TransferOut
        } else {
            Self::Other(s.to_string())
        }
    }

    /// Returns the wire string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdrawal => "WITHDRAWAL",
            Self::TransferIn => "TRANSFER_IN",
            Self::TransferOut => "TRANSFER_OUT",
            Self::Other(s) => s,
        }
    }

    /// Returns true if the raw kind string starts with `TRANSFER`.
    ///
    /// This is the bucket used by the transfer filter and the transfer
    /// summary total. It intentionally differs from normalization:
    /// `TRANSFER_IN`/`TRANSFER_OUT` normalize to deposit/withdrawal yet
    /// still count as transfers here.
    #[must_use]
    pub fn is_transfer_kind(&self) -> bool {
        match self {
            Self::TransferIn | Self::TransferOut => true,
            Self::Other(s) => s.starts_with("TRANSFER"),
            Self::Deposit | Self::Withdrawal => false,
        }
    }
}

impl From<String> for TxnKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TxnKind> for String {
    fn from(kind: TxnKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A bank account snapshot.
///
/// Created and mutated only by the remote service; refreshed wholesale after
/// each transfer. The balance is a signed decimal amount (non-negative by
/// banking invariant, not enforced client-side).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Server-assigned account ID.
    pub id: i64,
    /// Full account number; only the last four digits are displayed.
    pub account_number: String,
    /// Owning customer ID.
    pub customer_id: i64,
    /// Account category (open enum).
    pub account_type: AccountKind,
    /// Current balance.
    pub balance: Decimal,
    /// When the account was opened.
    pub opened_at: DateTime<Utc>,
    /// Interest rate, when the category carries one.
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
    /// Overdraft limit, when the category carries one.
    #[serde(default)]
    pub overdraft_limit: Option<Decimal>,
    /// Server-side status string.
    pub status: String,
}

impl Account {
    /// Returns the masked display form of the account number (`****1234`).
    #[must_use]
    pub fn masked_number(&self) -> String {
        let len = self.account_number.chars().count();
        let last4: String = self
            .account_number
            .chars()
            .skip(len.saturating_sub(4))
            .collect();
        format!("****{last4}")
    }

    /// Returns the display label used in pickers: `SAVINGS • ****1234`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} • {}", self.account_type.as_str(), self.masked_number())
    }
}

/// A transaction record as received from the server.
///
/// The amount is an unsigned magnitude (always >= 0); the sign is derived
/// client-side during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// Server-assigned transaction ID.
    pub id: i64,
    /// The account this transaction belongs to.
    pub account_id: i64,
    /// Transaction kind (open enum).
    #[serde(rename = "txnType")]
    pub kind: TxnKind,
    /// Unsigned magnitude.
    pub amount: Decimal,
    /// When the transaction happened.
    pub txn_date: DateTime<Utc>,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}
