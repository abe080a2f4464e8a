//! Ledger summary aggregation.
//!
//! Totals are always computed over the UNFILTERED entry set. Income and
//! expenses use signed amounts; the transfer total deliberately sums raw
//! magnitudes of the transfer bucket instead.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::normalize::LedgerEntry;

/// Whole-ledger totals for the transactions screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sum of positive signed amounts.
    pub total_income: Decimal,
    /// Absolute sum of negative signed amounts.
    pub total_expenses: Decimal,
    /// Sum of raw magnitudes of entries in the transfer bucket
    /// (raw kind starts with `TRANSFER`).
    pub total_transfers: Decimal,
    /// `total_income - total_expenses`.
    pub net_amount: Decimal,
}

impl LedgerSummary {
    /// Computes totals over the full entry set.
    #[must_use]
    pub fn compute(entries: &[LedgerEntry]) -> Self {
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        let mut transfers = Decimal::ZERO;

        for entry in entries {
            if entry.signed_amount > Decimal::ZERO {
                income += entry.signed_amount;
            } else if entry.signed_amount < Decimal::ZERO {
                expenses += -entry.signed_amount;
            }
            if entry.is_transfer() {
                transfers += entry.amount;
            }
        }

        Self {
            total_income: income,
            total_expenses: expenses,
            total_transfers: transfers,
            net_amount: income - expenses,
        }
    }
}

/// Current-calendar-month totals for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Sum of positive signed amounts in the month.
    pub income: Decimal,
    /// Absolute sum of negative signed amounts in the month.
    pub expenses: Decimal,
    /// `income - expenses`.
    pub net_change: Decimal,
}

impl MonthlySummary {
    /// Computes totals for the calendar month containing `now`.
    ///
    /// `now` is passed by the caller (normally `Utc::now()`) so the
    /// computation stays deterministic under test.
    #[must_use]
    pub fn for_month(entries: &[LedgerEntry], now: DateTime<Utc>) -> Self {
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;

        for entry in entries {
            if entry.txn_date.year() != now.year() || entry.txn_date.month() != now.month() {
                continue;
            }
            if entry.signed_amount > Decimal::ZERO {
                income += entry.signed_amount;
            } else if entry.signed_amount < Decimal::ZERO {
                expenses += -entry.signed_amount;
            }
        }

        Self {
            income,
            expenses,
            net_change: income - expenses,
        }
    }
}

/// Returns the `n` most recent entries, newest first.
///
/// Ties keep arrival order (stable sort). Used for the dashboard's recent
/// activity list.
#[must_use]
pub fn recent(entries: &[LedgerEntry], n: usize) -> Vec<LedgerEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.txn_date.cmp(&a.txn_date));
    sorted.truncate(n);
    sorted
}
