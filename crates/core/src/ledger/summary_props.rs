//! Property-based tests for ledger summaries.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::ledger::normalize::LedgerEntry;
use crate::ledger::summary::{LedgerSummary, MonthlySummary};
use crate::ledger::types::{RawTransaction, TxnKind};

fn arb_entry() -> impl Strategy<Value = LedgerEntry> {
    let kind = prop_oneof![
        Just(TxnKind::Deposit),
        Just(TxnKind::Withdrawal),
        Just(TxnKind::TransferIn),
        Just(TxnKind::TransferOut),
        "[A-Z_]{1,12}".prop_map(|s| TxnKind::parse(&s)),
    ];
    (any::<i64>(), kind, 0i64..=1_000_000, 946_684_800i64..2_208_988_800).prop_map(
        |(id, kind, cents, secs)| {
            LedgerEntry::from_raw(&RawTransaction {
                id,
                account_id: 1,
                kind,
                amount: Decimal::new(cents, 2),
                txn_date: DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_else(Utc::now),
                note: None,
            })
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// income - expenses == net for any entry set.
    #[test]
    fn prop_net_is_income_minus_expenses(entries in prop::collection::vec(arb_entry(), 0..50)) {
        let summary = LedgerSummary::compute(&entries);
        prop_assert_eq!(summary.net_amount, summary.total_income - summary.total_expenses);
        prop_assert!(summary.total_income >= Decimal::ZERO);
        prop_assert!(summary.total_expenses >= Decimal::ZERO);
        prop_assert!(summary.total_transfers >= Decimal::ZERO);
    }

    /// The monthly variant never exceeds the whole-ledger totals.
    #[test]
    fn prop_monthly_bounded_by_total(
        entries in prop::collection::vec(arb_entry(), 0..50),
        now_secs in 946_684_800i64..2_208_988_800,
    ) {
        let now = DateTime::<Utc>::from_timestamp(now_secs, 0).unwrap_or_else(Utc::now);
        let summary = LedgerSummary::compute(&entries);
        let monthly = MonthlySummary::for_month(&entries, now);
        prop_assert!(monthly.income <= summary.total_income);
        prop_assert!(monthly.expenses <= summary.total_expenses);
        prop_assert_eq!(monthly.net_change, monthly.income - monthly.expenses);
    }
}
