//! Property-based tests for transaction normalization.
//!
//! Validates the sign/category derivation table and the purity guarantees
//! of the normalizer using proptest for randomized input generation.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::ledger::normalize::{classify, signed_amount, EntryCategory, LedgerEntry};
use crate::ledger::types::{RawTransaction, TxnKind};

/// Strategy for non-negative magnitudes with two decimal places.
fn arb_magnitude() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for arbitrary kind strings, biased toward the known vocabulary.
fn arb_kind() -> impl Strategy<Value = TxnKind> {
    prop_oneof![
        Just(TxnKind::Deposit),
        Just(TxnKind::Withdrawal),
        Just(TxnKind::TransferIn),
        Just(TxnKind::TransferOut),
        "[A-Z_]{1,20}".prop_map(|s| TxnKind::parse(&s)),
    ]
}

/// Strategy for optional notes.
fn arb_note() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some(String::new())), "[a-z ]{1,40}".prop_map(Some)]
}

fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    // 2000-01-01..2040-ish, in whole seconds.
    (946_684_800i64..2_208_988_800).prop_map(|secs| {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
    })
}

fn arb_raw() -> impl Strategy<Value = RawTransaction> {
    (
        any::<i64>(),
        any::<i64>(),
        arb_kind(),
        arb_magnitude(),
        arb_timestamp(),
        arb_note(),
    )
        .prop_map(|(id, account_id, kind, amount, txn_date, note)| RawTransaction {
            id,
            account_id,
            kind,
            amount,
            txn_date,
            note,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// DEPOSIT / TRANSFER_IN => category deposit, positive sign.
    #[test]
    fn prop_deposit_kinds(magnitude in arb_magnitude(), incoming in any::<bool>()) {
        let kind = if incoming { TxnKind::TransferIn } else { TxnKind::Deposit };
        prop_assert_eq!(classify(&kind), EntryCategory::Deposit);
        prop_assert_eq!(signed_amount(&kind, magnitude), magnitude);
    }

    /// WITHDRAWAL / TRANSFER_OUT => category withdrawal, negative sign.
    #[test]
    fn prop_withdrawal_kinds(magnitude in arb_magnitude(), outgoing in any::<bool>()) {
        let kind = if outgoing { TxnKind::TransferOut } else { TxnKind::Withdrawal };
        prop_assert_eq!(classify(&kind), EntryCategory::Withdrawal);
        prop_assert_eq!(signed_amount(&kind, magnitude), -magnitude);
    }

    /// Every other kind => category transfer, unsigned pass-through.
    #[test]
    fn prop_unknown_kinds_fall_back(magnitude in arb_magnitude(), s in "[A-Z_]{1,20}") {
        let kind = TxnKind::parse(&s);
        if matches!(kind, TxnKind::Other(_)) {
            prop_assert_eq!(classify(&kind), EntryCategory::Transfer);
            prop_assert_eq!(signed_amount(&kind, magnitude), magnitude);
        }
    }

    /// abs(signed_amount) == magnitude for every kind.
    #[test]
    fn prop_signed_magnitude_invariant(raw in arb_raw()) {
        let entry = LedgerEntry::from_raw(&raw);
        prop_assert_eq!(entry.signed_amount.abs(), entry.amount);
    }

    /// Normalizing twice yields an identical entry.
    #[test]
    fn prop_normalization_idempotent(raw in arb_raw()) {
        prop_assert_eq!(LedgerEntry::from_raw(&raw), LedgerEntry::from_raw(&raw));
    }

    /// The description is never empty: either the note or a category default.
    #[test]
    fn prop_description_never_empty(raw in arb_raw()) {
        let entry = LedgerEntry::from_raw(&raw);
        prop_assert!(!entry.description.is_empty());
        match raw.note.as_deref() {
            Some(note) if !note.is_empty() => prop_assert_eq!(entry.description, note),
            _ => prop_assert_eq!(entry.description, entry.category.default_description()),
        }
    }
}
