//! Ledger domain: normalization, classified views, and summaries.
//!
//! Raw transaction records fetched from the banking service are normalized
//! once into immutable [`LedgerEntry`] values (sign and category derivation),
//! then aggregated, filtered, sorted, and paginated for display.

pub mod normalize;
pub mod summary;
pub mod types;
pub mod view;

#[cfg(test)]
mod normalize_props;
#[cfg(test)]
mod summary_props;

pub use normalize::{EntryCategory, LedgerEntry};
pub use summary::{LedgerSummary, MonthlySummary};
pub use types::{Account, AccountKind, RawTransaction, TxnKind};
pub use view::{LedgerFilter, LedgerView, SortDirection, SortField, PAGE_SIZE};
