//! Filtered, sorted, paginated ledger view state.
//!
//! [`LedgerView`] owns a snapshot of normalized entries and produces the
//! slice the UI renders. It never fails: empty inputs produce empty outputs,
//! and out-of-range page requests are ignored.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::normalize::{EntryCategory, LedgerEntry};

/// Fixed number of entries per page.
pub const PAGE_SIZE: usize = 10;

/// Conjunctive entry filter; every criterion is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    /// Exact account match.
    pub account: Option<i64>,
    /// Category match. `Transfer` is special-cased to the raw-kind bucket
    /// (kind string starts with `TRANSFER`), NOT the normalized category:
    /// a `TRANSFER_IN` entry normalizes to deposit but still belongs to the
    /// transfer filter bucket.
    pub category: Option<EntryCategory>,
    /// Inclusive start date (from midnight).
    pub from_date: Option<NaiveDate>,
    /// Inclusive end date, covering the entire day (through 23:59:59.999).
    pub to_date: Option<NaiveDate>,
}

impl LedgerFilter {
    /// Returns true if the entry passes every set criterion.
    #[must_use]
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(account) = self.account
            && entry.account_id != account
        {
            return false;
        }
        if let Some(category) = self.category {
            let matched = match category {
                EntryCategory::Transfer => entry.is_transfer(),
                other => entry.category == other,
            };
            if !matched {
                return false;
            }
        }
        if let Some(from) = self.from_date
            && entry.txn_date < start_of_day(from)
        {
            return false;
        }
        if let Some(to) = self.to_date
            && entry.txn_date > end_of_day(to)
        {
            return false;
        }
        true
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last_instant = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last_instant).and_utc()
}

/// Sortable entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Sort by transaction date.
    Date,
    /// Sort by signed amount.
    Amount,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Stateful aggregation layer over normalized ledger entries.
///
/// Holds the full entry snapshot plus the active filter, sort, and page.
/// Snapshots are replaced wholesale via [`LedgerView::set_entries`]; no
/// partial views are ever exposed.
#[derive(Debug)]
pub struct LedgerView {
    entries: Vec<LedgerEntry>,
    filter: LedgerFilter,
    sort_field: SortField,
    sort_direction: SortDirection,
    filtered: Vec<LedgerEntry>,
    page: usize,
}

impl Default for LedgerView {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerView {
    /// Creates an empty view sorted by date descending.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            filter: LedgerFilter::default(),
            sort_field: SortField::Date,
            sort_direction: SortDirection::Desc,
            filtered: Vec::new(),
            page: 1,
        }
    }

    /// Replaces the entry snapshot wholesale and resets to page 1.
    pub fn set_entries(&mut self, entries: Vec<LedgerEntry>) {
        self.entries = entries;
        self.recompute();
        self.page = 1;
    }

    /// Returns the full unfiltered snapshot in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Returns the active filter.
    #[must_use]
    pub fn filter(&self) -> &LedgerFilter {
        &self.filter
    }

    /// Applies a new filter set and resets to page 1.
    pub fn set_filter(&mut self, filter: LedgerFilter) {
        self.filter = filter;
        self.recompute();
        self.page = 1;
    }

    /// Clears all filter criteria and resets to page 1.
    pub fn clear_filter(&mut self) {
        self.set_filter(LedgerFilter::default());
    }

    /// Sorts by the given field.
    ///
    /// Selecting the active field flips direction; selecting a new field
    /// resets direction to descending. The current page is kept.
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Desc;
        }
        self.recompute();
    }

    /// Returns the active sort field.
    #[must_use]
    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    /// Returns the active sort direction.
    #[must_use]
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Moves to the given 1-indexed page.
    ///
    /// Out-of-range requests are a no-op; returns whether the page changed.
    pub fn change_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// Returns the current 1-indexed page number.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the number of pages in the filtered set (0 when empty).
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(PAGE_SIZE)
    }

    /// Returns the whole filtered, sorted entry list.
    #[must_use]
    pub fn filtered_entries(&self) -> &[LedgerEntry] {
        &self.filtered
    }

    /// Returns the slice of entries on the current page.
    #[must_use]
    pub fn current_page_entries(&self) -> &[LedgerEntry] {
        let start = (self.page - 1) * PAGE_SIZE;
        if start >= self.filtered.len() {
            return &[];
        }
        let end = (start + PAGE_SIZE).min(self.filtered.len());
        &self.filtered[start..end]
    }

    /// Rebuilds the filtered list from the snapshot, then sorts.
    ///
    /// Filtering starts from arrival order and the sort is stable, so ties
    /// keep their original arrival order regardless of how often the sort
    /// was toggled.
    fn recompute(&mut self) {
        self.filtered = self
            .entries
            .iter()
            .filter(|entry| self.filter.matches(entry))
            .cloned()
            .collect();

        let (field, direction) = (self.sort_field, self.sort_direction);
        self.filtered.sort_by(|a, b| {
            let ordering = match field {
                SortField::Date => a.txn_date.cmp(&b.txn_date),
                SortField::Amount => a.signed_amount.cmp(&b.signed_amount),
            };
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}
