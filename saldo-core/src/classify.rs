//! Row classification: account header / totals / transaction / ignored.
//!
//! The presence/absence rules live only here; everything downstream matches
//! exhaustively on [`RowKind`].

use chrono::NaiveDate;

use crate::cell::LedgerRow;
use crate::dates::normalize_date;

/// Role of one ledger row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// Start of an account block: code in `A`, description in `B`, rest empty.
    AccountHeader { code: String, description: String },
    /// End of a block: `A` empty with amounts present. Excluded from
    /// aggregation.
    Totals,
    /// Dated movement: debit in `C`, credit in `D`. Column `E` (running
    /// balance) is carried by the row but unused.
    Transaction { date: NaiveDate },
    /// Blank separators, stray text.
    Ignored,
}

/// Classify one row. Shape checks run before date parsing: a degenerate
/// header's column `A` can itself look date-like.
pub fn classify(row: &LedgerRow) -> RowKind {
    let [a, b, c, d, e] = &row.cells;

    if !a.is_empty() && !b.is_empty() && c.is_empty() && d.is_empty() && e.is_empty() {
        return RowKind::AccountHeader {
            code: a.as_text(),
            description: b.as_text(),
        };
    }

    if a.is_empty() && (!c.is_empty() || !d.is_empty() || !e.is_empty()) {
        return RowKind::Totals;
    }

    match normalize_date(a) {
        Some(date) => RowKind::Transaction { date },
        None => RowKind::Ignored,
    }
}
