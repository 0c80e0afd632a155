//! Banner-row location.
//!
//! Exports carry banner rows (report title, date range) before the data;
//! the engine expects rows starting immediately after the column header
//! `A="Detalle", C="Debe", D="Haber", E="Saldo"`.

use anyhow::{Result, bail};

use saldo_core::{Cell, LedgerRow};

fn cell_matches(cell: &Cell, expected: &str) -> bool {
    matches!(cell, Cell::Text(s) if s.trim().eq_ignore_ascii_case(expected))
}

fn is_banner_row(row: &LedgerRow) -> bool {
    cell_matches(row.a(), "detalle")
        && cell_matches(row.c(), "debe")
        && cell_matches(row.d(), "haber")
        && cell_matches(row.e(), "saldo")
}

/// Slice the sheet to the rows after the banner. When the banner is not
/// found, fall back to skipping `skip_fallback` rows if configured;
/// otherwise the run aborts rather than guessing an offset.
pub fn data_rows(rows: &[LedgerRow], skip_fallback: Option<usize>) -> Result<&[LedgerRow]> {
    if let Some(i) = rows.iter().position(is_banner_row) {
        return Ok(&rows[i + 1..]);
    }
    match skip_fallback {
        Some(n) => Ok(rows.get(n..).unwrap_or(&[])),
        None => bail!(
            "header row not found (expected Detalle / Debe / Haber / Saldo); \
             pass a skip count to override"
        ),
    }
}
