//! First-sheet decoding via calamine, preserving native dates and numbers.

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use std::path::Path;

use saldo_core::{Cell, LedgerRow};

/// Read the first sheet of a workbook into ledger rows. Row numbers are
/// 1-based, matching what a spreadsheet UI shows.
pub fn read_first_sheet(path: &Path) -> Result<Vec<LedgerRow>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("open workbook {}", path.display()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("workbook has no sheets: {}", path.display()))?;

    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("read sheet '{sheet}'"))?;

    Ok(range
        .rows()
        .enumerate()
        .map(|(i, cells)| {
            LedgerRow::from_cells(cells.iter().map(convert_cell).collect(), i + 1)
        })
        .collect())
}

/// Map one calamine cell into the core model. Blank-looking strings become
/// `Empty`; native date-times keep their calendar date; booleans and cell
/// errors carry nothing the engine can use.
pub fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(t.to_string())
            }
        }
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Cell::Date(ndt.date()),
            None => Cell::Empty,
        },
        Data::DateTimeIso(s) => match parse_iso_date(s) {
            Some(d) => Cell::Date(d),
            None => Cell::Empty,
        },
        Data::DurationIso(_) | Data::Bool(_) | Data::Error(_) => Cell::Empty,
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    // "2024-04-15" or "2024-04-15T00:00:00"
    NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
}
