//! Date normalization: native date cells, Excel serials, and `D/M/YYYY` text.

use chrono::{Duration, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use crate::cell::Cell;

fn dmy_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d{1,2})/(\d{1,2})/(\d{4})\s*$").unwrap())
}

/// Normalize a cell to a calendar date. Returns `None` for anything that is
/// not a date; never fails.
///
/// Tried in priority order: native date cell, Excel serial number,
/// slash-separated day-first text.
pub fn normalize_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Number(n) => excel_serial_to_date(*n),
        Cell::Text(s) => parse_dmy(s),
        Cell::Empty => None,
    }
}

/// Decode an Excel day serial. Day 0 is 1899-12-30, which absorbs the 1900
/// leap-year bug; this is not a Unix-epoch conversion.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if serial <= 0.0 || !serial.is_finite() {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn parse_dmy(s: &str) -> Option<NaiveDate> {
    let caps = dmy_pattern().captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_native_date_passes_through() {
        let d = ymd(2024, 4, 15);
        assert_eq!(normalize_date(&Cell::Date(d)), Some(d));
    }

    #[test]
    fn test_excel_serial() {
        // 45397 is 2024-04-15 in the 1900 date system
        assert_eq!(normalize_date(&Cell::Number(45397.0)), Some(ymd(2024, 4, 15)));
        // fractional part is time-of-day, not modeled
        assert_eq!(normalize_date(&Cell::Number(45397.75)), Some(ymd(2024, 4, 15)));
        assert_eq!(normalize_date(&Cell::Number(0.0)), None);
        assert_eq!(normalize_date(&Cell::Number(-3.0)), None);
    }

    #[test]
    fn test_dmy_text() {
        assert_eq!(
            normalize_date(&Cell::Text("15/4/2024".into())),
            Some(ymd(2024, 4, 15))
        );
        assert_eq!(
            normalize_date(&Cell::Text("01/04/2024".into())),
            Some(ymd(2024, 4, 1))
        );
    }

    #[test]
    fn test_invalid_calendar_combination() {
        assert_eq!(normalize_date(&Cell::Text("31/02/2024".into())), None);
    }

    #[test]
    fn test_non_dates() {
        assert_eq!(normalize_date(&Cell::Empty), None);
        assert_eq!(normalize_date(&Cell::Text("Caja".into())), None);
        assert_eq!(normalize_date(&Cell::Text("2024-04-15".into())), None);
        assert_eq!(normalize_date(&Cell::Text("1/4/24".into())), None);
    }
}
