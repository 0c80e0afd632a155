//! Amount normalization for "thousands dot, decimal comma" numeric text.

use crate::cell::Cell;

/// Normalize an amount cell. `None` means text that failed to parse as a
/// number; whether that zero-fills or aborts the run is the caller's
/// policy, not decided here.
///
/// Empty cells are 0.0; numeric cells pass through; a date in an amount
/// column is not a number.
pub fn normalize_amount(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Empty => Some(0.0),
        Cell::Number(n) => Some(*n),
        Cell::Date(_) => None,
        Cell::Text(s) => parse_locale_number(s),
    }
}

/// Strip thousands dots, turn the decimal comma into a dot, then parse.
/// "1.234,56" → 1234.56, "0,00" → 0.0.
fn parse_locale_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    let cleaned = s.replace('.', "").replacen(',', ".", 1);
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_formatted_text() {
        assert_eq!(normalize_amount(&Cell::Text("100,00".into())), Some(100.0));
        assert_eq!(normalize_amount(&Cell::Text("1.234,56".into())), Some(1234.56));
        assert_eq!(normalize_amount(&Cell::Text("-40,25".into())), Some(-40.25));
        // no decimal comma at all still parses
        assert_eq!(normalize_amount(&Cell::Text("1.500".into())), Some(1500.0));
    }

    #[test]
    fn test_absent_and_numeric() {
        assert_eq!(normalize_amount(&Cell::Empty), Some(0.0));
        assert_eq!(normalize_amount(&Cell::Text("  ".into())), Some(0.0));
        assert_eq!(normalize_amount(&Cell::Number(-12.5)), Some(-12.5));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(normalize_amount(&Cell::Text("n/a".into())), None);
        // a second comma is not a valid decimal
        assert_eq!(normalize_amount(&Cell::Text("1,2,3".into())), None);
        let d = chrono::NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(normalize_amount(&Cell::Date(d)), None);
    }
}
