//! Numeric coercion of spreadsheet cells.
//!
//! Cells arrive as whatever the import produced: a number, a string that may
//! carry thousands separators or a percent sign, or nothing at all.

use std::fmt;

/// Label used for rows whose group cell is empty.
pub const MISSING_GROUP: &str = "(missing)";

/// A single cell of an imported row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// Converts a cell into a number, yielding `f64::NAN` when it is not one.
///
/// Strings have every `,` and `%` removed and are trimmed before parsing, so
/// `"1,250"` is `1250.0` and `" 85% "` is `85.0`. Infinite results are
/// reported as NaN too.
pub fn coerce_number(cell: &CellValue) -> f64 {
    let n = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => {
            let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '%').collect();
            cleaned.trim().parse::<f64>().unwrap_or(f64::NAN)
        }
        CellValue::Null => f64::NAN,
    };

    if n.is_finite() { n } else { f64::NAN }
}

/// Like [`coerce_number`] but as an `Option`, `None` for anything non-finite.
pub fn finite_grade(cell: &CellValue) -> Option<f64> {
    let n = coerce_number(cell);
    n.is_finite().then_some(n)
}

/// String form of a group cell, [`MISSING_GROUP`] for null.
pub fn group_label(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => MISSING_GROUP.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(coerce_number(&CellValue::Number(72.5)), 72.5);
        assert_eq!(coerce_number(&CellValue::Number(0.0)), 0.0);
    }

    #[test]
    fn test_strips_percent_and_commas() {
        assert_eq!(coerce_number(&"85%".into()), 85.0);
        assert_eq!(coerce_number(&"1,250".into()), 1250.0);
        assert_eq!(coerce_number(&"  64.5 % ".into()), 64.5);
    }

    #[test]
    fn test_unparseable_is_nan() {
        assert!(coerce_number(&"N/A".into()).is_nan());
        assert!(coerce_number(&"".into()).is_nan());
        assert!(coerce_number(&CellValue::Null).is_nan());
        assert!(coerce_number(&"inf".into()).is_nan());
        assert!(coerce_number(&CellValue::Number(f64::INFINITY)).is_nan());
    }

    #[test]
    fn test_finite_grade() {
        assert_eq!(finite_grade(&"85%".into()), Some(85.0));
        assert_eq!(finite_grade(&"N/A".into()), None);
    }

    #[test]
    fn test_group_label() {
        assert_eq!(group_label(&CellValue::Null), MISSING_GROUP);
        assert_eq!(group_label(&"B".into()), "B");
        assert_eq!(group_label(&CellValue::Number(3.0)), "3");
        assert_eq!(group_label(&CellValue::Number(1.5)), "1.5");
    }
}
