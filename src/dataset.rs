//! Imported rows and grade/group column selection.

use crate::coerce::CellValue;
use std::collections::HashMap;

/// One imported row, keyed by header name.
pub type RawRow = HashMap<String, CellValue>;

/// Patterns (lowercase substrings) that mark a header as the grade column.
const GRADE_HINTS: &[&str] = &["grade", "score", "mark"];

/// Patterns that mark a header as the group column.
const GROUP_HINTS: &[&str] = &["group", "section", "class", "cohort"];

/// A table of rows with its header order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    /// Builds a dataset from positional records, pairing cells with `headers`.
    /// Short records are padded with nulls.
    pub fn from_records<I, R>(headers: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = CellValue>,
    {
        let rows = records
            .into_iter()
            .map(|record| {
                let mut cells = record.into_iter();
                headers
                    .iter()
                    .map(|h| (h.clone(), cells.next().unwrap_or(CellValue::Null)))
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

/// The grade and group columns chosen for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    pub grade: Option<String>,
    pub group: Option<String>,
}

impl ColumnSelection {
    pub fn new(grade: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            grade: Some(grade.into()),
            group: Some(group.into()),
        }
    }
}

/// Picks likely grade and group columns from a header list.
///
/// The first header containing (case-insensitively) `grade`, `score` or
/// `mark` is the grade column; the first containing `group`, `section`,
/// `class` or `cohort` is the group column. Without a match the grade column
/// falls back to the first header and the group column to the second (or the
/// first, if there is only one).
pub fn detect_columns(headers: &[String]) -> ColumnSelection {
    let find = |hints: &[&str]| {
        headers
            .iter()
            .find(|h| {
                let lower = h.to_lowercase();
                hints.iter().any(|hint| lower.contains(hint))
            })
            .cloned()
    };

    let grade = find(GRADE_HINTS).or_else(|| headers.first().cloned());
    let group = find(GROUP_HINTS).or_else(|| headers.get(1).or(headers.first()).cloned());

    ColumnSelection { grade, group }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detects_by_pattern() {
        let sel = detect_columns(&headers(&["Student", "Cohort", "Final Score"]));
        assert_eq!(sel.grade.as_deref(), Some("Final Score"));
        assert_eq!(sel.group.as_deref(), Some("Cohort"));
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let sel = detect_columns(&headers(&["name", "MARKS", "SECTION"]));
        assert_eq!(sel.grade.as_deref(), Some("MARKS"));
        assert_eq!(sel.group.as_deref(), Some("SECTION"));
    }

    #[test]
    fn test_falls_back_to_positions() {
        let sel = detect_columns(&headers(&["a", "b", "c"]));
        assert_eq!(sel.grade.as_deref(), Some("a"));
        assert_eq!(sel.group.as_deref(), Some("b"));
    }

    #[test]
    fn test_single_and_empty_header_lists() {
        let sel = detect_columns(&headers(&["only"]));
        assert_eq!(sel.grade.as_deref(), Some("only"));
        assert_eq!(sel.group.as_deref(), Some("only"));

        assert_eq!(detect_columns(&[]), ColumnSelection::default());
    }

    #[test]
    fn test_from_records_pads_short_rows() {
        let ds = Dataset::from_records(
            headers(&["grade", "group"]),
            vec![vec![CellValue::Number(50.0)]],
        );
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows()[0]["group"], CellValue::Null);
        assert!(ds.has_column("grade"));
        assert!(!ds.has_column("score"));
    }
}
