//! Data types produced by the aggregation pipeline.

use crate::analyzers::utility::format_fixed;
use crate::thresholds::ThresholdSet;
use serde::Serialize;

/// Column names of a summary record, in output order.
pub const SUMMARY_COLUMNS: [&str; 14] = [
    "N",
    "Passing Count (≥ current Passing)",
    "Failed Count",
    "Passing Rate (%)",
    "Merit Rate (%)",
    "Distinction Rate (%)",
    "Overall Passing Rate (≥40) (%)",
    "Pass (40–59) Count",
    "Merit (60–69) Count",
    "Distinction (≥70) Count",
    "Mean",
    "SD",
    "Max",
    "Min",
];

/// Leading column of a group summary record.
pub const GROUP_COLUMN: &str = "Group";

/// A row that survived coercion: a finite grade and its group label.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedRow {
    pub grade: f64,
    pub group: String,
}

/// Statistics over one set of grades.
///
/// Counts are raw; rates are percentages of `n` already rounded to one
/// decimal. `mean` and `sd` are unrounded and only rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    #[serde(rename = "N")]
    pub n: usize,
    #[serde(rename = "Passing Count (≥ current Passing)")]
    pub pass_count: usize,
    #[serde(rename = "Failed Count")]
    pub fail_count: usize,
    #[serde(rename = "Passing Rate (%)")]
    pub pass_rate: f64,
    #[serde(rename = "Merit Rate (%)")]
    pub merit_rate: f64,
    #[serde(rename = "Distinction Rate (%)")]
    pub distinction_rate: f64,
    #[serde(rename = "Overall Passing Rate (≥40) (%)")]
    pub fixed_pass_rate: f64,
    #[serde(rename = "Pass (40–59) Count")]
    pub pass_band: usize,
    #[serde(rename = "Merit (60–69) Count")]
    pub merit_band: usize,
    #[serde(rename = "Distinction (≥70) Count")]
    pub distinction_band: usize,
    #[serde(rename = "Mean")]
    pub mean: f64,
    #[serde(rename = "SD")]
    pub sd: f64,
    #[serde(rename = "Max")]
    pub max: f64,
    #[serde(rename = "Min")]
    pub min: f64,

    // threshold-driven counts behind the merit and distinction rates
    #[serde(skip)]
    pub merit_count: usize,
    #[serde(skip)]
    pub distinction_count: usize,
}

impl Summary {
    /// Display form of each field, aligned with [`SUMMARY_COLUMNS`].
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.n.to_string(),
            self.pass_count.to_string(),
            self.fail_count.to_string(),
            format!("{:.1}", self.pass_rate),
            format!("{:.1}", self.merit_rate),
            format!("{:.1}", self.distinction_rate),
            format!("{:.1}", self.fixed_pass_rate),
            self.pass_band.to_string(),
            self.merit_band.to_string(),
            self.distinction_band.to_string(),
            format_fixed(self.mean, 2),
            format_fixed(self.sd, 2),
            self.max.to_string(),
            self.min.to_string(),
        ]
    }
}

/// Summary of one group, labelled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(flatten)]
    pub summary: Summary,
}

impl GroupSummary {
    /// Display form with the group label first.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(SUMMARY_COLUMNS.len() + 1);
        cells.push(self.group.clone());
        cells.extend(self.summary.cells());
        cells
    }

    /// Header row matching [`GroupSummary::cells`].
    pub fn columns() -> Vec<&'static str> {
        std::iter::once(GROUP_COLUMN)
            .chain(SUMMARY_COLUMNS)
            .collect()
    }
}

/// Full output of one generate run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub thresholds: ThresholdSet,
    pub grade_column: String,
    pub group_column: String,
    /// Rows dropped because their grade did not coerce to a finite number.
    pub skipped_rows: usize,
    pub overall: Summary,
    pub groups: Vec<GroupSummary>,
}
