//! State for building one report at a time.
//!
//! Every user action replaces a piece of state wholesale: a new import swaps
//! the rows and drops the last report, new thresholds replace the old ones,
//! and a successful generate replaces the previous report. A failed generate
//! leaves everything as it was.

use crate::analyzers::aggregate::aggregate;
use crate::analyzers::types::Report;
use crate::dataset::{ColumnSelection, Dataset, detect_columns};
use crate::error::{ColumnRole, ReportError};
use crate::thresholds::{ThresholdSet, normalize};
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct ReportSession {
    dataset: Option<Dataset>,
    selection: ColumnSelection,
    thresholds: ThresholdSet,
    report: Option<Report>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the loaded rows and re-detects the grade and group columns.
    pub fn import(&mut self, dataset: Dataset) {
        self.selection = detect_columns(dataset.headers());
        info!(
            rows = dataset.len(),
            columns = dataset.headers().len(),
            grade_column = ?self.selection.grade,
            group_column = ?self.selection.group,
            "Dataset imported"
        );
        self.dataset = Some(dataset);
        self.report = None;
    }

    /// Drops the dataset, selection and report; thresholds go back to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn select_columns(&mut self, selection: ColumnSelection) {
        self.selection = selection;
    }

    pub fn set_thresholds(&mut self, passing: f64, merit: f64, distinction: f64) {
        self.thresholds = normalize(passing, merit, distinction);
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    pub fn thresholds(&self) -> ThresholdSet {
        self.thresholds
    }

    /// The report from the last successful [`generate`](Self::generate).
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Recomputes the report from the current rows, columns and thresholds.
    #[tracing::instrument(skip(self))]
    pub fn generate(&mut self) -> Result<&Report, ReportError> {
        match self.try_generate() {
            Ok(report) => Ok(self.report.insert(report)),
            Err(e) => {
                warn!(error = %e, "Report not generated");
                Err(e)
            }
        }
    }

    fn try_generate(&self) -> Result<Report, ReportError> {
        let dataset = self
            .dataset
            .as_ref()
            .filter(|d| !d.is_empty())
            .ok_or(ReportError::MissingInput)?;

        let grade = self
            .selection
            .grade
            .as_deref()
            .ok_or(ReportError::MissingColumnSelection(ColumnRole::Grade))?;
        let group = self
            .selection
            .group
            .as_deref()
            .ok_or(ReportError::MissingColumnSelection(ColumnRole::Group))?;

        for column in [grade, group] {
            if !dataset.has_column(column) {
                return Err(ReportError::UnknownColumn(column.to_string()));
            }
        }

        aggregate(dataset.rows(), grade, group, &self.thresholds)
    }
}
