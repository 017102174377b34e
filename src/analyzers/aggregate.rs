use crate::analyzers::band::{Band, band};
use crate::analyzers::types::{CoercedRow, GroupSummary, Report, Summary};
use crate::analyzers::utility::{mean, rate, stddev};
use crate::coerce::{CellValue, finite_grade, group_label};
use crate::dataset::RawRow;
use crate::error::ReportError;
use crate::thresholds::ThresholdSet;
use std::collections::BTreeMap;
use tracing::debug;

/// Coerces raw rows into `(grade, group)` pairs.
///
/// Rows whose grade is not a finite number are dropped. A missing key reads
/// as null, so a missing group cell becomes the `(missing)` label.
pub fn coerce_rows(rows: &[RawRow], grade_column: &str, group_column: &str) -> Vec<CoercedRow> {
    rows.iter()
        .filter_map(|row| {
            let grade = finite_grade(row.get(grade_column).unwrap_or(&CellValue::Null))?;
            let group = group_label(row.get(group_column).unwrap_or(&CellValue::Null));
            Some(CoercedRow { grade, group })
        })
        .collect()
}

/// Computes a [`Summary`] over a non-empty set of grades.
///
/// Returns `None` for an empty slice rather than dividing by zero.
pub fn summarize(grades: &[f64], thresholds: &ThresholdSet) -> Option<Summary> {
    if grades.is_empty() {
        return None;
    }

    let n = grades.len();
    let (passing, merit, distinction) = (
        thresholds.passing(),
        thresholds.merit(),
        thresholds.distinction(),
    );

    let pass_count = grades.iter().filter(|&&g| g >= passing).count();
    let merit_count = grades
        .iter()
        .filter(|&&g| g >= merit && g < distinction)
        .count();
    let distinction_count = grades.iter().filter(|&&g| g >= distinction).count();

    let mut bands = [0usize; 4];
    for g in grades {
        let slot = match band(*g) {
            Band::Fail => 0,
            Band::Pass => 1,
            Band::Merit => 2,
            Band::Distinction => 3,
        };
        bands[slot] += 1;
    }
    let [_, pass_band, merit_band, distinction_band] = bands;

    let avg = mean(grades);
    let max = grades.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = grades.iter().copied().fold(f64::INFINITY, f64::min);

    Some(Summary {
        n,
        pass_count,
        fail_count: n - pass_count,
        pass_rate: rate(pass_count, n),
        merit_rate: rate(merit_count, n),
        distinction_rate: rate(distinction_count, n),
        fixed_pass_rate: rate(pass_band + merit_band + distinction_band, n),
        pass_band,
        merit_band,
        distinction_band,
        mean: avg,
        sd: stddev(grades, avg),
        max,
        min,
        merit_count,
        distinction_count,
    })
}

/// Builds the overall summary and one summary per group.
///
/// Groups are ordered by label. Every call recomputes from `rows`; nothing is
/// cached between calls.
///
/// # Errors
///
/// [`ReportError::EmptyResult`] if no row has a finite grade.
pub fn aggregate(
    rows: &[RawRow],
    grade_column: &str,
    group_column: &str,
    thresholds: &ThresholdSet,
) -> Result<Report, ReportError> {
    let coerced = coerce_rows(rows, grade_column, group_column);
    let skipped_rows = rows.len() - coerced.len();

    let grades: Vec<f64> = coerced.iter().map(|r| r.grade).collect();
    let overall = summarize(&grades, thresholds).ok_or(ReportError::EmptyResult)?;

    let mut partitions: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in &coerced {
        partitions.entry(row.group.as_str()).or_default().push(row.grade);
    }

    let groups = partitions
        .into_iter()
        .filter_map(|(group, grades)| {
            summarize(&grades, thresholds).map(|summary| GroupSummary {
                group: group.to_string(),
                summary,
            })
        })
        .collect::<Vec<_>>();

    debug!(
        rows = rows.len(),
        kept = coerced.len(),
        skipped_rows,
        groups = groups.len(),
        "Aggregation complete"
    );

    Ok(Report {
        thresholds: *thresholds,
        grade_column: grade_column.to_string(),
        group_column: group_column.to_string(),
        skipped_rows,
        overall,
        groups,
    })
}
