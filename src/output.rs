//! Export of computed summaries.
//!
//! Supports pretty-printing, JSON, CSV tables and a paginated Markdown
//! document. Every format keeps the summary column order.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::types::{GroupSummary, Report, SUMMARY_COLUMNS};

const PAGE_BREAK: &str = "\n<div style=\"page-break-after: always\"></div>\n\n";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Serializes a report as pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes one CSV table, header first.
pub fn write_table<H, R>(path: &Path, header: H, rows: R) -> Result<()>
where
    H: IntoIterator,
    H::Item: AsRef<[u8]>,
    R: IntoIterator<Item = Vec<String>>,
{
    debug!(path = %path.display(), "Writing CSV table");

    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes `overall.csv` and `groups.csv` into `dir`.
pub fn write_summary_csv(dir: &Path, report: &Report) -> Result<(PathBuf, PathBuf)> {
    let overall = dir.join("overall.csv");
    let groups = dir.join("groups.csv");

    write_table(&overall, SUMMARY_COLUMNS, [report.overall.cells()])?;
    write_table(
        &groups,
        GroupSummary::columns(),
        report.groups.iter().map(GroupSummary::cells),
    )?;

    Ok((overall, groups))
}

/// Renders the report as a Markdown document: a title page, then the overall
/// table and the per-group table, each on its own page.
pub fn render_document(report: &Report, title: &str, generated_at: DateTime<Utc>) -> String {
    let t = &report.thresholds;
    let mut doc = String::new();

    // title page
    let _ = writeln!(doc, "# {title}\n");
    let _ = writeln!(doc, "Generated {}\n", generated_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(
        doc,
        "- Grade column: {}\n- Group column: {}",
        report.grade_column, report.group_column
    );
    let _ = writeln!(
        doc,
        "- Thresholds: passing {}, merit {}, distinction {}",
        t.passing(),
        t.merit(),
        t.distinction()
    );
    let _ = writeln!(doc, "- Students: {}", report.overall.n);
    if report.skipped_rows > 0 {
        let _ = writeln!(doc, "- Rows without a numeric grade: {}", report.skipped_rows);
    }
    doc.push_str(PAGE_BREAK);

    doc.push_str("## Overall Summary\n\n");
    push_table(&mut doc, &SUMMARY_COLUMNS, [report.overall.cells()]);
    doc.push_str(PAGE_BREAK);

    doc.push_str("## Group Summary\n\n");
    push_table(
        &mut doc,
        &GroupSummary::columns(),
        report.groups.iter().map(GroupSummary::cells),
    );

    doc
}

fn push_table<R>(doc: &mut String, header: &[&str], rows: R)
where
    R: IntoIterator<Item = Vec<String>>,
{
    doc.push_str(&table_line(header.iter().map(|h| h.to_string())));
    doc.push_str(&table_line(header.iter().map(|_| "---".to_string())));
    for row in rows {
        doc.push_str(&table_line(row.into_iter()));
    }
}

fn table_line(cells: impl Iterator<Item = String>) -> String {
    let cells: Vec<String> = cells.map(|c| c.replace('|', "\\|")).collect();
    format!("| {} |\n", cells.join(" | "))
}

/// Writes every export (`overall.csv`, `groups.csv`, `report.json`,
/// `report.md`) into `dir`, creating it if needed.
pub fn write_report(dir: &Path, report: &Report, title: &str) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    write_summary_csv(dir, report)?;
    let json_path = dir.join("report.json");
    fs::write(&json_path, to_json(report)?)
        .with_context(|| format!("creating {}", json_path.display()))?;

    let doc_path = dir.join("report.md");
    fs::write(&doc_path, render_document(report, title, Utc::now()))
        .with_context(|| format!("creating {}", doc_path.display()))?;

    info!(dir = %dir.display(), groups = report.groups.len(), "Report written");
    Ok(())
}
