//! Spreadsheet import.
//!
//! Supported inputs, chosen by extension:
//! * `.csv` – header row followed by records
//! * `.json` – `[{ "Name": "...", "Score": 72, "Group": "A" }, ...]`
//! * either of the above with a trailing `.gz`
//!
//! CSV cells are kept as text and JSON values keep their JSON type; numeric
//! coercion of the grade column happens at aggregation time.

use std::io::Read;

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::coerce::CellValue;
use crate::dataset::{Dataset, RawRow};
use crate::fetch::{BasicClient, fetch_bytes, is_remote};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

/// How to decode a source: its tabular format and whether it is gzipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceKind {
    pub format: Format,
    pub gzip: bool,
}

impl SourceKind {
    /// Infers the kind from a file name or URL path.
    pub fn from_name(name: &str) -> Result<Self> {
        // drop any query string before looking at the extension
        let path = name.split(['?', '#']).next().unwrap_or(name);
        let lower = path.to_ascii_lowercase();

        let (stem, gzip) = match lower.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (lower.as_str(), false),
        };

        let format = match stem.rsplit_once('.').map(|(_, ext)| ext) {
            Some("csv") => Format::Csv,
            Some("json") => Format::Json,
            Some(other) => bail!("Unsupported file extension: .{other}"),
            None => bail!("Cannot infer format of '{name}': no file extension"),
        };

        Ok(Self { format, gzip })
    }
}

/// Reads a dataset from a local path or an HTTP(S) URL.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn load_source(source: &str) -> Result<Dataset> {
    let kind = SourceKind::from_name(source)?;

    let bytes = if is_remote(source) {
        let client = BasicClient::new()?;
        fetch_bytes(&client, source).await?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("reading {source}"))?
    };

    let dataset = load_bytes(&bytes, kind)?;
    info!(
        rows = dataset.len(),
        columns = dataset.headers().len(),
        "Dataset loaded"
    );
    Ok(dataset)
}

/// Decodes an in-memory source.
pub fn load_bytes(bytes: &[u8], kind: SourceKind) -> Result<Dataset> {
    let raw;
    let bytes = if kind.gzip {
        let mut buf = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut buf)
            .context("decompressing gzip input")?;
        raw = buf;
        raw.as_slice()
    } else {
        bytes
    };

    match kind.format {
        Format::Csv => load_csv(bytes),
        Format::Json => load_json(bytes),
    }
}

fn load_csv(bytes: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            h.trim().to_string()
        })
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record.iter().map(csv_cell).collect::<Vec<_>>());
    }
    debug!(records = records.len(), "CSV parsed");

    Ok(Dataset::from_records(headers, records))
}

/// Empty cells are null; everything else keeps its exact text, so `01` and
/// `1.0` stay distinct group labels. Grades are parsed later by coercion.
fn csv_cell(s: &str) -> CellValue {
    if s.trim().is_empty() {
        CellValue::Null
    } else {
        CellValue::Text(s.to_string())
    }
}

fn load_json(bytes: &[u8]) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_slice(bytes).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = RawRow::with_capacity(obj.len());
        for (key, val) in obj {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
            row.insert(key.clone(), json_to_cell(val));
        }
        rows.push(row);
    }

    Ok(Dataset::new(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Null => CellValue::Null,
        JsonValue::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
        JsonValue::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}
