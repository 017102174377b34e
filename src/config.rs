use anyhow::{Context, Result};
use serde::Deserialize;

use crate::thresholds::{
    DEFAULT_DISTINCTION, DEFAULT_MERIT, DEFAULT_PASSING, ThresholdSet, normalize,
};

/// Optional report settings kept on disk as JSON:
/// ```json
/// {
///   "title": "Term 2 Results",
///   "grade_column": "Final Mark",
///   "group_column": "Class",
///   "thresholds": { "passing": 50, "merit": 65, "distinction": 75 }
/// }
/// ```
/// Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: Option<String>,
    pub grade_column: Option<String>,
    pub group_column: Option<String>,
    pub thresholds: ThresholdConfig,
}

/// Raw thresholds as written by the user; normalized on use.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub passing: Option<f64>,
    pub merit: Option<f64>,
    pub distinction: Option<f64>,
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        Self::from_json(&content).with_context(|| format!("parsing config {path}"))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl ThresholdConfig {
    /// Resolves each cutoff as override, then config value, then default.
    pub fn resolve(
        &self,
        passing: Option<f64>,
        merit: Option<f64>,
        distinction: Option<f64>,
    ) -> ThresholdSet {
        normalize(
            passing.or(self.passing).unwrap_or(DEFAULT_PASSING),
            merit.or(self.merit).unwrap_or(DEFAULT_MERIT),
            distinction.or(self.distinction).unwrap_or(DEFAULT_DISTINCTION),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = ReportConfig::from_json("{}").unwrap();
        assert!(cfg.title.is_none());
        assert_eq!(cfg.thresholds.resolve(None, None, None), ThresholdSet::default());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let cfg = ReportConfig::from_json(
            r#"{"grade_column": "Mark", "thresholds": {"passing": 50, "merit": 65}}"#,
        )
        .unwrap();
        assert_eq!(cfg.grade_column.as_deref(), Some("Mark"));

        let t = cfg.thresholds.resolve(Some(45.0), None, None);
        assert_eq!((t.passing(), t.merit(), t.distinction()), (45.0, 65.0, 70.0));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ReportConfig::from_json("not json").is_err());
        assert!(ReportConfig::load("/no/such/config.json").is_err());
    }
}
