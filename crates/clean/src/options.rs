use crate::error::{CleanError, CleanResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Keywords that mark footer rows such as totals and averages.
pub const DEFAULT_SUMMARY_KEYWORDS: [&str; 6] =
    ["total", "subtotal", "grand total", "avg", "average", "sum"];

/// Standardized name of the employee identifier column.
pub const DEFAULT_DEDUP_KEY: &str = "employeeid";

/// Rows examined when looking for the header.
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 20;

/// Share of numeric values at which a synthetic column counts as junk.
pub const DEFAULT_JUNK_NUMERIC_RATIO: f64 = 0.8;

/// Options controlling which cleaning stages run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Rewrite column names into snake_case identifiers.
    pub standardize: bool,
    /// Remove rows containing any of `summary_keywords`.
    pub filter_summaries: bool,
    pub summary_keywords: Vec<String>,
    /// Collapse duplicate records, keeping the most complete one.
    pub dedupe: bool,
    /// Key columns used for sheets not listed in `dedup_keys_per_sheet`.
    pub default_dedup_keys: Vec<String>,
    pub dedup_keys_per_sheet: Option<IndexMap<String, Vec<String>>>,
    /// Remove every record with at least one missing field.
    pub drop_incomplete: bool,
    pub header_scan_rows: usize,
    pub junk_numeric_ratio: f64,
}

impl Default for CleanOptions {
    fn default() -> Self {
        CleanOptions {
            standardize: true,
            filter_summaries: true,
            summary_keywords: DEFAULT_SUMMARY_KEYWORDS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
            dedupe: true,
            default_dedup_keys: vec![DEFAULT_DEDUP_KEY.to_string()],
            dedup_keys_per_sheet: None,
            drop_incomplete: false,
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            junk_numeric_ratio: DEFAULT_JUNK_NUMERIC_RATIO,
        }
    }
}

impl CleanOptions {
    /// Options with every optional stage turned off.
    ///
    /// Header detection, normalization and junk-column removal still run.
    #[must_use]
    pub fn minimal() -> Self {
        CleanOptions {
            standardize: false,
            filter_summaries: false,
            dedupe: false,
            drop_incomplete: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_standardize(mut self, enabled: bool) -> Self {
        self.standardize = enabled;
        self
    }

    #[must_use]
    pub fn with_summary_filter(mut self, enabled: bool) -> Self {
        self.filter_summaries = enabled;
        self
    }

    #[must_use]
    pub fn with_summary_keywords<S: Into<String>>(
        mut self,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        self.summary_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_dedupe(mut self, enabled: bool) -> Self {
        self.dedupe = enabled;
        self
    }

    #[must_use]
    pub fn with_default_dedup_keys<S: Into<String>>(
        mut self,
        keys: impl IntoIterator<Item = S>,
    ) -> Self {
        self.default_dedup_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the dedup key for one sheet, overriding the default key
    #[must_use]
    pub fn with_sheet_dedup_keys<S: Into<String>>(
        mut self,
        sheet: &str,
        keys: impl IntoIterator<Item = S>,
    ) -> Self {
        self.dedup_keys_per_sheet
            .get_or_insert_with(IndexMap::new)
            .insert(sheet.to_string(), keys.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_drop_incomplete(mut self, enabled: bool) -> Self {
        self.drop_incomplete = enabled;
        self
    }

    #[must_use]
    pub fn with_header_scan_rows(mut self, rows: usize) -> Self {
        self.header_scan_rows = rows;
        self
    }

    #[must_use]
    pub fn with_junk_numeric_ratio(mut self, ratio: f64) -> Self {
        self.junk_numeric_ratio = ratio;
        self
    }

    /// Dedup key columns for a sheet
    #[must_use]
    pub fn dedup_keys_for(&self, sheet: &str) -> &[String] {
        self.dedup_keys_per_sheet
            .as_ref()
            .and_then(|per_sheet| per_sheet.get(sheet))
            .unwrap_or(&self.default_dedup_keys)
    }

    pub fn validate(&self) -> CleanResult<()> {
        if !(0.0..=1.0).contains(&self.junk_numeric_ratio) {
            return Err(CleanError::Config(format!(
                "junk_numeric_ratio must be between 0 and 1, got {}",
                self.junk_numeric_ratio
            )));
        }
        if self.header_scan_rows == 0 {
            return Err(CleanError::Config(
                "header_scan_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_yaml_str(source: &str) -> CleanResult<Self> {
        let options: Self =
            serde_yaml::from_str(source).map_err(|e| CleanError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_str(source: &str) -> CleanResult<Self> {
        let options: Self =
            serde_json::from_str(source).map_err(|e| CleanError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a `.yaml`, `.yml` or `.json` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> CleanResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&source),
            Some("json") => Self::from_json_str(&source),
            _ => Err(CleanError::Config(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }
}

/// Split a comma-delimited keyword list, trimming and dropping blanks.
#[must_use]
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
