use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::data::chart::{prepare_bar, prepare_line, ChartPoint};
use crate::data::export::{export_artifact, ExportArtifact};
use crate::data::filter::filter;
use crate::data::loader::{self, LoadError};
use crate::data::model::{CellValue, Dataset};
use crate::data::summary::{summarize, SummaryStatistics};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
///
/// Every `select_*` call recomputes the outputs that depend on it, so the
/// renderer only ever reads.
pub struct AppState {
    pub config: AppConfig,

    /// Where the current dataset came from (URL or path).
    pub source: String,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Statistics of the whole dataset, computed once per load.
    pub summary: SummaryStatistics,

    /// Last load failure, shown instead of any data panels.
    pub load_error: Option<String>,

    /// Filter columns offered to the user (allow-list ∩ dataset columns).
    pub filter_columns: Vec<String>,
    pub filter_column: Option<String>,

    /// Distinct non-missing values of `filter_column`.
    pub value_options: Vec<CellValue>,
    pub value_search: String,
    pub filter_value: Option<CellValue>,

    /// Rows matching the current filter (cached).
    pub filtered: Dataset,

    pub numeric_columns: Vec<String>,
    pub numeric_column: Option<String>,

    pub bar_series: Vec<ChartPoint>,
    pub line_series: Vec<ChartPoint>,

    /// Transient status line (export results etc.).
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            source: config.dataset_source.clone(),
            config,
            dataset: None,
            summary: SummaryStatistics::default(),
            load_error: None,
            filter_columns: Vec::new(),
            filter_column: None,
            value_options: Vec::new(),
            value_search: String::new(),
            filter_value: None,
            filtered: Dataset::default(),
            numeric_columns: Vec::new(),
            numeric_column: None,
            bar_series: Vec::new(),
            line_series: Vec::new(),
            status_message: None,
        }
    }

    /// Load (or reload) the dataset from `source`.
    ///
    /// On failure the previous dataset is dropped: nothing downstream runs on
    /// a dataset that did not come from the current source.
    pub fn load(&mut self, source: &str) -> Result<(), LoadError> {
        self.source = source.to_string();
        match loader::load(source, self.config.request_timeout) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    dataset.len(),
                    dataset.columns
                );
                self.set_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e:#}");
                self.clear();
                self.load_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Load from the configured source.
    pub fn load_default(&mut self) -> Result<(), LoadError> {
        let source = self.config.dataset_source.clone();
        self.load(&source)
    }

    /// Ingest a newly loaded dataset, compute its statistics and default selections.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let dataset = Arc::new(dataset);
        self.summary = summarize(&dataset);
        self.filter_columns = self
            .config
            .filter_columns
            .iter()
            .filter(|c| dataset.has_column(c))
            .cloned()
            .collect();
        self.numeric_columns = dataset.numeric_columns();
        self.filtered = dataset.empty_like();
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;

        let first_filter = self.filter_columns.first().cloned();
        self.select_filter_column(first_filter);
        let first_numeric = self.numeric_columns.first().cloned();
        self.select_numeric_column(first_numeric);
    }

    fn clear(&mut self) {
        let config = self.config.clone();
        let source = std::mem::take(&mut self.source);
        *self = Self::new(config);
        self.source = source;
    }

    /// Choose the filter column; refreshes the value list and picks its first value.
    pub fn select_filter_column(&mut self, column: Option<String>) {
        log::debug!("Filter column: {column:?}");
        self.value_options = match (&self.dataset, &column) {
            (Some(ds), Some(col)) => ds.distinct_values(col),
            _ => Vec::new(),
        };
        self.filter_column = column;
        self.value_search.clear();
        let first_value = self.value_options.first().cloned();
        self.select_filter_value(first_value);
    }

    /// Choose the filter value and recompute the filtered subset.
    pub fn select_filter_value(&mut self, value: Option<CellValue>) {
        log::debug!("Filter value: {value:?}");
        self.filter_value = value;
        self.refilter();
    }

    /// Recompute `filtered` from the current selections.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.filtered = match (&self.filter_column, &self.filter_value) {
            (Some(col), Some(val)) => filter(ds, col, val),
            _ => ds.empty_like(),
        };
    }

    /// Choose the charted numeric column and rebuild both series.
    pub fn select_numeric_column(&mut self, column: Option<String>) {
        log::debug!("Numeric column: {column:?}");
        self.numeric_column = column;
        match (&self.dataset, &self.numeric_column) {
            (Some(ds), Some(col)) => {
                let id = &self.config.identifier_column;
                self.bar_series = prepare_bar(ds, id, col);
                self.line_series = prepare_line(ds, id, col);
            }
            _ => {
                self.bar_series.clear();
                self.line_series.clear();
            }
        }
    }

    /// CSV download of the current filtered subset.
    pub fn export_filtered(&self) -> Result<ExportArtifact> {
        export_artifact(&self.filtered).context("encoding filtered rows as CSV")
    }

    /// Write the filtered subset to `path`.
    pub fn save_filtered(&mut self, path: &Path) -> Result<()> {
        let artifact = self.export_filtered()?;
        std::fs::write(path, &artifact.bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!(
            "Exported {} rows ({} bytes, {}) to {}",
            self.filtered.len(),
            artifact.bytes.len(),
            artifact.mime,
            path.display()
        );
        self.status_message = Some(format!(
            "Saved {} rows to {}",
            self.filtered.len(),
            path.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    const CSV: &str = "CAS,Name,SMILES,LC50,EC50\n\
        50-00-0,Formaldehyde,C=O,1.5,0.2\n\
        64-17-5,Ethanol,CCO,,3\n\
        50-00-0,Formalin,C=O,2.5,\n\
        7732-18-5,Water,O,100,200\n";

    fn loaded() -> AppState {
        let mut state = AppState::new(AppConfig::default());
        state.set_dataset(parse_csv(CSV.as_bytes()).unwrap());
        state
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn defaults_follow_the_first_options() {
        let state = loaded();
        assert_eq!(state.filter_columns, vec!["CAS", "Name", "SMILES"]);
        assert_eq!(state.filter_column.as_deref(), Some("CAS"));
        assert_eq!(
            state.value_options,
            vec![text("50-00-0"), text("64-17-5"), text("7732-18-5")]
        );
        assert_eq!(state.filter_value, Some(text("50-00-0")));
        assert_eq!(state.filtered.len(), 2);
        assert_eq!(state.numeric_columns, vec!["LC50", "EC50"]);
        assert_eq!(state.numeric_column.as_deref(), Some("LC50"));
        assert_eq!(state.bar_series.len(), 4);
        assert_eq!(state.summary.get("LC50").map(|s| s.count), Some(3));
    }

    #[test]
    fn changing_column_resets_value() {
        let mut state = loaded();
        state.select_filter_column(Some("Name".into()));
        assert_eq!(state.filter_value, Some(text("Formaldehyde")));
        assert_eq!(state.filtered.len(), 1);

        state.select_filter_value(Some(text("Water")));
        assert_eq!(state.filtered.rows[0].values[0], text("7732-18-5"));
    }

    #[test]
    fn changing_numeric_column_rebuilds_series() {
        let mut state = loaded();
        state.select_numeric_column(Some("EC50".into()));
        let values: Vec<Option<f64>> = state.line_series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(0.2), Some(3.0), None, Some(200.0)]);
    }

    #[test]
    fn allow_list_skips_absent_columns() {
        let mut state = AppState::new(AppConfig::default());
        state.set_dataset(parse_csv(b"CAS,Tox\n1-1-1,2\n").unwrap());
        assert_eq!(state.filter_columns, vec!["CAS"]);
    }

    #[test]
    fn failed_load_leaves_no_dataset() {
        let mut state = loaded();
        let result = state.load("definitely-missing-file.csv");
        assert!(result.is_err());
        assert!(state.dataset.is_none());
        assert!(state.load_error.is_some());
        assert!(state.filtered.is_empty());
        assert!(state.bar_series.is_empty());
        assert_eq!(state.source, "definitely-missing-file.csv");
    }

    #[test]
    fn saves_filtered_rows() -> Result<()> {
        let mut state = loaded();
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("filtered_data.csv");
        state.save_filtered(&path)?;
        let written = std::fs::read_to_string(&path)?;
        assert_eq!(
            written,
            "CAS,Name,SMILES,LC50,EC50\n50-00-0,Formaldehyde,C=O,1.5,0.2\n50-00-0,Formalin,C=O,2.5,\n"
        );
        assert!(state.status_message.is_some());
        Ok(())
    }
}
