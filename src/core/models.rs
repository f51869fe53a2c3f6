use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where a loaded table came from and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub source_path: Option<PathBuf>,
    pub loaded_at: DateTime<Utc>,
    pub row_count: usize,
}

impl TableMetadata {
    pub fn new(source_path: Option<PathBuf>, row_count: usize) -> Self {
        Self {
            source_path,
            loaded_at: Utc::now(),
            row_count,
        }
    }
}

impl fmt::Display for TableMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_path {
            Some(path) => write!(f, "{}", path.display())?,
            None => write!(f, "<in-memory>")?,
        }
        write!(
            f,
            " ({} rows, loaded {})",
            self.row_count,
            self.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// One (value, count) pair of a frequency count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub value: String,
    pub count: usize,
}

/// Headline numbers shown above the overview charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    pub parent_companies: usize,
    pub acquired_companies: usize,
    pub acquisitions: usize,
}

/// Knobs for the derived views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Frequency charts are truncated to this many categories
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
    /// Rows in the "most expensive acquisitions" charts
    #[serde(default = "default_top_prices")]
    pub top_prices: usize,
    #[serde(default = "default_year_bins")]
    pub year_bins: usize,
}

fn default_top_categories() -> usize {
    25
}

fn default_top_prices() -> usize {
    10
}

fn default_year_bins() -> usize {
    20
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            top_categories: default_top_categories(),
            top_prices: default_top_prices(),
            year_bins: default_year_bins(),
        }
    }
}
