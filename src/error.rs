use std::path::PathBuf;

use thiserror::Error;

/// Conditions callers need to tell apart.
///
/// These travel inside `color_eyre::Report`; use `report.downcast_ref::<DashboardError>()`
/// to recover them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Data file not found: {}", .0.display())]
    DataFileMissing(PathBuf),

    #[error("Column '{0}' not found in acquisitions table")]
    MissingColumn(String),

    #[error("Unknown color palette: {0}")]
    UnknownPalette(String),

    #[error("CSV delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(String),

    #[error("CSV quote character must be ASCII, got '{0}'")]
    InvalidQuoteChar(String),
}
