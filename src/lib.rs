#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_match)]
#![allow(clippy::collapsible_else_if)]

pub mod charts;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod server;
pub mod services;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use charts::{ChartBuilder, ChartTheme, Figure, Palette};
pub use core::{AcquisitionTable, CsvImportOptions, RecordColumn, ViewSettings};
pub use dashboard::{CompanyCharts, CompanyFilter, DashboardContext};
pub use error::DashboardError;
pub use services::{DataService, SummaryService};
