use crate::core::models::TableMetadata;
use crate::core::types::RecordColumn;
use crate::error::DashboardError;
use color_eyre::Result;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Cleaned acquisitions table shared read-only by every view
///
/// Built once at startup and never mutated. Filtering produces a new table;
/// cloning is cheap because polars columns are reference counted.
#[derive(Debug, Clone)]
pub struct AcquisitionTable {
    df: DataFrame,
    metadata: TableMetadata,
}

impl AcquisitionTable {
    pub fn new(df: DataFrame, metadata: TableMetadata) -> Self {
        Self { df, metadata }
    }

    /// Wrap a frame that did not come from a file (tests, derived views)
    pub fn from_frame(df: DataFrame) -> Self {
        let metadata = TableMetadata::new(None, df.height());
        Self { df, metadata }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Look up a column, failing loudly when the table does not have it
    pub fn series(&self, column: RecordColumn) -> Result<&Series> {
        let found = self
            .df
            .column(column.name())
            .map_err(|_| DashboardError::MissingColumn(column.name().to_string()))?;
        Ok(found.as_materialized_series())
    }

    pub fn text_values(&self, column: RecordColumn) -> Result<Vec<Option<String>>> {
        let as_text = self.series(column)?.cast(&DataType::String)?;
        Ok(as_text
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    pub fn numeric_values(&self, column: RecordColumn) -> Result<Vec<Option<f64>>> {
        let as_float = self.series(column)?.cast(&DataType::Float64)?;
        Ok(as_float.f64()?.into_iter().collect())
    }

    /// Rows whose Parent Company equals `company` exactly
    pub fn filter_company(&self, company: &str) -> Result<Self> {
        self.series(RecordColumn::ParentCompany)?;
        let subset = self
            .df
            .clone()
            .lazy()
            .filter(col(RecordColumn::ParentCompany.name()).eq(lit(company)))
            .collect()?;
        Ok(self.derive(subset))
    }

    /// Sorted distinct Parent Company values, for the selector
    pub fn companies(&self) -> Result<Vec<String>> {
        let names: BTreeSet<String> = self
            .text_values(RecordColumn::ParentCompany)?
            .into_iter()
            .flatten()
            .collect();
        Ok(names.into_iter().collect())
    }

    /// New table over `df` that keeps this table's provenance
    pub(crate) fn derive(&self, df: DataFrame) -> Self {
        let mut metadata = self.metadata.clone();
        metadata.row_count = df.height();
        Self { df, metadata }
    }
}
