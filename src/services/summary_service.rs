//! Aggregations behind the dashboard views
//!
//! Everything here is a pure function of an [`AcquisitionTable`], either the
//! full table or a filtered subset. Missing columns fail loudly.

use crate::core::{AcquisitionTable, FrequencyRow, Kpis, RecordColumn};
use color_eyre::Result;
use polars::prelude::*;

/// Name of the count column produced by [`SummaryService::frequency_count`]
pub const COUNT_COLUMN: &str = "count";

/// Value counts for one column, sorted by count descending
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    pub column: RecordColumn,
    frame: DataFrame,
}

impl FrequencyTable {
    /// Two columns: the counted column (as text) and [`COUNT_COLUMN`]
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Keep the first `n` categories
    pub fn head(&self, n: usize) -> Self {
        Self {
            column: self.column,
            frame: self.frame.head(Some(n)),
        }
    }

    pub fn rows(&self) -> Result<Vec<FrequencyRow>> {
        let values = self
            .frame
            .column(self.column.name())?
            .as_materialized_series()
            .str()?
            .clone();
        let counts = self
            .frame
            .column(COUNT_COLUMN)?
            .as_materialized_series()
            .u64()?
            .clone();
        Ok(values
            .into_iter()
            .zip(counts.into_iter())
            .filter_map(|(value, count)| {
                Some(FrequencyRow {
                    value: value?.to_string(),
                    count: count? as usize,
                })
            })
            .collect())
    }

    /// Sum of all counts, i.e. the number of non-missing rows counted
    pub fn total(&self) -> Result<usize> {
        Ok(self.rows()?.iter().map(|r| r.count).sum())
    }
}

/// Service for the summary views
pub struct SummaryService;

impl SummaryService {
    /// Number of unique non-missing values in `column`
    pub fn distinct_count(table: &AcquisitionTable, column: RecordColumn) -> Result<usize> {
        Ok(table.series(column)?.drop_nulls().n_unique()?)
    }

    /// One row per distinct non-missing value with its number of occurrences
    ///
    /// Ties on count are ordered by value so repeated calls agree.
    pub fn frequency_count(table: &AcquisitionTable, column: RecordColumn) -> Result<FrequencyTable> {
        table.series(column)?;
        let name = column.name();
        let frame = table
            .frame()
            .clone()
            .lazy()
            .filter(col(name).is_not_null())
            .select([col(name).cast(DataType::String)])
            .group_by([col(name)])
            .agg([len().cast(DataType::UInt64).alias(COUNT_COLUMN)])
            .sort_by_exprs(
                [col(COUNT_COLUMN), col(name)],
                SortMultipleOptions::default()
                    .with_order_descending_multi([true, false])
                    .with_maintain_order(true),
            )
            .collect()?;
        Ok(FrequencyTable { column, frame })
    }

    /// The `n` rows with the largest (or smallest) `column` values
    ///
    /// Missing values sort last but stay eligible, so a one-row subset always
    /// yields that row. Equal values keep their input order.
    pub fn top_n_by(
        table: &AcquisitionTable,
        column: RecordColumn,
        n: usize,
        descending: bool,
    ) -> Result<AcquisitionTable> {
        table.series(column)?;
        let frame = table
            .frame()
            .clone()
            .lazy()
            .sort_by_exprs(
                [col(column.name())],
                SortMultipleOptions::default()
                    .with_order_descending(descending)
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .limit(n as IdxSize)
            .collect()?;
        Ok(table.derive(frame))
    }

    pub fn kpis(table: &AcquisitionTable) -> Result<Kpis> {
        Ok(Kpis {
            parent_companies: Self::distinct_count(table, RecordColumn::ParentCompany)?,
            acquired_companies: Self::distinct_count(table, RecordColumn::AcquiredCompany)?,
            acquisitions: table.height(),
        })
    }
}
