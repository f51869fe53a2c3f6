use crate::charts::{BarChart, ChartBuilder, Figure};
use crate::core::{AcquisitionTable, Kpis, RecordColumn, ViewSettings};
use crate::services::summary_service::{COUNT_COLUMN, SummaryService};
use color_eyre::Result;

/// Static content of the first tab: headline numbers and five charts
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub kpis: Kpis,
    pub by_parent: Figure,
    pub by_business: Figure,
    pub by_product: Figure,
    pub by_country: Figure,
    pub top_prices: Figure,
}

impl Overview {
    pub fn build(
        table: &AcquisitionTable,
        builder: &ChartBuilder,
        settings: &ViewSettings,
    ) -> Result<Self> {
        let limit = settings.top_categories;
        Ok(Self {
            kpis: SummaryService::kpis(table)?,
            by_parent: frequency_chart(
                table,
                builder,
                RecordColumn::ParentCompany,
                "Acquisitions by parent company",
                false,
                limit,
            )?,
            by_business: frequency_chart(
                table,
                builder,
                RecordColumn::Business,
                "Most acquired business types",
                true,
                limit,
            )?,
            by_product: frequency_chart(
                table,
                builder,
                RecordColumn::DerivedProducts,
                "Most common derived products",
                true,
                limit,
            )?,
            by_country: frequency_chart(
                table,
                builder,
                RecordColumn::Country,
                "Acquired companies by country",
                false,
                limit,
            )?,
            top_prices: price_chart(
                table,
                builder,
                settings.top_prices,
                "Most expensive acquisitions",
            )?,
        })
    }

    /// Figures keyed by the page element that displays them
    pub fn figures(&self) -> [(&'static str, &Figure); 5] {
        [
            ("by-parent", &self.by_parent),
            ("by-business", &self.by_business),
            ("by-product", &self.by_product),
            ("by-country", &self.by_country),
            ("top-prices", &self.top_prices),
        ]
    }
}

/// Bar chart of the `limit` most frequent values of `column`
pub(crate) fn frequency_chart(
    table: &AcquisitionTable,
    builder: &ChartBuilder,
    column: RecordColumn,
    title: &str,
    hide_x_tick_labels: bool,
    limit: usize,
) -> Result<Figure> {
    let counts = SummaryService::frequency_count(table, column)?.head(limit);
    builder.bar_chart(
        counts.frame(),
        &BarChart {
            title,
            x: column.name(),
            y: COUNT_COLUMN,
            color: Some(COUNT_COLUMN),
            hide_x_tick_labels,
        },
    )
}

/// Bar chart of the `n` most expensive acquisitions
pub(crate) fn price_chart(
    table: &AcquisitionTable,
    builder: &ChartBuilder,
    n: usize,
    title: &str,
) -> Result<Figure> {
    let top = SummaryService::top_n_by(table, RecordColumn::AcquisitionPrice, n, true)?;
    builder.bar_chart(
        top.frame(),
        &BarChart {
            title,
            x: RecordColumn::AcquiredCompany.name(),
            y: RecordColumn::AcquisitionPrice.name(),
            color: Some(RecordColumn::AcquisitionPrice.name()),
            hide_x_tick_labels: false,
        },
    )
}
