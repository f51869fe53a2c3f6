use crate::charts::{ChartBuilder, Figure};
use crate::core::{AcquisitionTable, RecordColumn, ViewSettings};
use crate::dashboard::overview::{frequency_chart, price_chart};
use color_eyre::Result;
use serde::Serialize;
use tracing::debug;

pub const COUNTRIES_NOT_DISCLOSED: &str = "Countries not disclosed for this selection";

/// Company selector state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CompanyFilter {
    /// Initial state, every row
    #[default]
    All,
    /// Rows whose Parent Company matches exactly
    Company(String),
}

impl CompanyFilter {
    /// Missing or blank selections mean "all companies"
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection {
            Some(name) if !name.trim().is_empty() => Self::Company(name.to_string()),
            _ => Self::All,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all companies",
            Self::Company(name) => name,
        }
    }

    pub fn apply(&self, table: &AcquisitionTable) -> Result<AcquisitionTable> {
        match self {
            Self::All => Ok(table.clone()),
            Self::Company(name) => table.filter_company(name),
        }
    }
}

/// The three charts on the "By company" tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyCharts {
    pub company: Option<String>,
    pub acquisitions: usize,
    pub year_histogram: Figure,
    pub countries: Figure,
    pub top_prices: Figure,
}

/// Recomputes the filtered charts whenever the selector changes
pub struct CompanyView<'a> {
    table: &'a AcquisitionTable,
    builder: &'a ChartBuilder,
    settings: &'a ViewSettings,
}

impl<'a> CompanyView<'a> {
    pub fn new(
        table: &'a AcquisitionTable,
        builder: &'a ChartBuilder,
        settings: &'a ViewSettings,
    ) -> Self {
        Self {
            table,
            builder,
            settings,
        }
    }

    pub fn update(&self, filter: &CompanyFilter) -> Result<CompanyCharts> {
        let subset = filter.apply(self.table)?;
        let label = filter.label();
        debug!("Recomputing company charts for {label}: {} rows", subset.height());

        let year_histogram = self.builder.histogram(
            subset.frame(),
            &format!("Acquisitions per year: {label}"),
            RecordColumn::AcquisitionYear.name(),
            self.settings.year_bins,
        )?;

        let countries_title = format!("Acquired companies by country: {label}");
        let countries = if countries_undisclosed(&subset)? {
            self.builder
                .placeholder(&countries_title, COUNTRIES_NOT_DISCLOSED)
        } else {
            frequency_chart(
                &subset,
                self.builder,
                RecordColumn::Country,
                &countries_title,
                false,
                self.settings.top_categories,
            )?
        };

        let top_prices = price_chart(
            &subset,
            self.builder,
            self.settings.top_prices,
            &format!("Most expensive acquisitions: {label}"),
        )?;

        Ok(CompanyCharts {
            company: match filter {
                CompanyFilter::All => None,
                CompanyFilter::Company(name) => Some(name.clone()),
            },
            acquisitions: subset.height(),
            year_histogram,
            countries,
            top_prices,
        })
    }
}

/// True when there is no country to plot: no rows, or every country missing
pub fn countries_undisclosed(subset: &AcquisitionTable) -> Result<bool> {
    let country = subset.series(RecordColumn::Country)?;
    Ok(subset.is_empty() || country.null_count() == country.len())
}
