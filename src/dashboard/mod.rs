pub mod company_view;
pub mod overview;
pub mod page;

pub use company_view::{CompanyCharts, CompanyFilter, CompanyView, COUNTRIES_NOT_DISCLOSED};
pub use overview::Overview;

use crate::charts::ChartBuilder;
use crate::core::{AcquisitionTable, ViewSettings};
use color_eyre::Result;
use tracing::info;

/// Everything the HTTP layer needs, computed once from the loaded table
#[derive(Debug, Clone)]
pub struct DashboardContext {
    table: AcquisitionTable,
    builder: ChartBuilder,
    settings: ViewSettings,
    overview: Overview,
    companies: Vec<String>,
    page: String,
    debug: bool,
}

impl DashboardContext {
    pub fn build(
        table: AcquisitionTable,
        builder: ChartBuilder,
        settings: ViewSettings,
        debug: bool,
    ) -> Result<Self> {
        let overview = Overview::build(&table, &builder, &settings)?;
        let companies = table.companies()?;
        let mut context = Self {
            table,
            builder,
            settings,
            overview,
            companies,
            page: String::new(),
            debug,
        };
        context.page = context.render_page()?;
        info!(
            "Dashboard ready: {} acquisitions, {} parent companies, palette {}",
            context.overview.kpis.acquisitions,
            context.companies.len(),
            context.builder.theme().palette
        );
        Ok(context)
    }

    /// Page rendered at startup
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Render the page again from the current table
    pub fn render_page(&self) -> Result<String> {
        let initial = self.company_charts(&CompanyFilter::All)?;
        page::render(&page::PageData {
            kpis: &self.overview.kpis,
            overview: self.overview.figures(),
            companies: &self.companies,
            initial: &initial,
            metadata: self.table.metadata(),
        })
    }

    pub fn company_charts(&self, filter: &CompanyFilter) -> Result<CompanyCharts> {
        CompanyView::new(&self.table, &self.builder, &self.settings).update(filter)
    }

    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }
}
