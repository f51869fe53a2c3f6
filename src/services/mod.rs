pub mod data_service;
pub mod summary_service;

pub use data_service::DataService;
pub use summary_service::{FrequencyTable, SummaryService};
