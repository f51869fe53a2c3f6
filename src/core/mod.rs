pub mod models;
pub mod table;
pub mod types;

pub use models::*;
pub use table::AcquisitionTable;
pub use types::*;
