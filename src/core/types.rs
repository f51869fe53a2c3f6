use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoStaticStr};

/// Literal used in the source file for "not disclosed" numeric values
pub const MISSING_MARKER: &str = "-";

/// Column order of the acquisitions file, used to name the columns of a
/// file without a header row
pub const SOURCE_LAYOUT: [&str; 9] = [
    "Parent Company",
    "Acquisition Year",
    "Acquisition Month",
    "Acquired Company",
    "Business",
    "Country",
    "Acquisition Price",
    "Category",
    "Derived Products",
];

/// Columns of an acquisition record, as they appear after loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum RecordColumn {
    #[strum(serialize = "Parent Company")]
    ParentCompany,
    #[strum(serialize = "Acquired Company")]
    AcquiredCompany,
    #[strum(serialize = "Business")]
    Business,
    #[strum(serialize = "Country")]
    Country,
    #[strum(serialize = "Derived Products")]
    DerivedProducts,
    #[strum(serialize = "Acquisition Year")]
    AcquisitionYear,
    #[strum(serialize = "Acquisition Price in Billions")]
    AcquisitionPrice,
}

impl RecordColumn {
    /// Column name in the loaded table
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Column name in the CSV file. Only the price column is renamed on load.
    pub fn source_name(self) -> &'static str {
        match self {
            Self::AcquisitionPrice => "Acquisition Price",
            other => other.name(),
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::AcquisitionYear | Self::AcquisitionPrice)
    }
}

impl fmt::Display for RecordColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// CSV import options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvImportOptions {
    #[serde(default = "default_has_header")]
    pub has_header: bool,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_quote_char")]
    pub quote_char: Option<char>,
}

fn default_has_header() -> bool {
    true
}

fn default_delimiter() -> char {
    ','
}

fn default_quote_char() -> Option<char> {
    Some('"')
}

impl Default for CsvImportOptions {
    fn default() -> Self {
        Self {
            has_header: default_has_header(),
            delimiter: default_delimiter(),
            quote_char: default_quote_char(),
        }
    }
}
