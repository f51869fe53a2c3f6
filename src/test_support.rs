//! Shared fixtures for unit tests

use crate::core::AcquisitionTable;
use polars::prelude::*;

/// Six acquisitions across three parents.
///
/// Alpha has three rows, Beta exactly one, and every Gamma row has an
/// undisclosed country.
pub(crate) fn fixture_table() -> AcquisitionTable {
    let df = df!(
        "Parent Company" => ["Alpha", "Alpha", "Alpha", "Beta", "Gamma", "Gamma"],
        "Acquired Company" => ["A1", "A2", "A3", "B1", "G1", "G2"],
        "Business" => [Some("Search"), Some("Search"), Some("Ads"), Some("Games"), Some("Ads"), Some("Video")],
        "Country" => [Some("USA"), Some("UK"), Some("USA"), None, None, None],
        "Derived Products" => [Some("P1"), Some("P2"), Some("P1"), Some("P3"), None, Some("P3")],
        "Acquisition Year" => [Some(2010i32), Some(2012), None, Some(2015), Some(2018), Some(2019)],
        "Acquisition Price in Billions" => [Some(1.5f64), Some(3.0), None, Some(0.5), None, Some(2.0)]
    )
    .expect("fixture frame");
    AcquisitionTable::from_frame(df)
}
