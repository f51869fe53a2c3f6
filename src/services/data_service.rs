use crate::core::{
    AcquisitionTable, CsvImportOptions, MISSING_MARKER, RecordColumn, SOURCE_LAYOUT,
    TableMetadata,
};
use crate::error::DashboardError;
use color_eyre::Result;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{debug, info};

/// DataService loads the acquisitions CSV into an [`AcquisitionTable`]
///
/// Loading happens once at process start:
/// - every column is read as text, files without a header are named by position
/// - text values are trimmed and blank values become missing
/// - the year and price columns are coerced to numbers, `-` becoming missing
/// - the price column is renamed for display
/// - columns the dashboard does not use are dropped
pub struct DataService;

impl DataService {
    /// Load and clean the acquisitions file at `path`
    pub fn load_acquisitions(path: &Path, options: &CsvImportOptions) -> Result<AcquisitionTable> {
        if !path.is_file() {
            return Err(DashboardError::DataFileMissing(path.to_path_buf()).into());
        }
        validate_options(options)?;

        let raw = Self::read_as_text(path, options)?;
        for column in RecordColumn::iter() {
            if raw.column(column.source_name()).is_err() {
                return Err(DashboardError::MissingColumn(column.source_name().to_string()).into());
            }
        }

        let cleaned = Self::clean(raw)?;
        for column in RecordColumn::iter().filter(|c| c.is_numeric()) {
            if let Ok(series) = cleaned.column(column.name()) {
                debug!("{column}: {} missing values after coercion", series.null_count());
            }
        }

        let metadata = TableMetadata::new(Some(path.to_path_buf()), cleaned.height());
        info!("Loaded acquisitions table: {metadata}");
        Ok(AcquisitionTable::new(cleaned, metadata))
    }

    /// Load from async code.
    ///
    /// polars drives CSV scans through its own runtime, which cannot start
    /// on a thread already running tokio tasks.
    pub async fn load_acquisitions_async(
        path: PathBuf,
        options: CsvImportOptions,
    ) -> Result<AcquisitionTable> {
        tokio::task::spawn_blocking(move || Self::load_acquisitions(&path, &options)).await?
    }

    fn read_as_text(path: &Path, options: &CsvImportOptions) -> Result<DataFrame> {
        let mut frame = LazyCsvReader::new(path.to_path_buf())
            .with_has_header(options.has_header)
            .with_separator(options.delimiter as u8)
            .with_quote_char(options.quote_char.map(|c| c as u8))
            // Zero inference rows reads every column as String
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        if !options.has_header {
            let names: Vec<String> = frame
                .get_column_names()
                .iter()
                .enumerate()
                .map(|(i, name)| match SOURCE_LAYOUT.get(i) {
                    Some(source) => source.to_string(),
                    None => name.to_string(),
                })
                .collect();
            frame.set_column_names(names)?;
        }
        Ok(frame)
    }

    /// Project the raw text frame onto the seven record columns
    fn clean(raw: DataFrame) -> Result<DataFrame> {
        let projection: Vec<Expr> = RecordColumn::iter()
            .map(|column| {
                if column.is_numeric() {
                    coerce_numeric(column)
                } else {
                    clean_text(column)
                }
            })
            .collect();
        Ok(raw.lazy().select(projection).collect()?)
    }
}

fn validate_options(options: &CsvImportOptions) -> Result<()> {
    if !options.delimiter.is_ascii() {
        return Err(DashboardError::InvalidDelimiter(options.delimiter.to_string()).into());
    }
    if let Some(quote) = options.quote_char.filter(|c| !c.is_ascii()) {
        return Err(DashboardError::InvalidQuoteChar(quote.to_string()).into());
    }
    Ok(())
}

/// Trimmed text; empty strings become missing
fn clean_text(column: RecordColumn) -> Expr {
    let trimmed = col(column.source_name()).str().strip_chars(lit(NULL));
    when(trimmed.clone().eq(lit("")))
        .then(lit(NULL).cast(DataType::String))
        .otherwise(trimmed)
        .alias(column.name())
}

fn coerce_numeric(column: RecordColumn) -> Expr {
    let dtype = match column {
        RecordColumn::AcquisitionYear => DataType::Int32,
        _ => DataType::Float64,
    };
    let trimmed = col(column.source_name()).str().strip_chars(lit(NULL));
    // Non-strict cast: anything else that fails to parse also becomes missing
    when(trimmed.clone().eq(lit(MISSING_MARKER)))
        .then(lit(NULL).cast(dtype.clone()))
        .otherwise(trimmed.cast(dtype))
        .alias(column.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "Parent Company,Acquisition Year,Acquisition Month,Acquired Company,Business,Country,Acquisition Price,Category,Derived Products";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn test_load_coerces_dash_to_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "acq.csv",
            &[
                HEADER,
                "Google,2006,Oct,YouTube,Video sharing,USA,1.65,Video,YouTube",
                "Google,-,-,Keyhole,Mapping,USA,-,Mapping,Google Earth",
                "Yahoo, - ,-,Delicious,Social bookmarking,,n/a,Social,Delicious",
            ],
        );

        let table = DataService::load_acquisitions(&path, &CsvImportOptions::default()).unwrap();
        assert_eq!(table.height(), 3);

        let year = table.series(RecordColumn::AcquisitionYear).unwrap();
        assert_eq!(year.dtype(), &DataType::Int32);
        assert_eq!(year.null_count(), 2);

        let price = table.series(RecordColumn::AcquisitionPrice).unwrap();
        assert_eq!(price.dtype(), &DataType::Float64);
        assert_eq!(
            table.numeric_values(RecordColumn::AcquisitionPrice).unwrap(),
            vec![Some(1.65), None, None]
        );
    }

    #[test]
    fn test_load_projects_record_columns_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "acq.csv",
            &[HEADER, "Apple,2010,Apr,Siri,Speech recognition,USA,0.2,AI,Siri"],
        );

        let table = DataService::load_acquisitions(&path, &CsvImportOptions::default()).unwrap();
        let names: Vec<String> = table
            .frame()
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        let expected: Vec<String> = RecordColumn::iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, expected);
        assert_eq!(table.metadata().source_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_empty_country_loads_as_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "acq.csv",
            &[HEADER, "Yahoo,2013,May,Tumblr,Blogging,,1.1,Social,Tumblr"],
        );

        let table = DataService::load_acquisitions(&path, &CsvImportOptions::default()).unwrap();
        assert_eq!(
            table.text_values(RecordColumn::Country).unwrap(),
            vec![None]
        );
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");
        let err = DataService::load_acquisitions(&path, &CsvImportOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::DataFileMissing(path))
        );
    }

    #[test]
    fn test_missing_required_column_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "acq.csv",
            &["Parent Company,Acquired Company", "Google,YouTube"],
        );
        let err = DataService::load_acquisitions(&path, &CsvImportOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::MissingColumn("Business".to_string()))
        );
    }

    #[test]
    fn test_blank_text_loads_as_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "acq.csv",
            &[
                HEADER,
                "Yahoo,2013,May,Tumblr,Blogging, ,1.1,Social,Tumblr",
                "Yahoo,2005,Mar, Flickr ,Photo sharing,,0.025,Social,Flickr",
            ],
        );

        let table = DataService::load_acquisitions(&path, &CsvImportOptions::default()).unwrap();
        assert_eq!(
            table.text_values(RecordColumn::Country).unwrap(),
            vec![None, None]
        );
        assert_eq!(
            table.text_values(RecordColumn::AcquiredCompany).unwrap(),
            vec![Some("Tumblr".to_string()), Some("Flickr".to_string())]
        );
    }

    #[test]
    fn test_headerless_file_uses_column_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "acq.csv",
            &[
                "Google,2006,Oct,YouTube,Video sharing,USA,1.65,Video,YouTube",
                "Google,-,-,Keyhole,Mapping,USA,-,Mapping,Google Earth",
            ],
        );
        let options = CsvImportOptions {
            has_header: false,
            ..CsvImportOptions::default()
        };

        let table = DataService::load_acquisitions(&path, &options).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(
            table.text_values(RecordColumn::AcquiredCompany).unwrap(),
            vec![Some("YouTube".to_string()), Some("Keyhole".to_string())]
        );
        assert_eq!(
            table.numeric_values(RecordColumn::AcquisitionPrice).unwrap(),
            vec![Some(1.65), None]
        );
    }

    #[test]
    fn test_non_ascii_separators_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "acq.csv", &[HEADER]);

        let options = CsvImportOptions {
            delimiter: '§',
            ..CsvImportOptions::default()
        };
        let err = DataService::load_acquisitions(&path, &options).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::InvalidDelimiter("§".into()))
        );

        let options = CsvImportOptions {
            quote_char: Some('«'),
            ..CsvImportOptions::default()
        };
        let err = DataService::load_acquisitions(&path, &options).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::InvalidQuoteChar("«".into()))
        );
    }

    #[tokio::test]
    async fn test_load_from_async_context() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "acq.csv",
            &[HEADER, "Twitter,2012,Oct,Vine,Video sharing,USA,0.03,Video,Twitter"],
        );

        let table = DataService::load_acquisitions_async(path, CsvImportOptions::default())
            .await
            .unwrap();
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn test_custom_delimiter() {
        let dir = TempDir::new().unwrap();
        let header = HEADER.replace(',', "\t");
        let path = write_csv(
            dir.path(),
            "acq.tsv",
            &[
                header.as_str(),
                "IBM\t2019\tJul\tRed Hat\tOpen source software\tUSA\t34\tSoftware\tOpenShift",
            ],
        );
        let options = CsvImportOptions {
            has_header: true,
            delimiter: '\t',
            quote_char: None,
        };

        let table = DataService::load_acquisitions(&path, &options).unwrap();
        assert_eq!(
            table.numeric_values(RecordColumn::AcquisitionPrice).unwrap(),
            vec![Some(34.0)]
        );
    }
}
