use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::derive::with_derived_fields;
use super::error::{DataLoadError, DataWarning};
use super::model::{LayoffDataset, LayoffRecord};

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["company", "country", "industry", "date", "total_laid_off"];

/// Optional column; its absence degrades the stage chart to "not applicable".
pub const STAGE_COLUMN: &str = "stage";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the layoff dataset from a CSV file and compute derived fields.
pub fn load_file(path: &Path) -> Result<LayoffDataset, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file)?;
    log::info!(
        "Loaded {} records from {} ({} countries, {} industries)",
        dataset.len(),
        path.display(),
        dataset.countries.len(),
        dataset.industries.len()
    );
    Ok(dataset)
}

/// Load the dataset from any CSV byte source.
///
/// The header row must name every column in [`REQUIRED_COLUMNS`]; the order is
/// free and extra columns are ignored.
pub fn load_reader<R: Read>(source: R) -> Result<LayoffDataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn(column));
        }
    }

    let has_stage_column = headers.iter().any(|h| h == STAGE_COLUMN);
    let mut warnings = Vec::new();
    if !has_stage_column {
        let warning = DataWarning::MissingColumn(STAGE_COLUMN);
        log::warn!("{warning}");
        warnings.push(warning);
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_no = idx + 1;
        let raw: RawRow = result?.deserialize(Some(&headers))?;
        records.push(raw.into_record(row_no)?);
    }

    let records = with_derived_fields(records);
    Ok(LayoffDataset::from_records(records, has_stage_column, warnings))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// One CSV row as text; empty cells arrive as `None`.
#[derive(Debug, Deserialize)]
struct RawRow {
    company: Option<String>,
    country: Option<String>,
    industry: Option<String>,
    #[serde(default)]
    stage: Option<String>,
    date: Option<String>,
    total_laid_off: Option<String>,
}

impl RawRow {
    fn into_record(self, row: usize) -> Result<LayoffRecord, DataLoadError> {
        let company = self.company.ok_or(DataLoadError::MissingValue {
            row,
            column: "company",
        })?;

        let date = match self.date {
            Some(text) => Some(
                parse_date(&text).ok_or(DataLoadError::InvalidDate { row, value: text })?,
            ),
            None => None,
        };

        let total_laid_off = match self.total_laid_off {
            Some(text) => Some(parse_count(&text).ok_or(DataLoadError::InvalidNumber {
                row,
                column: "total_laid_off",
                value: text,
            })?),
            None => None,
        };

        Ok(LayoffRecord {
            country: self.country,
            industry: self.industry,
            stage: self.stage,
            date,
            total_laid_off,
            ..LayoffRecord::new(company)
        })
    }
}

/// Parse a calendar date, accepting the layouts commonly found in exports.
/// Time-of-day components are discarded.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
    ];

    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

fn parse_count(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
company,location,industry,total_laid_off,date,stage,country
Acme,SF Bay Area,Retail,30,2023-01-15,Post-IPO,United States
Acme,SF Bay Area,Retail,70,2023-03-02,Post-IPO,United States
Globex,Berlin,,,2022-11-30,Series B,Germany
Initech,Austin,Fintech,12.0,01/05/2024,,United States
";

    #[test]
    fn loads_rows_and_derived_fields() {
        let ds = load_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);
        assert!(ds.has_stage_column);
        assert!(ds.warnings.is_empty());
        assert_eq!(ds.countries, vec!["United States", "Germany"]);
        assert_eq!(ds.industries, vec!["Retail", "Fintech"]);

        let globex = &ds.records[2];
        assert_eq!(globex.industry, None);
        assert_eq!(globex.total_laid_off, None);
        assert_eq!(globex.stage.as_deref(), Some("Series B"));
        assert_eq!(globex.derived.year, Some(2022));
        assert_eq!(globex.derived.percentage_laid_off, None);

        let initech = &ds.records[3];
        assert_eq!(initech.date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(initech.total_laid_off, Some(12.0));
        assert_eq!(initech.stage, None);

        assert_eq!(ds.records[0].derived.percentage_laid_off, Some(30.0));
        assert_eq!(ds.records[1].derived.percentage_laid_off, Some(70.0));
    }

    #[test]
    fn missing_stage_column_is_a_warning() {
        let csv = "company,country,industry,date,total_laid_off\nA,US,Tech,2023-02-01,5\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert!(!ds.has_stage_column);
        assert_eq!(ds.warnings, vec![DataWarning::MissingColumn("stage")]);
        assert_eq!(ds.records[0].stage, None);
    }

    #[test]
    fn missing_required_column_fails() {
        let csv = "company,country,date,total_laid_off\nA,US,2023-02-01,5\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn("industry")));
    }

    #[test]
    fn unparsable_date_fails_with_row() {
        let csv = "company,country,industry,date,total_laid_off\nA,US,Tech,2023-02-01,5\nB,US,Tech,soon,5\n";
        match load_reader(csv.as_bytes()).unwrap_err() {
            DataLoadError::InvalidDate { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_count_is_rejected() {
        let csv = "company,country,industry,date,total_laid_off\nA,US,Tech,2023-02-01,-3\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidNumber { row: 1, .. }));
    }

    #[test]
    fn empty_company_is_rejected() {
        let csv = "company,country,industry,date,total_laid_off\n,US,Tech,2023-02-01,3\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingValue { row: 1, column: "company" }
        ));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let csv = "company,country,industry,date,total_laid_off\nA,US,Tech\n";
        assert!(matches!(
            load_reader(csv.as_bytes()).unwrap_err(),
            DataLoadError::Csv(_)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/layoffs.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2023, 4, 7);
        assert_eq!(parse_date("2023-04-07"), expected);
        assert_eq!(parse_date("04/07/2023"), expected);
        assert_eq!(parse_date("2023-04-07T13:45:00"), expected);
        assert_eq!(parse_date("2023-04-07 13:45:00.250"), expected);
        assert_eq!(parse_date("2023-04-07T13:45:00Z"), expected);
        assert_eq!(parse_date("April 7"), None);
    }
}
