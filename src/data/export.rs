use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::filter::FilterSelection;
use super::summary::{FilteredSummaries, FullSetSummaries};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialising summaries: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the dashboard currently shows, as one JSON document.
#[derive(Debug, Serialize)]
pub struct SummaryReport<'a> {
    pub source: Option<&'a Path>,
    pub records: usize,
    pub visible_records: usize,
    pub selected_countries: &'a BTreeSet<String>,
    pub selected_industries: &'a BTreeSet<String>,
    pub filtered: &'a FilteredSummaries,
    pub full_set: &'a FullSetSummaries,
}

impl<'a> SummaryReport<'a> {
    pub fn new(
        source: Option<&'a Path>,
        records: usize,
        visible_records: usize,
        selection: &'a FilterSelection,
        filtered: &'a FilteredSummaries,
        full_set: &'a FullSetSummaries,
    ) -> Self {
        SummaryReport {
            source,
            records,
            visible_records,
            selected_countries: &selection.countries,
            selected_industries: &selection.industries,
            filtered,
            full_set,
        }
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_report<W: Write>(writer: W, report: &SummaryReport<'_>) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Write the report to `path`, replacing any existing file.
pub fn save_report(path: &Path, report: &SummaryReport<'_>) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    write_report(&mut writer, report)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter;
    use crate::data::loader::load_reader;

    #[test]
    fn report_serialises_every_summary() {
        let csv = "company,country,industry,date,total_laid_off,stage\n\
                   A,US,Tech,2023-01-15,30,Seed\n\
                   A,US,Tech,2023-02-15,70,Seed\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        let selection = FilterSelection {
            countries: ["US".to_string()].into(),
            industries: BTreeSet::new(),
        };
        let view = filter(&ds.records, &selection);
        let filtered = FilteredSummaries::compute(&ds, &view);
        let full = FullSetSummaries::compute(&ds);
        let report = SummaryReport::new(None, ds.len(), view.len(), &selection, &filtered, &full);

        let mut out = Vec::new();
        write_report(&mut out, &report).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["visible_records"], 2);
        assert_eq!(json["filtered"]["monthly_totals"][0]["month"], "2023-01-01");
        assert_eq!(json["full_set"]["correlation"]["kind"], "matrix");
        assert_eq!(json["full_set"]["stage_totals"]["kind"], "grouped");
        assert_eq!(json["full_set"]["stage_totals"]["totals"][0]["label"], "Seed");
    }
}
