use std::collections::HashSet;

use chrono::NaiveDate;

use super::error::DataWarning;

// ---------------------------------------------------------------------------
// LayoffRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single layoff event (one row of the source CSV).
///
/// Numeric fields that may be missing in the source are `Option`s; an absent
/// value is never the same thing as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoffRecord {
    pub company: String,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub stage: Option<String>,
    pub date: Option<NaiveDate>,
    pub total_laid_off: Option<f64>,
    /// Filled in once after loading, see [`crate::data::derive`].
    pub derived: DerivedFields,
}

/// Per-record values computed from the other columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedFields {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub month_name: Option<String>,
    /// Share of the company's summed `total_laid_off`, in percent.
    pub percentage_laid_off: Option<f64>,
}

impl LayoffRecord {
    /// A record with only the base columns set; derived fields are empty.
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            country: None,
            industry: None,
            stage: None,
            date: None,
            total_laid_off: None,
            derived: DerivedFields::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// LayoffDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full record set, immutable once built.
#[derive(Debug, Clone)]
pub struct LayoffDataset {
    /// All records, in file order, with derived fields populated.
    pub records: Vec<LayoffRecord>,
    /// Whether the source file carried a `stage` column at all.
    pub has_stage_column: bool,
    /// Distinct countries in first-seen order (absent values skipped).
    pub countries: Vec<String>,
    /// Distinct industries in first-seen order (absent values skipped).
    pub industries: Vec<String>,
    /// Non-fatal issues found while loading.
    pub warnings: Vec<DataWarning>,
}

impl LayoffDataset {
    /// Build the dataset from records whose derived fields are already set.
    pub fn from_records(
        records: Vec<LayoffRecord>,
        has_stage_column: bool,
        warnings: Vec<DataWarning>,
    ) -> Self {
        let countries = distinct(records.iter().filter_map(|r| r.country.as_deref()));
        let industries = distinct(records.iter().filter_map(|r| r.industry.as_deref()));
        LayoffDataset {
            records,
            has_stage_column,
            countries,
            industries,
            warnings,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let mut a = LayoffRecord::new("A");
        a.country = Some("India".into());
        a.industry = Some("Retail".into());
        let mut b = LayoffRecord::new("B");
        b.country = Some("Brazil".into());
        let mut c = LayoffRecord::new("C");
        c.country = Some("India".into());
        c.industry = Some("Fintech".into());

        let ds = LayoffDataset::from_records(vec![a, b, c], false, Vec::new());
        assert_eq!(ds.countries, vec!["India", "Brazil"]);
        assert_eq!(ds.industries, vec!["Retail", "Fintech"]);
        assert_eq!(ds.len(), 3);
    }
}
