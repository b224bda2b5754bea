use std::collections::BTreeSet;

use super::model::{LayoffDataset, LayoffRecord};

// ---------------------------------------------------------------------------
// Filter selection: which countries / industries are chosen in the sidebar
// ---------------------------------------------------------------------------

/// The two inclusion sets driving the filtered view.
///
/// The empty-set semantics differ on purpose:
/// * `countries` empty → nothing selected → no record passes
/// * `industries` empty → no industry restriction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub industries: BTreeSet<String>,
}

impl FilterSelection {
    /// Build a selection from the requested defaults, keeping only values that
    /// actually occur in the dataset.
    pub fn initial(dataset: &LayoffDataset, countries: &[String], industries: &[String]) -> Self {
        FilterSelection {
            countries: known_values(countries, &dataset.countries, "country"),
            industries: known_values(industries, &dataset.industries, "industry"),
        }
    }

    /// Whether a single record passes both inclusion sets.
    pub fn matches(&self, record: &LayoffRecord) -> bool {
        let country_ok = record
            .country
            .as_ref()
            .is_some_and(|c| self.countries.contains(c));
        if !country_ok {
            return false;
        }
        if self.industries.is_empty() {
            return true;
        }
        record
            .industry
            .as_ref()
            .is_some_and(|i| self.industries.contains(i))
    }
}

fn known_values(requested: &[String], available: &[String], label: &str) -> BTreeSet<String> {
    requested
        .iter()
        .filter(|v| {
            let known = available.contains(v);
            if !known {
                log::warn!("Default {label} '{v}' does not occur in the dataset; ignoring it");
            }
            known
        })
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – a read-only projection of the full record set
// ---------------------------------------------------------------------------

/// Indices into the full record set of the records passing a selection.
///
/// Holds no records itself; it is rebuilt from scratch on every selection
/// change and never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// Number of records in the view.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no record passed the filters.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the viewed records of `records` (the full set the view was
    /// built from).
    pub fn records<'a>(
        &'a self,
        records: &'a [LayoffRecord],
    ) -> impl Iterator<Item = &'a LayoffRecord> + Clone + 'a {
        self.indices.iter().map(move |&i| &records[i])
    }
}

/// Return the view of `records` passing `selection`.
pub fn filter(records: &[LayoffRecord], selection: &FilterSelection) -> FilteredView {
    let indices = records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect();
    FilteredView { indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(company: &str, country: &str, industry: Option<&str>) -> LayoffRecord {
        let mut r = LayoffRecord::new(company);
        r.country = Some(country.to_string());
        r.industry = industry.map(str::to_string);
        r
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn country_only_selection() {
        let records = vec![rec("A", "US", Some("Tech")), rec("B", "DE", Some("Tech"))];
        let selection = FilterSelection {
            countries: set(&["US"]),
            industries: BTreeSet::new(),
        };
        let view = filter(&records, &selection);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records(&records).next().map(|r| r.company.as_str()), Some("A"));
    }

    #[test]
    fn empty_countries_yield_empty_view() {
        let records = vec![rec("A", "US", Some("Tech")), rec("B", "DE", None)];
        let selection = FilterSelection {
            countries: BTreeSet::new(),
            industries: set(&["Tech"]),
        };
        assert!(filter(&records, &selection).is_empty());
    }

    #[test]
    fn empty_industries_do_not_restrict() {
        let records = vec![
            rec("A", "US", Some("Tech")),
            rec("B", "US", None),
            rec("C", "US", Some("Retail")),
        ];
        let unrestricted = FilterSelection {
            countries: set(&["US"]),
            industries: BTreeSet::new(),
        };
        assert_eq!(filter(&records, &unrestricted).len(), 3);

        let retail = FilterSelection {
            countries: set(&["US"]),
            industries: set(&["Retail"]),
        };
        let view = filter(&records, &retail);
        let companies: Vec<&str> = view.records(&records).map(|r| r.company.as_str()).collect();
        assert_eq!(companies, vec!["C"]);
    }

    #[test]
    fn absent_country_never_matches() {
        let mut r = LayoffRecord::new("A");
        r.industry = Some("Tech".into());
        let selection = FilterSelection {
            countries: set(&["US"]),
            industries: BTreeSet::new(),
        };
        assert!(!selection.matches(&r));
    }

    #[test]
    fn initial_selection_drops_unknown_defaults() {
        let ds = LayoffDataset::from_records(
            vec![rec("A", "India", Some("Retail"))],
            false,
            Vec::new(),
        );
        let selection = FilterSelection::initial(
            &ds,
            &["United States".to_string(), "India".to_string()],
            &["Space".to_string()],
        );
        assert_eq!(selection.countries, set(&["India"]));
        assert!(selection.industries.is_empty());
    }
}
