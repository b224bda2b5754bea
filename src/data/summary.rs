use serde::Serialize;

use super::aggregate::{
    self, CountryDistribution, Correlation, Histogram, MonthlyTotal, RankedEntry, StageTotals,
    YearMonthTable,
};
use super::filter::FilteredView;
use super::model::LayoffDataset;

/// Charts driven by the full, unfiltered record set.
///
/// Depends only on the dataset, so it is computed once per load.
#[derive(Debug, Clone, Serialize)]
pub struct FullSetSummaries {
    pub year_month: YearMonthTable,
    pub top_industries: Vec<RankedEntry>,
    pub country_distributions: Vec<CountryDistribution>,
    pub percentage_histogram: Histogram,
    pub correlation: Correlation,
    pub stage_totals: StageTotals,
}

impl FullSetSummaries {
    pub fn compute(dataset: &LayoffDataset) -> Self {
        let records = &dataset.records;
        FullSetSummaries {
            year_month: aggregate::year_month_table(records),
            top_industries: aggregate::top_industries_by_mean(records),
            country_distributions: aggregate::country_distributions(records),
            percentage_histogram: aggregate::percentage_histogram(records),
            correlation: aggregate::correlation(records),
            stage_totals: aggregate::stage_totals(records, dataset.has_stage_column),
        }
    }
}

/// Charts driven by the current filtered view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilteredSummaries {
    pub monthly_totals: Vec<MonthlyTotal>,
    pub top_companies: Vec<RankedEntry>,
}

impl FilteredSummaries {
    pub fn compute(dataset: &LayoffDataset, view: &FilteredView) -> Self {
        FilteredSummaries {
            monthly_totals: aggregate::monthly_totals(view.records(&dataset.records)),
            top_companies: aggregate::top_companies_by_events(view.records(&dataset.records)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterSelection};
    use crate::data::loader::load_reader;

    const CSV: &str = "\
company,country,industry,date,total_laid_off
Acme,United States,Retail,2023-01-15,30
Acme,United States,Retail,2023-02-02,70
Globex,Germany,Retail,2023-01-20,10
";

    #[test]
    fn filtered_charts_follow_selection_full_set_charts_do_not() {
        let ds = load_reader(CSV.as_bytes()).unwrap();
        let full = FullSetSummaries::compute(&ds);

        let selection = FilterSelection {
            countries: ["Germany".to_string()].into(),
            industries: Default::default(),
        };
        let view = filter(&ds.records, &selection);
        let filtered = FilteredSummaries::compute(&ds, &view);

        assert_eq!(filtered.monthly_totals.len(), 1);
        assert_eq!(filtered.monthly_totals[0].total, 10.0);
        assert_eq!(filtered.top_companies[0].label, "Globex");

        assert_eq!(full.year_month.get(2023, 1), Some(40.0));
        assert_eq!(full.top_industries[0].value, 110.0 / 3.0);
        assert_eq!(full.stage_totals, StageTotals::NotApplicable);
    }

    #[test]
    fn empty_view_gives_empty_summaries() {
        let ds = load_reader(CSV.as_bytes()).unwrap();
        let view = filter(&ds.records, &FilterSelection::default());
        let filtered = FilteredSummaries::compute(&ds, &view);
        assert!(filtered.monthly_totals.is_empty());
        assert!(filtered.top_companies.is_empty());
    }
}
