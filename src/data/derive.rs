use std::collections::HashMap;

use chrono::Datelike;

use super::model::{DerivedFields, LayoffRecord};

/// Populate calendar fields and `percentage_laid_off` on every record.
///
/// `percentage_laid_off` is the record's `total_laid_off` over the sum of the
/// defined `total_laid_off` values of all records with the same company, in
/// percent. It stays absent when the record's own count is absent or the
/// company's sum is zero.
pub fn with_derived_fields(mut records: Vec<LayoffRecord>) -> Vec<LayoffRecord> {
    let company_totals = company_totals(&records);

    for record in &mut records {
        let company_total = company_totals.get(&record.company).copied().unwrap_or(0.0);
        record.derived = DerivedFields {
            year: record.date.map(|d| d.year()),
            month: record.date.map(|d| d.month()),
            month_name: record.date.map(|d| d.format("%B").to_string()),
            percentage_laid_off: record
                .total_laid_off
                .filter(|_| company_total > 0.0)
                .map(|n| n * 100.0 / company_total),
        };
    }
    records
}

fn company_totals(records: &[LayoffRecord]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for r in records {
        let entry = totals.entry(r.company.clone()).or_default();
        if let Some(n) = r.total_laid_off {
            *entry += n;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn rec(company: &str, total: Option<f64>) -> LayoffRecord {
        let mut r = LayoffRecord::new(company);
        r.total_laid_off = total;
        r
    }

    #[test]
    fn percentages_split_company_total() {
        let out = with_derived_fields(vec![rec("A", Some(30.0)), rec("A", Some(70.0))]);
        assert_eq!(out[0].derived.percentage_laid_off, Some(30.0));
        assert_eq!(out[1].derived.percentage_laid_off, Some(70.0));
    }

    #[test]
    fn percentages_sum_to_one_hundred_per_company() {
        let out = with_derived_fields(vec![
            rec("A", Some(3.0)),
            rec("B", Some(11.0)),
            rec("A", Some(7.0)),
            rec("A", None),
            rec("B", Some(13.0)),
            rec("A", Some(1.0)),
        ]);
        for company in ["A", "B"] {
            let sum: f64 = out
                .iter()
                .filter(|r| r.company == company)
                .filter_map(|r| r.derived.percentage_laid_off)
                .sum();
            assert!((sum - 100.0).abs() < 1e-6, "{company}: {sum}");
        }
        assert_eq!(out[3].derived.percentage_laid_off, None);
    }

    #[test]
    fn zero_or_unknown_company_total_is_absent() {
        let out = with_derived_fields(vec![
            rec("Zero", Some(0.0)),
            rec("Zero", Some(0.0)),
            rec("Unknown", None),
        ]);
        assert!(out.iter().all(|r| r.derived.percentage_laid_off.is_none()));
    }

    #[test]
    fn calendar_fields_follow_date() {
        let mut dated = rec("A", Some(1.0));
        dated.date = NaiveDate::from_ymd_opt(2024, 9, 3);
        let out = with_derived_fields(vec![dated, rec("B", Some(1.0))]);

        assert_eq!(out[0].derived.year, Some(2024));
        assert_eq!(out[0].derived.month, Some(9));
        assert_eq!(out[0].derived.month_name.as_deref(), Some("September"));
        assert_eq!(out[1].derived.year, None);
        assert_eq!(out[1].derived.month, None);
        assert_eq!(out[1].derived.month_name, None);
    }
}
