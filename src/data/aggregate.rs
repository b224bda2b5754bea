//! Chart inputs: every function here is a pure summary over a record
//! iterator and accepts empty input.
//!
//! Which record set feeds which function is the caller's business; see
//! `AppState` for the wiring (filtered view vs. full set).

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::model::LayoffRecord;
use super::stats;

/// Length of every top-N ranking.
pub const TOP_N: usize = 10;

/// Number of equal-width bins in the percentage histogram.
pub const HISTOGRAM_BINS: usize = 20;

/// Points on which the density estimate is evaluated.
const KDE_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Monthly totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// First day of the month.
    pub month: NaiveDate,
    pub total: f64,
}

/// Sum of `total_laid_off` per calendar month, ascending by month.
///
/// Only months with at least one dated record appear; absent counts add
/// nothing to their month.
pub fn monthly_totals<'a>(records: impl IntoIterator<Item = &'a LayoffRecord>) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in records {
        let Some(month) = r.date.and_then(|d| d.with_day(1)) else {
            continue;
        };
        *buckets.entry(month).or_default() += r.total_laid_off.unwrap_or(0.0);
    }
    buckets
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

// ---------------------------------------------------------------------------
// Year × month table
// ---------------------------------------------------------------------------

/// Summed layoffs per (year, month); `cells[row][m - 1]` holds month `m` of
/// `years[row]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearMonthTable {
    pub years: Vec<i32>,
    pub cells: Vec<[Option<f64>; 12]>,
}

impl YearMonthTable {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Value for a given year and month number (1–12).
    pub fn get(&self, year: i32, month: u32) -> Option<f64> {
        let row = self.years.binary_search(&year).ok()?;
        let col = month.checked_sub(1)? as usize;
        self.cells[row].get(col).copied().flatten()
    }

    /// Largest defined cell, for colour scaling.
    pub fn max_value(&self) -> Option<f64> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .reduce(f64::max)
    }
}

/// Pivot of summed `total_laid_off`, rows = year, columns = month number.
///
/// A cell is defined only when some record in that year and month has a
/// defined count.
pub fn year_month_table<'a>(records: impl IntoIterator<Item = &'a LayoffRecord>) -> YearMonthTable {
    let mut rows: BTreeMap<i32, [Option<f64>; 12]> = BTreeMap::new();
    for r in records {
        let (Some(year), Some(month)) = (r.derived.year, r.derived.month) else {
            continue;
        };
        let row = rows.entry(year).or_insert([None; 12]);
        if let Some(n) = r.total_laid_off {
            let cell = &mut row[(month - 1) as usize];
            *cell = Some(cell.unwrap_or(0.0) + n);
        }
    }
    // Years whose every cell is undefined carry no information.
    rows.retain(|_, cells| cells.iter().any(Option::is_some));

    let (years, cells): (Vec<i32>, Vec<_>) = rows.into_iter().unzip();
    YearMonthTable { years, cells }
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    pub value: f64,
}

/// The `TOP_N` companies with the most layoff events (rows, not people).
pub fn top_companies_by_events<'a>(
    records: impl IntoIterator<Item = &'a LayoffRecord>,
) -> Vec<RankedEntry> {
    let counts = count_by_first_seen(records.into_iter().map(|r| Some(r.company.as_str())));
    top_n(
        counts
            .into_iter()
            .map(|(label, count)| RankedEntry { label, value: count as f64 })
            .collect(),
    )
}

/// The `TOP_N` industries by mean `total_laid_off`, absent counts ignored.
///
/// Industries without a single defined count are left out.
pub fn top_industries_by_mean<'a>(
    records: impl IntoIterator<Item = &'a LayoffRecord>,
) -> Vec<RankedEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut values: HashMap<String, Vec<f64>> = HashMap::new();
    for r in records {
        let Some(industry) = &r.industry else {
            continue;
        };
        let bucket = values.entry(industry.clone()).or_insert_with(|| {
            order.push(industry.clone());
            Vec::new()
        });
        if let Some(n) = r.total_laid_off {
            bucket.push(n);
        }
    }

    let entries = order
        .into_iter()
        .filter_map(|label| {
            let value = stats::mean(&values[&label])?;
            Some(RankedEntry { label, value })
        })
        .collect();
    top_n(entries)
}

/// Sort descending by value (stable, so ties keep their incoming order) and
/// keep the first `TOP_N`.
fn top_n(mut entries: Vec<RankedEntry>) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries.truncate(TOP_N);
    entries
}

/// Occurrence counts of each present key, in first-seen order.
fn count_by_first_seen<'a>(keys: impl Iterator<Item = Option<&'a str>>) -> Vec<(String, usize)> {
    let mut slot: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys.flatten() {
        match slot.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(key, counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Country distribution (box plots)
// ---------------------------------------------------------------------------

/// Five-number summary plus Tukey whiskers and outliers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within 1.5 × IQR below `q1`.
    pub lower_whisker: f64,
    /// Largest value within 1.5 × IQR above `q3`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarise a set of values; `None` if there are none.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        values.sort_by(f64::total_cmp);
        let q1 = stats::quantile_sorted(&values, 0.25)?;
        let median = stats::quantile_sorted(&values, 0.5)?;
        let q3 = stats::quantile_sorted(&values, 0.75)?;
        let reach = 1.5 * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - reach, q3 + reach);

        let inside = values.iter().copied().filter(|v| (lo_fence..=hi_fence).contains(v));
        let lower_whisker = inside.clone().reduce(f64::min).unwrap_or(q1);
        let upper_whisker = inside.reduce(f64::max).unwrap_or(q3);
        let outliers = values
            .iter()
            .copied()
            .filter(|v| !(lo_fence..=hi_fence).contains(v))
            .collect();

        Some(BoxSummary {
            count: values.len(),
            min: values[0],
            q1,
            median,
            q3,
            max: values[values.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDistribution {
    pub country: String,
    /// Number of records for the country, defined percentage or not.
    pub records: usize,
    /// `None` when none of the country's records has a defined percentage.
    pub summary: Option<BoxSummary>,
}

/// `percentage_laid_off` distribution for the `TOP_N` countries by record
/// count, most frequent first.
pub fn country_distributions<'a, I>(records: I) -> Vec<CountryDistribution>
where
    I: IntoIterator<Item = &'a LayoffRecord>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();
    let mut counts = count_by_first_seen(records.clone().map(|r| r.country.as_deref()));
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_N);

    counts
        .into_iter()
        .map(|(country, n)| {
            let values: Vec<f64> = records
                .clone()
                .filter(|r| r.country.as_deref() == Some(country.as_str()))
                .filter_map(|r| r.derived.percentage_laid_off)
                .collect();
            CountryDistribution {
                country,
                records: n,
                summary: BoxSummary::from_values(values),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Percentage histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Density estimate as `[x, y]` points, scaled to the counts axis.
    /// Empty when it cannot be estimated.
    pub density: Vec<[f64; 2]>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }
}

/// Equal-width histogram of the defined `percentage_laid_off` values over
/// their observed range, with a kernel density overlay.
pub fn percentage_histogram<'a>(records: impl IntoIterator<Item = &'a LayoffRecord>) -> Histogram {
    let values: Vec<f64> = records
        .into_iter()
        .filter_map(|r| r.derived.percentage_laid_off)
        .collect();
    histogram(&values, HISTOGRAM_BINS)
}

fn histogram(values: &[f64], bins: usize) -> Histogram {
    let Some((mut lo, mut hi)) = values
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    else {
        return Histogram::default();
    };
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let edges = stats::linspace(lo, hi, bins + 1);
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        // Bin `i` covers `edges[i]..edges[i + 1]`; the last bin also takes
        // `edges[bins]`, which is the observed maximum.
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let (data_lo, data_hi) = (edges[0], edges[bins]);
    let grid = stats::linspace(data_lo, data_hi, KDE_POINTS);
    let scale = values.len() as f64 * width;
    let density = stats::gaussian_kde(values, &grid)
        .map(|d| grid.iter().zip(d).map(|(&x, y)| [x, y * scale]).collect())
        .unwrap_or_default();

    Histogram {
        edges,
        counts,
        density,
    }
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

pub const CORRELATION_LABELS: [&str; 2] = ["total_laid_off", "percentage_laid_off"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Correlation {
    /// Fewer than two records carry both values.
    InsufficientData { pairs: usize },
    Matrix {
        pairs: usize,
        /// Off-diagonal Pearson coefficient; absent when either variable is
        /// constant.
        coefficient: Option<f64>,
    },
}

impl Correlation {
    /// The symmetric 2×2 matrix ordered as [`CORRELATION_LABELS`].
    pub fn matrix(&self) -> Option<[[Option<f64>; 2]; 2]> {
        match *self {
            Correlation::InsufficientData { .. } => None,
            Correlation::Matrix { coefficient, .. } => {
                Some([[Some(1.0), coefficient], [coefficient, Some(1.0)]])
            }
        }
    }
}

/// Pearson correlation between `total_laid_off` and `percentage_laid_off`
/// over records where both are defined.
pub fn correlation<'a>(records: impl IntoIterator<Item = &'a LayoffRecord>) -> Correlation {
    let pairs: Vec<(f64, f64)> = records
        .into_iter()
        .filter_map(|r| Some((r.total_laid_off?, r.derived.percentage_laid_off?)))
        .collect();
    if pairs.len() < 2 {
        return Correlation::InsufficientData { pairs: pairs.len() };
    }
    Correlation::Matrix {
        pairs: pairs.len(),
        coefficient: stats::pearson(&pairs),
    }
}

// ---------------------------------------------------------------------------
// Stage totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "totals", rename_all = "snake_case")]
pub enum StageTotals {
    /// The dataset has no `stage` column.
    NotApplicable,
    /// Summed layoffs per stage, ascending by total.
    Grouped(Vec<RankedEntry>),
}

/// Sum of `total_laid_off` per `stage`, or `NotApplicable` when the dataset
/// carries no stage column.
pub fn stage_totals<'a>(
    records: impl IntoIterator<Item = &'a LayoffRecord>,
    has_stage_column: bool,
) -> StageTotals {
    if !has_stage_column {
        return StageTotals::NotApplicable;
    }
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();
    for r in records {
        let Some(stage) = &r.stage else {
            continue;
        };
        let sum = sums.entry(stage.clone()).or_insert_with(|| {
            order.push(stage.clone());
            0.0
        });
        *sum += r.total_laid_off.unwrap_or(0.0);
    }

    let mut entries: Vec<RankedEntry> = order
        .into_iter()
        .map(|label| {
            let value = sums[&label];
            RankedEntry { label, value }
        })
        .collect();
    entries.sort_by(|a, b| a.value.total_cmp(&b.value));
    StageTotals::Grouped(entries)
}
