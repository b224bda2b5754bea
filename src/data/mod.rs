/// Data layer: loading, derived fields, filtering and chart aggregations.
///
/// Architecture:
/// ```text
///   layoffs.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Vec<LayoffRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  year / month / month_name / percentage_laid_off
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LayoffDataset │  immutable full record set
///   └──────────────┘
///        │                       │
///        ▼                       ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter   │ ──────▶ │ aggregate  │  per-chart summaries
///   └──────────┘          └───────────┘
/// ```

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
pub mod summary;
