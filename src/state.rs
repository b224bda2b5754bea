use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::export::{save_report, ExportError, SummaryReport};
use crate::data::filter::{filter, FilterSelection, FilteredView};
use crate::data::model::{LayoffDataset, LayoffRecord};
use crate::data::summary::{FilteredSummaries, FullSetSummaries};

// ---------------------------------------------------------------------------
// Dashboard tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Trends,
    CompanyIndustry,
    Countries,
    Distributions,
    Stage,
    Records,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Trends,
        Tab::CompanyIndustry,
        Tab::Countries,
        Tab::Distributions,
        Tab::Stage,
        Tab::Records,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Trends => "📈 Trends Over Time",
            Tab::CompanyIndustry => "🏢 Company & Industry Insights",
            Tab::Countries => "🌍 Country-Level Patterns",
            Tab::Distributions => "📊 Statistical Distributions",
            Tab::Stage => "💰 Company Stage",
            Tab::Records => "📋 Records",
        }
    }
}

/// Which of the two selection sets a sidebar action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Country,
    Industry,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset; immutable and shared, replaced wholesale on reload.
    pub dataset: Arc<LayoffDataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Current sidebar selections.
    pub selection: FilterSelection,

    /// Records passing the current selection.
    pub view: FilteredView,

    /// Charts over the full set, computed once per dataset.
    pub full_set: FullSetSummaries,

    /// Charts over the filtered view, recomputed on every selection change.
    pub filtered: FilteredSummaries,

    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state for a freshly loaded dataset and initial selection.
    pub fn new(dataset: LayoffDataset, source: Option<PathBuf>, selection: FilterSelection) -> Self {
        let full_set = FullSetSummaries::compute(&dataset);
        let mut state = Self {
            dataset: Arc::new(dataset),
            source,
            selection,
            view: FilteredView::default(),
            full_set,
            filtered: FilteredSummaries::default(),
            active_tab: Tab::default(),
            status_message: None,
        };
        state.status_message = state.warning_message();
        state.refilter();
        state
    }

    /// Swap in a newly loaded dataset, keeping the selections that still
    /// apply to it.
    pub fn set_dataset(&mut self, dataset: LayoffDataset, source: PathBuf) {
        let countries: Vec<String> = self.selection.countries.iter().cloned().collect();
        let industries: Vec<String> = self.selection.industries.iter().cloned().collect();
        let selection = FilterSelection::initial(&dataset, &countries, &industries);

        self.full_set = FullSetSummaries::compute(&dataset);
        self.dataset = Arc::new(dataset);
        self.source = Some(source);
        self.selection = selection;
        self.status_message = self.warning_message();
        self.refilter();
    }

    fn warning_message(&self) -> Option<String> {
        if self.dataset.warnings.is_empty() {
            return None;
        }
        let text: Vec<String> = self.dataset.warnings.iter().map(ToString::to_string).collect();
        Some(text.join("; "))
    }

    /// Recompute the filtered view and everything derived from it.
    pub fn refilter(&mut self) {
        self.view = filter(&self.dataset.records, &self.selection);
        self.filtered = FilteredSummaries::compute(&self.dataset, &self.view);
        log::debug!(
            "Refiltered: {} countries, {} industries selected → {} of {} records",
            self.selection.countries.len(),
            self.selection.industries.len(),
            self.view.len(),
            self.dataset.len()
        );
    }

    /// Records in the current filtered view.
    pub fn visible_records(&self) -> impl Iterator<Item = &LayoffRecord> + Clone + '_ {
        self.view.records(&self.dataset.records)
    }

    /// All distinct values available for a selection set.
    pub fn options(&self, kind: SelectionKind) -> &[String] {
        match kind {
            SelectionKind::Country => &self.dataset.countries,
            SelectionKind::Industry => &self.dataset.industries,
        }
    }

    pub fn selected(&self, kind: SelectionKind) -> &BTreeSet<String> {
        match kind {
            SelectionKind::Country => &self.selection.countries,
            SelectionKind::Industry => &self.selection.industries,
        }
    }

    fn selected_mut(&mut self, kind: SelectionKind) -> &mut BTreeSet<String> {
        match kind {
            SelectionKind::Country => &mut self.selection.countries,
            SelectionKind::Industry => &mut self.selection.industries,
        }
    }

    /// Toggle a single value in a selection set.
    pub fn toggle(&mut self, kind: SelectionKind, value: &str) {
        let selected = self.selected_mut(kind);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every available value.
    pub fn select_all(&mut self, kind: SelectionKind) {
        let all: BTreeSet<String> = self.options(kind).iter().cloned().collect();
        *self.selected_mut(kind) = all;
        self.refilter();
    }

    /// Clear a selection set.
    pub fn select_none(&mut self, kind: SelectionKind) {
        self.selected_mut(kind).clear();
        self.refilter();
    }

    /// Write every current summary as JSON to `path`.
    pub fn export_summaries(&self, path: &Path) -> Result<(), ExportError> {
        let report = SummaryReport::new(
            self.source.as_deref(),
            self.dataset.len(),
            self.view.len(),
            &self.selection,
            &self.filtered,
            &self.full_set,
        );
        save_report(path, &report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    const CSV: &str = "\
company,country,industry,date,total_laid_off
Acme,United States,Retail,2023-01-15,30
Acme,United States,Fintech,2023-02-02,70
Globex,Germany,Retail,2023-01-20,10
";

    fn state() -> AppState {
        let ds = load_reader(CSV.as_bytes()).unwrap();
        let selection = FilterSelection::initial(&ds, &["United States".to_string()], &[]);
        AppState::new(ds, None, selection)
    }

    #[test]
    fn starts_with_default_selection_applied() {
        let s = state();
        assert_eq!(s.view.len(), 2);
        assert_eq!(s.filtered.top_companies[0].label, "Acme");
        assert!(s.status_message.as_deref().unwrap().contains("stage"));
    }

    #[test]
    fn toggling_refilters() {
        let mut s = state();
        s.toggle(SelectionKind::Industry, "Retail");
        assert_eq!(s.view.len(), 1);
        assert_eq!(s.filtered.monthly_totals[0].total, 30.0);

        s.toggle(SelectionKind::Industry, "Retail");
        assert_eq!(s.view.len(), 2);

        s.select_none(SelectionKind::Country);
        assert!(s.view.is_empty());
        assert!(s.filtered.monthly_totals.is_empty());

        s.select_all(SelectionKind::Country);
        assert_eq!(s.view.len(), 3);
        assert_eq!(s.visible_records().count(), 3);
    }

    #[test]
    fn full_set_summaries_ignore_selection() {
        let mut s = state();
        let before = s.full_set.year_month.clone();
        s.select_none(SelectionKind::Country);
        assert_eq!(s.full_set.year_month, before);
        assert_eq!(s.full_set.year_month.get(2023, 1), Some(40.0));
    }

    #[test]
    fn reload_keeps_applicable_selection() {
        let mut s = state();
        let other = load_reader(
            "company,country,industry,date,total_laid_off,stage\nX,India,Retail,2024-05-01,8,Seed\n"
                .as_bytes(),
        )
        .unwrap();
        s.set_dataset(other, PathBuf::from("other.csv"));
        assert!(s.selection.countries.is_empty());
        assert!(s.view.is_empty());
        assert_eq!(s.status_message, None);
        assert_eq!(s.source, Some(PathBuf::from("other.csv")));
    }
}
