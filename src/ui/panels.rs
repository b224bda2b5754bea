use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, SelectionKind, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            selection_widget(ui, state, SelectionKind::Country, "Select Country", true);
            ui.separator();
            selection_widget(ui, state, SelectionKind::Industry, "Select Industry", false);
            if state.selected(SelectionKind::Industry).is_empty() {
                ui.weak("No industry selected: showing all industries.");
            }
        });
}

/// One collapsible multiselect list with All / None buttons.
fn selection_widget(
    ui: &mut Ui,
    state: &mut AppState,
    kind: SelectionKind,
    title: &str,
    default_open: bool,
) {
    // Clone what we need so we can mutate state inside the loop.
    let options = state.options(kind).to_vec();
    let n_selected = state.selected(kind).len();
    let header_text = format!("{title}  ({n_selected}/{})", options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(default_open)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(kind);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(kind);
                }
            });

            for value in &options {
                let mut checked = state.selected(kind).contains(value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    state.toggle(kind, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export summaries…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset.len(),
            state.view.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::from_rgb(230, 120, 40)));
        }
    });
}

/// Tab strip above the charts.
pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.active_tab, tab, tab.title());
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open layoffs dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset, path),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart summaries")
        .set_file_name("layoff_summaries.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match state.export_summaries(&path) {
            Ok(()) => {
                log::info!("Exported summaries to {}", path.display());
                state.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
