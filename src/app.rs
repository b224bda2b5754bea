use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// Dashboard window: menu bar, filter sidebar, chart tabs
// ---------------------------------------------------------------------------

pub struct LayoffLensApp {
    pub state: AppState,
}

impl LayoffLensApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LayoffLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: File menu, record counts, load warnings ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: country / industry multiselects ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart tabs over the full set and filtered view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tab_bar(ui, &mut self.state);
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    charts::tab_contents(ui, &self.state);
                });
        });
    }
}
