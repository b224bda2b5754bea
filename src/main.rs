mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use app::LayoffLensApp;
use config::Config;
use data::filter::FilterSelection;
use state::AppState;

fn main() -> ExitCode {
    env_logger::init();

    match run(Config::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    // The dataset is loaded once; without it there is nothing to show.
    let dataset = data::loader::load_file(&config.path)
        .with_context(|| format!("loading dataset {}", config.path.display()))?;
    let selection = FilterSelection::initial(&dataset, &config.countries, &config.industries);
    let state = AppState::new(dataset, Some(config.path), selection);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tech Layoffs Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LayoffLensApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
