//! Labscope - Lab Report CSV Dashboard
//!
//! Opens the dashboard window, or prints one column report as JSON with `--column`.

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use labscope::config::{Cli, DashboardConfig};
use labscope::data::DataLoader;
use labscope::gui::DashboardApp;
use labscope::report::ColumnReport;
use labscope::state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = DashboardConfig::from_cli(&cli)?;
    log::info!(
        "Loading {} ({:?} layout)",
        config.data_path.display(),
        config.layout
    );
    let table = DataLoader::load_table(&config.data_path)?;

    if let Some(column) = &cli.column {
        let report = ColumnReport::build(&table, config.layout, column)
            .with_context(|| format!("Cannot analyze {}", column))?;
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let state = AppState::new(table, config.layout, config.password, config.preview_rows);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Lab Reports Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "Labscope",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {}", e))
}
