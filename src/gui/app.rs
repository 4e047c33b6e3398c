//! Labscope Main Application
//! Routes widget actions through the state handler and draws the panels.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::state::AppState;
use egui::{CentralPanel, SidePanel, TopBottomPanel};

/// Main application window.
pub struct DashboardApp {
    state: AppState,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        Self {
            state,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        }
    }

    fn dispatch(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::Update(action) => self.state = self.state.apply(action),
            ControlPanelAction::ExportReport => self.handle_export_report(),
            ControlPanelAction::None => {}
        }
    }

    /// Save the current summary and chart as JSON.
    fn handle_export_report(&mut self) {
        let Some(report) = &self.state.report else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("{}.json", report.selection))
            .save_file()
        else {
            return; // User cancelled
        };

        let result = report
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));

        match result {
            Ok(()) => log::info!("Exported {} to {}", report.selection, path.display()),
            Err(e) => {
                log::warn!("Export failed: {}", e);
                self.state.error = Some(format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.state.authenticated {
            let action = CentralPanel::default()
                .show(ctx, |ui| self.control_panel.show_login(ui, &self.state))
                .inner;
            self.dispatch(action);
            return;
        }

        let action = TopBottomPanel::top("tabs")
            .show(ctx, |ui| self.control_panel.show_tabs(ui, &self.state))
            .inner;
        self.dispatch(action);

        let action = SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| self.control_panel.show(ui, &self.state))
                    .inner
            })
            .inner;
        self.dispatch(action);

        CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.state);
        });
    }
}
