//! Chart Viewer Widget
//! Central panel: overview metrics, raw data preview and the selected chart.

use crate::charts::ChartPlotter;
use crate::data::Table;
use crate::state::{AppState, Tab};
use crate::stats::PatientOverview;
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 380.0;
const METRIC_WIDTH: f32 = 150.0;
/// Search results beyond this are counted but not drawn.
const MAX_RESULT_ROWS: usize = 200;

/// Scrollable display area for the active tab.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match state.active_tab {
                Tab::Overview => Self::show_overview(ui, state),
                Tab::RawData => Self::show_raw_data(ui, state),
                Tab::Charts => Self::show_charts(ui, state),
            });
    }

    fn show_overview(ui: &mut egui::Ui, state: &AppState) {
        ui.heading("Dashboard Overview");
        ui.add_space(10.0);

        let Some(overview) = &state.overview else {
            ui.label(RichText::new("Overview requires patient, gender and age columns").size(14.0));
            return;
        };
        Self::draw_overview_metrics(ui, overview);
    }

    fn draw_overview_metrics(ui: &mut egui::Ui, overview: &PatientOverview) {
        ui.horizontal_wrapped(|ui| {
            Self::metric(ui, "# Patients", overview.patients.to_string());
            Self::metric(
                ui,
                "# Medical Attributes",
                overview.medical_attributes.to_string(),
            );
            Self::metric(ui, "Average Age", format!("{:.2}", overview.age.mean));
            Self::metric(ui, "Minimum Age", format!("{:.2}", overview.age.min));
            Self::metric(ui, "Maximum Age", format!("{:.2}", overview.age.max));
            Self::metric(ui, "Median Age", format!("{:.2}", overview.age.median));
        });
        ui.add_space(10.0);
        ui.horizontal_wrapped(|ui| {
            Self::metric(
                ui,
                "Number of Female Patients",
                overview.female_patients.to_string(),
            );
            Self::metric(
                ui,
                "Number of Male Patients",
                overview.male_patients.to_string(),
            );
        });
    }

    /// Big-number tile.
    fn metric(ui: &mut egui::Ui, label: &str, value: String) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(METRIC_WIDTH);
                ui.vertical(|ui| {
                    ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(24.0).strong());
                });
            });
    }

    fn show_raw_data(ui: &mut egui::Ui, state: &AppState) {
        ui.heading("Raw Data Exploration");
        ui.add_space(10.0);

        ui.label(RichText::new("Dataset Information").size(16.0).strong());
        ui.label(format!("Number of records: {}", state.table.height()));
        ui.label(format!("Number of columns: {}", state.table.width()));
        ui.add_space(10.0);

        ui.label(RichText::new("Sample Data").size(16.0).strong());
        Self::draw_rows(ui, "sample_rows", &state.table, state.preview_rows);
        ui.add_space(10.0);

        if !state.column_summaries.is_empty() {
            ui.label(RichText::new("Column Statistics").size(16.0).strong());
            ChartPlotter::draw_summaries_table(ui, &state.column_summaries);
            ui.add_space(10.0);
        }

        if let Some(results) = &state.search_results {
            ui.label(
                RichText::new(format!(
                    "Search results for \"{}\": {} rows",
                    state.search_term,
                    results.height()
                ))
                .size(16.0)
                .strong(),
            );
            Self::draw_rows(ui, "search_rows", results, MAX_RESULT_ROWS);
        }
    }

    fn draw_rows(ui: &mut egui::Ui, id: &str, table: &Table, limit: usize) {
        let rows = match table.preview_rows(limit) {
            Ok(rows) => rows,
            Err(e) => {
                ui.label(RichText::new(format!("Error: {}", e)).color(Color32::from_rgb(220, 53, 69)));
                return;
            }
        };

        ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
            egui::Grid::new(id)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for name in table.column_names() {
                        ui.label(RichText::new(name).strong().size(11.0));
                    }
                    ui.end_row();

                    for row in rows {
                        for cell in row {
                            ui.label(RichText::new(cell).size(11.0));
                        }
                        ui.end_row();
                    }
                });
        });
    }

    fn show_charts(ui: &mut egui::Ui, state: &AppState) {
        ui.heading("Charts and Analysis");
        ui.add_space(10.0);

        let Some(report) = &state.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.label(
            RichText::new(format!("Statistics for {}", report.selection))
                .size(16.0)
                .strong(),
        );
        ChartPlotter::draw_summary(ui, &report.summary);
        ui.add_space(10.0);

        ui.label(RichText::new(&report.chart.title).size(16.0).strong());
        ChartPlotter::draw_chart(ui, &report.chart, CHART_HEIGHT);
    }
}
