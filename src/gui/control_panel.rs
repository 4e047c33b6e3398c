//! Control Panel Widget
//! Login form, tab bar and the left side panel. Every widget emits one action.

use crate::state::{Action, AppState, Tab};
use egui::{Color32, ComboBox, RichText};

/// Input buffers owned by the widgets between frames.
#[derive(Default)]
pub struct ControlPanel {
    pub password_input: String,
    pub search_input: String,
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Update(Action),
    ExportReport,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the password form.
    pub fn show_login(&mut self, ui: &mut egui::Ui, state: &AppState) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(
                RichText::new("🔒 Lab Reports Analysis")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.add_space(15.0);

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.password_input)
                    .password(true)
                    .hint_text("Password")
                    .desired_width(220.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(8.0);
            if ui.button("Log in").clicked() || submitted {
                action = ControlPanelAction::Update(Action::SubmitPassword(std::mem::take(
                    &mut self.password_input,
                )));
            }

            if let Some(error) = &state.login_error {
                ui.add_space(8.0);
                ui.label(RichText::new(error).color(Color32::from_rgb(220, 53, 69)));
            }
        });

        action
    }

    /// Draw the tab bar.
    pub fn show_tabs(&mut self, ui: &mut egui::Ui, state: &AppState) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let mut tabs = vec![(Tab::RawData, "Raw Data"), (Tab::Charts, "Charts")];
        if state.has_overview() {
            tabs.insert(0, (Tab::Overview, "Overview"));
        }

        ui.horizontal(|ui| {
            for (tab, label) in tabs {
                if ui
                    .selectable_label(state.active_tab == tab, RichText::new(label).size(14.0))
                    .clicked()
                {
                    action = ControlPanelAction::Update(Action::SelectTab(tab));
                }
            }
        });

        action
    }

    /// Draw the side panel with the search box and column selector.
    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🧪 Labscope")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();

        // ===== Search Section =====
        ui.label(RichText::new("🔍 Search and Filter").size(14.0).strong());
        ui.add_space(5.0);
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.search_input)
                .hint_text("Search for a term in the dataset"),
        );
        if response.changed() {
            action = ControlPanelAction::Update(Action::Search(self.search_input.clone()));
        }
        if let Some(error) = &state.search_error {
            ui.label(
                RichText::new(error)
                    .size(11.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }

        ui.add_space(15.0);
        ui.separator();

        // ===== Column Section =====
        let prompt = if state.has_overview() {
            "Select a medical attribute to visualize"
        } else {
            "Select a column to analyze"
        };
        ui.label(RichText::new(prompt).size(14.0).strong());
        ui.add_space(5.0);

        let selected = state.selected.clone().unwrap_or_default();
        ComboBox::from_id_salt("column_select")
            .width(220.0)
            .selected_text(&selected)
            .show_ui(ui, |ui| {
                for option in &state.column_options {
                    if ui.selectable_label(selected == *option, option).clicked() {
                        action = ControlPanelAction::Update(Action::SelectColumn(option.clone()));
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(state.report.is_some(), |ui| {
                let button = egui::Button::new(RichText::new("💾 Export JSON").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportReport;
                }
            });
        });

        if let Some(error) = &state.error {
            ui.add_space(10.0);
            ui.label(
                RichText::new(error)
                    .size(11.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }

        action
    }
}
