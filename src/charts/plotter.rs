//! Chart Plotter Module
//! Renders chart specs and summaries using egui_plot.

use crate::charts::{ChartSeries, ChartSpec};
use crate::stats::ColumnSummary;
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text, VLine};

/// Bar fill color
pub const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

/// Range marker colors
pub const MIN_COLOR: Color32 = Color32::from_rgb(46, 204, 113);
pub const MAX_COLOR: Color32 = Color32::from_rgb(231, 76, 60);

/// Draws chart specs and summary tables.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a histogram or bar chart with its annotations.
    pub fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        let categories: Vec<String> = match &spec.series {
            ChartSeries::Bar { categories, .. } => categories.clone(),
            ChartSeries::Histogram { .. } => Vec::new(),
        };
        let is_bar = !categories.is_empty();
        let top = spec.max_count().max(1) as f64;

        Plot::new(format!("chart_{}", spec.title))
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                if !is_bar {
                    return format!("{}", mark.value);
                }
                let idx = mark.value.round();
                if idx >= 0.0 && (idx - mark.value).abs() < 1e-6 {
                    categories.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = match &spec.series {
                    ChartSeries::Histogram { bins, .. } => bins
                        .iter()
                        .map(|bin| {
                            Bar::new(bin.center(), bin.count as f64)
                                .width(bin.width())
                                .name(format!("{:.2} - {:.2}", bin.start, bin.end))
                        })
                        .collect(),
                    ChartSeries::Bar {
                        categories, counts, ..
                    } => categories
                        .iter()
                        .zip(counts.iter())
                        .enumerate()
                        .map(|(i, (category, &count))| {
                            Bar::new(i as f64, count as f64).width(0.8).name(category)
                        })
                        .collect(),
                };

                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name(&spec.x_label));

                for annotation in &spec.annotations {
                    let color = if annotation.x_offset < 0.0 {
                        MIN_COLOR
                    } else {
                        MAX_COLOR
                    };
                    let anchor = if annotation.x_offset < 0.0 {
                        Align2::RIGHT_BOTTOM
                    } else {
                        Align2::LEFT_BOTTOM
                    };

                    plot_ui.vline(
                        VLine::new(annotation.x)
                            .color(color)
                            .width(1.5)
                            .name(&annotation.label),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(annotation.x, top),
                            RichText::new(&annotation.label).color(color).size(12.0),
                        )
                        .anchor(anchor),
                    );
                }
            });
    }

    /// Draw the statistics of one column as a two-column grid.
    pub fn draw_summary(ui: &mut egui::Ui, summary: &ColumnSummary) {
        let rows: Vec<(&str, String)> = match summary {
            ColumnSummary::Numeric(s) => vec![
                ("count", s.count.to_string()),
                ("mean", format!("{:.3}", s.mean)),
                ("std", format!("{:.3}", s.std)),
                ("min", format!("{:.3}", s.min)),
                ("25%", format!("{:.3}", s.p25)),
                ("50%", format!("{:.3}", s.median)),
                ("75%", format!("{:.3}", s.p75)),
                ("max", format!("{:.3}", s.max)),
            ],
            ColumnSummary::Categorical(s) => vec![
                ("count", s.count.to_string()),
                ("unique", s.unique.to_string()),
                ("top", s.top.clone().unwrap_or_else(|| "-".to_string())),
                ("freq", s.freq.to_string()),
            ],
        };

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("summary_{}", summary.column())))
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for (label, value) in rows {
                            ui.label(RichText::new(label).strong().size(11.0));
                            ui.label(RichText::new(value).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }

    /// Draw one row per column with its headline statistics.
    pub fn draw_summaries_table(ui: &mut egui::Ui, summaries: &[ColumnSummary]) {
        egui::Grid::new("describe_all")
            .striped(true)
            .min_col_width(60.0)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for header in ["Column", "Count", "Mean / Top", "Min / Unique", "Max / Freq"] {
                    ui.label(RichText::new(header).strong().size(11.0));
                }
                ui.end_row();

                for summary in summaries {
                    ui.label(RichText::new(summary.column()).size(11.0));
                    ui.label(RichText::new(summary.count().to_string()).size(11.0));
                    match summary {
                        ColumnSummary::Numeric(s) => {
                            ui.label(RichText::new(format!("{:.3}", s.mean)).size(11.0));
                            ui.label(RichText::new(format!("{:.3}", s.min)).size(11.0));
                            ui.label(RichText::new(format!("{:.3}", s.max)).size(11.0));
                        }
                        ColumnSummary::Categorical(s) => {
                            ui.label(RichText::new(s.top.as_deref().unwrap_or("-")).size(11.0));
                            ui.label(RichText::new(s.unique.to_string()).size(11.0));
                            ui.label(RichText::new(s.freq.to_string()).size(11.0));
                        }
                    }
                    ui.end_row();
                }
            });
    }
}
