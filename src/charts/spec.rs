//! Chart Spec Module
//! Rendering-agnostic description of what to draw.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    Bar,
}

/// Half-open bin `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSeries {
    Histogram {
        values: Vec<f64>,
        bins: Vec<HistogramBin>,
    },
    Bar {
        categories: Vec<String>,
        counts: Vec<usize>,
    },
}

/// Marker drawn at an x position, offset from the top of the plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub label: String,
    pub x: f64,
    pub x_offset: f32,
    pub y_offset: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: ChartSeries,
    pub annotations: Vec<Annotation>,
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self.series {
            ChartSeries::Histogram { .. } => ChartKind::Histogram,
            ChartSeries::Bar { .. } => ChartKind::Bar,
        }
    }

    /// Number of bars (bins or categories).
    pub fn len(&self) -> usize {
        match &self.series {
            ChartSeries::Histogram { bins, .. } => bins.len(),
            ChartSeries::Bar { categories, .. } => categories.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tallest bar, used to place annotations.
    pub fn max_count(&self) -> usize {
        match &self.series {
            ChartSeries::Histogram { bins, .. } => {
                bins.iter().map(|b| b.count).max().unwrap_or(0)
            }
            ChartSeries::Bar { counts, .. } => counts.iter().copied().max().unwrap_or(0),
        }
    }
}
