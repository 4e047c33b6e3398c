//! Charts module - Chart selection and rendering

mod builder;
mod plotter;
mod spec;

pub use builder::ChartBuilder;
pub use plotter::ChartPlotter;
pub use spec::{Annotation, ChartKind, ChartSeries, ChartSpec, HistogramBin};
