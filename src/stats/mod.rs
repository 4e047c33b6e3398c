//! Stats module - Descriptive statistics

mod calculator;

pub use calculator::{
    AgeStats, CategoricalSummary, ColumnSummary, NumericSummary, PatientOverview,
    StatsCalculator, ValueCount,
};
