//! Column Report Module
//! Summary and chart of one selection, as shown on screen and exported as JSON.

use crate::charts::{ChartBuilder, ChartSpec};
use crate::config::Layout;
use crate::data::{DataProcessor, Selection, Table, TableError, MEDICAL_ATTRIBUTE_RESULT};
use crate::stats::{ColumnSummary, StatsCalculator};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnReport {
    pub selection: String,
    pub summary: ColumnSummary,
    pub chart: ChartSpec,
}

impl ColumnReport {
    /// Summarize and chart `selection` according to the dataset layout.
    pub fn build(table: &Table, layout: Layout, selection: &str) -> Result<Self, TableError> {
        let (summary, chart) = match layout {
            Layout::Wide => Self::for_column(table, selection)?,
            Layout::Long => match DataProcessor::resolve_selection(table, selection)? {
                Selection::Demographic(column) => {
                    let patients = DataProcessor::unique_patients(table)?;
                    Self::for_column(&patients, &column)?
                }
                Selection::Column(column) => Self::for_column(table, &column)?,
                Selection::Attribute(attribute) => {
                    let subset = DataProcessor::filter_by_attribute(table, &attribute)?;
                    let results = subset.numeric_values(MEDICAL_ATTRIBUTE_RESULT)?;
                    let summary = ColumnSummary::Numeric(StatsCalculator::describe_values(
                        &attribute, &results,
                    ));
                    (summary, ChartBuilder::attribute_chart(&subset, &attribute)?)
                }
            },
        };

        Ok(Self {
            selection: selection.to_string(),
            summary,
            chart,
        })
    }

    fn for_column(table: &Table, column: &str) -> Result<(ColumnSummary, ChartSpec), TableError> {
        Ok((
            StatsCalculator::summarize_column(table, column)?,
            ChartBuilder::build_chart(table, column)?,
        ))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
