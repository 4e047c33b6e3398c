//! Chart Builder Module
//! Chooses the chart kind from the column type and builds its data.

use crate::charts::{Annotation, ChartSeries, ChartSpec, HistogramBin};
use crate::data::{
    DataProcessor, Table, TableError, MEDICAL_ATTRIBUTE_MAX, MEDICAL_ATTRIBUTE_MIN,
    MEDICAL_ATTRIBUTE_RESULT,
};
use crate::stats::StatsCalculator;
use statrs::statistics::Statistics;

/// Pixel offsets of the range markers from their anchor.
const MIN_MARKER_OFFSET: (f32, f32) = (-20.0, -30.0);
const MAX_MARKER_OFFSET: (f32, f32) = (20.0, -30.0);

/// Builds chart specs from table columns.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Histogram for numeric columns, frequency bar chart otherwise.
    pub fn build_chart(table: &Table, column: &str) -> Result<ChartSpec, TableError> {
        let kind = table.column_kind(column)?;
        log::debug!("Building chart for {} ({:?})", column, kind);

        if kind.is_numeric() {
            Ok(Self::histogram(column, table.numeric_values(column)?))
        } else {
            let values = table.text_values(column)?;
            let counts = StatsCalculator::value_counts(values.iter().flatten().map(String::as_str));
            Ok(ChartSpec {
                title: format!("Bar Chart of {}", column),
                x_label: column.to_string(),
                y_label: "Count".to_string(),
                series: ChartSeries::Bar {
                    categories: counts.iter().map(|vc| vc.value.clone()).collect(),
                    counts: counts.iter().map(|vc| vc.count).collect(),
                },
                annotations: Vec::new(),
            })
        }
    }

    /// Histogram of one medical attribute's results with its reference range.
    ///
    /// Markers are placed at the lowest `medical_attribute_min` and the highest
    /// `medical_attribute_max` of the attribute's rows; undefined bounds are skipped.
    pub fn build_attribute_chart(table: &Table, attribute: &str) -> Result<ChartSpec, TableError> {
        let subset = DataProcessor::filter_by_attribute(table, attribute)?;
        Self::attribute_chart(&subset, attribute)
    }

    /// Same as [`ChartBuilder::build_attribute_chart`] over rows already
    /// restricted to `attribute`.
    pub fn attribute_chart(subset: &Table, attribute: &str) -> Result<ChartSpec, TableError> {
        let results = subset.numeric_values(MEDICAL_ATTRIBUTE_RESULT)?;
        let lower = Statistics::min(&subset.numeric_values(MEDICAL_ATTRIBUTE_MIN)?);
        let upper = Statistics::max(&subset.numeric_values(MEDICAL_ATTRIBUTE_MAX)?);

        log::debug!(
            "Attribute {}: {} results, range [{}, {}]",
            attribute,
            results.len(),
            lower,
            upper
        );

        let mut spec = Self::histogram(attribute, results);
        Self::annotate(&mut spec, "Min", lower, MIN_MARKER_OFFSET);
        Self::annotate(&mut spec, "Max", upper, MAX_MARKER_OFFSET);
        Ok(spec)
    }

    fn histogram(column: &str, values: Vec<f64>) -> ChartSpec {
        let bins = Self::histogram_bins(&values);
        ChartSpec {
            title: format!("Histogram of {}", column),
            x_label: column.to_string(),
            y_label: "count".to_string(),
            series: ChartSeries::Histogram { values, bins },
            annotations: Vec::new(),
        }
    }

    fn annotate(spec: &mut ChartSpec, label: &str, x: f64, offset: (f32, f32)) {
        if !x.is_finite() {
            return;
        }
        spec.annotations.push(Annotation {
            label: format!("{}: {}", label, x),
            x,
            x_offset: offset.0,
            y_offset: offset.1,
        });
    }

    /// Equal-width bins between min and max, count by Sturges' rule.
    pub fn histogram_bins(values: &[f64]) -> Vec<HistogramBin> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Vec::new();
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return vec![HistogramBin {
                start: min - 0.5,
                end: max + 0.5,
                count: finite.len(),
            }];
        }

        let bin_count = (finite.len() as f64).log2().ceil() as usize + 1;
        let width = (max - min) / bin_count as f64;
        if !width.is_finite() {
            // range overflows f64
            return vec![HistogramBin {
                start: min,
                end: max,
                count: finite.len(),
            }];
        }
        let mut counts = vec![0usize; bin_count];

        for v in &finite {
            let idx = (((v - min) / width) as usize).min(bin_count - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: if i + 1 == bin_count {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count,
            })
            .collect()
    }
}
