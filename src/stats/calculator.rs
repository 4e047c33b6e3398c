//! Statistics Calculator Module
//! Descriptive statistics per column, value frequencies and patient metrics.

use crate::data::{Table, TableError, AGE, GENDER, MEDICAL_ATTRIBUTE_NAME, PATIENT_ID};
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::{HashMap, HashSet};

/// Descriptive statistics of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Occurrences of one distinct value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Frequency statistics of a text or date column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
    /// Descending by count, ties in first-appearance order.
    pub value_counts: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl ColumnSummary {
    pub fn column(&self) -> &str {
        match self {
            ColumnSummary::Numeric(s) => &s.column,
            ColumnSummary::Categorical(s) => &s.column,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            ColumnSummary::Numeric(s) => s.count,
            ColumnSummary::Categorical(s) => s.count,
        }
    }
}

/// Age figures of the overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// Headline metrics of a long-format dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientOverview {
    pub patients: usize,
    pub medical_attributes: usize,
    pub age: AgeStats,
    pub female_patients: usize,
    pub male_patients: usize,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Numeric summary for numeric columns, frequency summary otherwise.
    pub fn summarize_column(table: &Table, column: &str) -> Result<ColumnSummary, TableError> {
        if table.column_kind(column)?.is_numeric() {
            let values = table.numeric_values(column)?;
            Ok(ColumnSummary::Numeric(Self::describe_values(column, &values)))
        } else {
            let values = table.text_values(column)?;
            let value_counts = Self::value_counts(values.iter().flatten().map(String::as_str));
            Ok(ColumnSummary::Categorical(Self::describe_counts(
                column,
                value_counts,
            )))
        }
    }

    /// Summaries of every column, computed in parallel.
    pub fn summarize_all(table: &Table) -> Result<Vec<ColumnSummary>, TableError> {
        table
            .column_names()
            .par_iter()
            .map(|column| Self::summarize_column(table, column))
            .collect()
    }

    /// Compute descriptive statistics for an array of values.
    pub fn describe_values(column: &str, values: &[f64]) -> NumericSummary {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        NumericSummary {
            column: column.to_string(),
            count: values.len(),
            mean: Statistics::mean(values),
            std: Statistics::std_dev(values),
            min: Statistics::min(values),
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: Statistics::max(values),
        }
    }

    fn describe_counts(column: &str, value_counts: Vec<ValueCount>) -> CategoricalSummary {
        let (top, freq) = value_counts
            .first()
            .map(|vc| (Some(vc.value.clone()), vc.count))
            .unwrap_or((None, 0));

        CategoricalSummary {
            column: column.to_string(),
            count: value_counts.iter().map(|vc| vc.count).sum(),
            unique: value_counts.len(),
            top,
            freq,
            value_counts,
        }
    }

    /// Count distinct values, most frequent first.
    pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<ValueCount> {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut counts: Vec<ValueCount> = Vec::new();

        for value in values {
            match index.get(value) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(value, counts.len());
                    counts.push(ValueCount {
                        value: value.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // Stable sort keeps first-appearance order among ties
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Headline patient metrics of a long-format table.
    pub fn patient_overview(table: &Table) -> Result<PatientOverview, TableError> {
        let ids = table.text_values(PATIENT_ID)?;
        let genders = table.text_values(GENDER)?;
        let patients: HashSet<&str> = ids.iter().flatten().map(String::as_str).collect();

        let patients_with_gender = |wanted: &str| {
            ids.iter()
                .zip(genders.iter())
                .filter_map(|(id, gender)| match (id, gender) {
                    (Some(id), Some(gender)) if gender.to_lowercase() == wanted => {
                        Some(id.as_str())
                    }
                    _ => None,
                })
                .collect::<HashSet<&str>>()
                .len()
        };

        let attributes: HashSet<String> = table
            .text_values(MEDICAL_ATTRIBUTE_NAME)?
            .into_iter()
            .flatten()
            .collect();

        let ages = Self::describe_values(AGE, &table.numeric_values(AGE)?);

        Ok(PatientOverview {
            patients: patients.len(),
            medical_attributes: attributes.len(),
            age: AgeStats {
                mean: ages.mean,
                min: ages.min,
                max: ages.max,
                median: ages.median,
            },
            female_patients: patients_with_gender("female"),
            male_patients: patients_with_gender("male"),
        })
    }
}
