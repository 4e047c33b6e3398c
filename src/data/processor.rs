//! Data Processor Module
//! Row filtering (free-text search, attribute subset) and selection resolution.

use crate::data::{Table, TableError};
use polars::prelude::*;
use std::collections::{BTreeSet, HashSet};

pub const PATIENT_ID: &str = "patient_id";
pub const AGE: &str = "age";
pub const GENDER: &str = "gender";
pub const COLLECTION_DATE: &str = "collection_date";
pub const MEDICAL_ATTRIBUTE_NAME: &str = "medical_attribute_name";
pub const MEDICAL_ATTRIBUTE_RESULT: &str = "medical_attribute_result";
pub const MEDICAL_ATTRIBUTE_MIN: &str = "medical_attribute_min";
pub const MEDICAL_ATTRIBUTE_MAX: &str = "medical_attribute_max";

/// Appended to an attribute option whose name is already taken by a column.
pub const ATTRIBUTE_SUFFIX: &str = " (attribute)";

/// Per-patient columns of the long format; charted once per patient.
pub const DEMOGRAPHIC_COLUMNS: [&str; 3] = [AGE, GENDER, COLLECTION_DATE];

/// What a long-format selection refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Demographic column, deduplicated by patient.
    Demographic(String),
    /// Any other existing column, charted over all rows.
    Column(String),
    /// A value of `medical_attribute_name`.
    Attribute(String),
}

impl Selection {
    pub fn name(&self) -> &str {
        match self {
            Selection::Demographic(name) | Selection::Column(name) | Selection::Attribute(name) => {
                name
            }
        }
    }
}

/// Handles row filtering operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Rows where any cell contains `term`, case-insensitively.
    ///
    /// An empty term returns the table unchanged. Null cells never match.
    pub fn search_filter(table: &Table, term: &str) -> Result<Table, TableError> {
        if term.is_empty() {
            return Ok(table.clone());
        }

        let needle = term.to_lowercase();
        let mut mask = vec![false; table.height()];

        for col in table.dataframe().get_columns() {
            let casted = col.cast(&DataType::String)?;
            let ca = casted.str()?;
            for (hit, cell) in mask.iter_mut().zip(ca.into_iter()) {
                if !*hit {
                    if let Some(cell) = cell {
                        *hit = cell.to_lowercase().contains(&needle);
                    }
                }
            }
        }

        let filtered = table.filter_rows(&mask)?;
        log::debug!(
            "Search {:?} matched {} of {} rows",
            term,
            filtered.height(),
            table.height()
        );
        Ok(filtered)
    }

    /// Rows whose `medical_attribute_name` equals `attribute`.
    pub fn filter_by_attribute(table: &Table, attribute: &str) -> Result<Table, TableError> {
        if !table.has_column(MEDICAL_ATTRIBUTE_NAME) {
            return Err(TableError::ColumnNotFound(MEDICAL_ATTRIBUTE_NAME.to_string()));
        }

        let filtered = table
            .dataframe()
            .clone()
            .lazy()
            .filter(col(MEDICAL_ATTRIBUTE_NAME).eq(lit(attribute)))
            .collect()?;
        Ok(Table::from(filtered))
    }

    /// Keep the first row of every patient.
    pub fn unique_patients(table: &Table) -> Result<Table, TableError> {
        let ids = table.text_values(PATIENT_ID)?;
        let mut seen = HashSet::new();
        let mask: Vec<bool> = ids.into_iter().map(|id| seen.insert(id)).collect();
        table.filter_rows(&mask)
    }

    /// Sorted distinct medical attribute names.
    pub fn attribute_names(table: &Table) -> Result<Vec<String>, TableError> {
        let names: BTreeSet<String> = table
            .text_values(MEDICAL_ATTRIBUTE_NAME)?
            .into_iter()
            .flatten()
            .collect();
        Ok(names.into_iter().collect())
    }

    /// Options offered for the long format: every column but the patient id,
    /// then the attribute names.
    pub fn long_format_options(table: &Table) -> Result<Vec<String>, TableError> {
        let mut options: Vec<String> = table
            .column_names()
            .into_iter()
            .filter(|name| name != PATIENT_ID)
            .collect();
        for attribute in Self::attribute_names(table)? {
            if table.has_column(&attribute) {
                options.push(format!("{}{}", attribute, ATTRIBUTE_SUFFIX));
            } else {
                options.push(attribute);
            }
        }
        Ok(options)
    }

    /// Resolve a long-format selection.
    pub fn resolve_selection(table: &Table, name: &str) -> Result<Selection, TableError> {
        if table.has_column(name) {
            if DEMOGRAPHIC_COLUMNS.contains(&name) && table.has_column(PATIENT_ID) {
                return Ok(Selection::Demographic(name.to_string()));
            }
            return Ok(Selection::Column(name.to_string()));
        }
        if table.has_column(MEDICAL_ATTRIBUTE_NAME) {
            let attribute = match name.strip_suffix(ATTRIBUTE_SUFFIX) {
                Some(stripped) if table.has_column(stripped) => stripped,
                _ => name,
            };
            return Ok(Selection::Attribute(attribute.to_string()));
        }
        Err(TableError::ColumnNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide() -> Table {
        df!(
            "age" => &[30i64, 45, 30],
            "gender" => &["Male", "Female", "Male"],
            "note" => &[Some("Fasting"), None, Some("random")]
        )
        .unwrap()
        .into()
    }

    fn long() -> Table {
        df!(
            PATIENT_ID => &["p1", "p1", "p2"],
            AGE => &[30i64, 30, 45],
            GENDER => &["Male", "Male", "Female"],
            MEDICAL_ATTRIBUTE_NAME => &["Glucose", "Sodium", "Glucose"],
            MEDICAL_ATTRIBUTE_RESULT => &[90.0f64, 140.0, 110.0]
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_search_empty_term_is_identity() {
        let table = wide();
        assert_eq!(DataProcessor::search_filter(&table, "").unwrap(), table);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let table = wide();
        let result = DataProcessor::search_filter(&table, "MALE").unwrap();
        // "Female" contains "male"
        assert_eq!(result.height(), 3);

        let result = DataProcessor::search_filter(&table, "fasting").unwrap();
        assert_eq!(result.height(), 1);

        let result = DataProcessor::search_filter(&table, "45").unwrap();
        assert_eq!(result.text_values("gender").unwrap(), vec![Some("Female".to_string())]);
    }

    #[test]
    fn test_search_is_idempotent() {
        let table = wide();
        let once = DataProcessor::search_filter(&table, "RaNdOm").unwrap();
        let twice = DataProcessor::search_filter(&once, "RaNdOm").unwrap();
        assert_eq!(once.height(), 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let result = DataProcessor::search_filter(&wide(), "zzz").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.width(), 3);
    }

    #[test]
    fn test_filter_by_attribute() {
        let table = long();
        assert_eq!(DataProcessor::filter_by_attribute(&table, "Glucose").unwrap().height(), 2);
        assert!(DataProcessor::filter_by_attribute(&table, "Hemoglobin")
            .unwrap()
            .is_empty());
        assert!(DataProcessor::filter_by_attribute(&wide(), "Glucose").is_err());
    }

    #[test]
    fn test_unique_patients_keeps_first_row() {
        let unique = DataProcessor::unique_patients(&long()).unwrap();
        assert_eq!(unique.height(), 2);
        assert_eq!(
            unique.text_values(MEDICAL_ATTRIBUTE_NAME).unwrap(),
            vec![Some("Glucose".to_string()), Some("Glucose".to_string())]
        );
    }

    #[test]
    fn test_long_format_options() {
        let options = DataProcessor::long_format_options(&long()).unwrap();
        assert_eq!(
            options,
            vec![
                AGE,
                GENDER,
                MEDICAL_ATTRIBUTE_NAME,
                MEDICAL_ATTRIBUTE_RESULT,
                "Glucose",
                "Sodium"
            ]
        );
    }

    #[test]
    fn test_resolve_selection() {
        let table = long();
        assert_eq!(
            DataProcessor::resolve_selection(&table, AGE).unwrap(),
            Selection::Demographic(AGE.to_string())
        );
        assert_eq!(
            DataProcessor::resolve_selection(&table, MEDICAL_ATTRIBUTE_RESULT).unwrap(),
            Selection::Column(MEDICAL_ATTRIBUTE_RESULT.to_string())
        );
        assert_eq!(
            DataProcessor::resolve_selection(&table, "Hemoglobin").unwrap(),
            Selection::Attribute("Hemoglobin".to_string())
        );
        assert!(DataProcessor::resolve_selection(&wide(), "Hemoglobin").is_err());
    }

    #[test]
    fn test_attribute_named_like_a_column() {
        let table: Table = df!(
            "patient_id" => &["p1", "p1", "p2"],
            "age" => &[30i64, 30, 45],
            "medical_attribute_name" => &["age", "Glucose", "age"],
            "medical_attribute_result" => &[31.0f64, 90.0, 44.0]
        )
        .unwrap()
        .into();

        let options = DataProcessor::long_format_options(&table).unwrap();
        assert_eq!(
            options,
            vec![
                AGE,
                MEDICAL_ATTRIBUTE_NAME,
                MEDICAL_ATTRIBUTE_RESULT,
                "Glucose",
                "age (attribute)"
            ]
        );

        assert_eq!(
            DataProcessor::resolve_selection(&table, AGE).unwrap(),
            Selection::Demographic(AGE.to_string())
        );
        let selection = DataProcessor::resolve_selection(&table, "age (attribute)").unwrap();
        assert_eq!(selection, Selection::Attribute(AGE.to_string()));
        assert_eq!(
            DataProcessor::filter_by_attribute(&table, selection.name())
                .unwrap()
                .height(),
            2
        );
    }
}
