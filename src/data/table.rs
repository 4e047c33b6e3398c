//! Table Module
//! Immutable in-memory table over a Polars DataFrame with column semantic types.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Semantic type of a column, driving summary and chart selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Text,
    Date,
}

impl ColumnKind {
    /// Classify a Polars dtype.
    pub fn from_dtype(dtype: &DataType) -> Self {
        match dtype {
            DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => ColumnKind::Numeric,
            DataType::Date | DataType::Datetime(_, _) | DataType::Time => ColumnKind::Date,
            _ => ColumnKind::Text,
        }
    }

    pub fn is_numeric(self) -> bool {
        self == ColumnKind::Numeric
    }
}

/// Read-only table of rows x named columns.
///
/// Cloning is cheap: the underlying columns are reference counted.
#[derive(Debug, Clone)]
pub struct Table {
    df: DataFrame,
}

impl From<DataFrame> for Table {
    fn from(df: DataFrame) -> Self {
        Self { df }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.df.equals_missing(&other.df)
    }
}

impl Table {
    /// Get a reference to the underlying DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Column names in file order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_index(name).is_some()
    }

    fn column(&self, name: &str) -> Result<&Column, TableError> {
        if !self.has_column(name) {
            return Err(TableError::ColumnNotFound(name.to_string()));
        }
        Ok(self.df.column(name)?)
    }

    /// Semantic type of a column.
    pub fn column_kind(&self, name: &str) -> Result<ColumnKind, TableError> {
        Ok(ColumnKind::from_dtype(self.column(name)?.dtype()))
    }

    /// Non-null numeric values of a column.
    ///
    /// Text cells that do not parse as numbers are dropped, as are NaNs.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>, TableError> {
        let casted = self.column(name)?.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        Ok(ca.into_iter().flatten().filter(|v| !v.is_nan()).collect())
    }

    /// String representation of every cell of a column, `None` for nulls.
    pub fn text_values(&self, name: &str) -> Result<Vec<Option<String>>, TableError> {
        let casted = self.column(name)?.cast(&DataType::String)?;
        let ca = casted.str()?;
        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }

    /// Keep the rows whose mask entry is `true`.
    pub fn filter_rows(&self, mask: &[bool]) -> Result<Table, TableError> {
        let mask = BooleanChunked::from_slice("mask".into(), mask);
        Ok(Table::from(self.df.filter(&mask)?))
    }

    /// First `n` rows rendered as strings, empty string for nulls.
    pub fn preview_rows(&self, n: usize) -> Result<Vec<Vec<String>>, TableError> {
        let head = self.df.head(Some(n));
        let mut columns: Vec<Vec<Option<String>>> = Vec::with_capacity(head.width());
        for col in head.get_columns() {
            let casted = col.cast(&DataType::String)?;
            let ca = casted.str()?;
            columns.push(ca.into_iter().map(|v| v.map(str::to_string)).collect());
        }

        Ok((0..head.height())
            .map(|row| {
                columns
                    .iter()
                    .map(|col| col[row].clone().unwrap_or_default())
                    .collect()
            })
            .collect())
    }
}
