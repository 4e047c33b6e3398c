//! CSV Data Loader Module
//! Validates CSV structure and loads it into a typed Table using Polars.

use crate::data::Table;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed CSV {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Handles CSV file loading with Polars for high performance.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row into a Table.
    pub fn load_table(path: &Path) -> Result<Table, LoaderError> {
        Self::validate_csv(path)?;

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            // Infer over the whole file so late rows never coerce to null
            .with_infer_schema_length(None)
            .with_try_parse_dates(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| LoaderError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        log::info!(
            "Loaded {}: {} rows, {} columns",
            path.display(),
            df.height(),
            df.width()
        );

        Ok(Table::from(df))
    }

    /// Check every record has the header's field count and is valid UTF-8.
    fn validate_csv(path: &Path) -> Result<(), LoaderError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| Self::csv_error(path, e))?;
        reader.headers().map_err(|e| Self::csv_error(path, e))?;

        let mut record = csv::StringRecord::new();
        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => return Err(Self::csv_error(path, e)),
            }
        }
        Ok(())
    }

    fn csv_error(path: &Path, error: csv::Error) -> LoaderError {
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(source) => LoaderError::Io {
                path: path.to_path_buf(),
                source,
            },
            _ => LoaderError::Parse {
                path: path.to_path_buf(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnKind;
    use std::fs;

    fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_table_infers_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "labs.csv",
            b"patient_id,age,gender,collection_date\n\
              p1,30,Male,2023-01-05\n\
              p2,45,Female,2023-02-11\n",
        );

        let table = DataLoader::load_table(&path).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(
            table.column_names(),
            vec!["patient_id", "age", "gender", "collection_date"]
        );
        assert_eq!(table.column_kind("age").unwrap(), ColumnKind::Numeric);
        assert_eq!(table.column_kind("gender").unwrap(), ColumnKind::Text);
        assert_eq!(table.column_kind("collection_date").unwrap(), ColumnKind::Date);
    }

    #[test]
    fn test_late_rows_keep_their_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = String::from("patient_id,medical_attribute_result\n");
        for i in 0..10_050 {
            contents.push_str(&format!("p{},5\n", i));
        }
        contents.push_str("pz,7.5\n");
        let path = write_csv(&dir, "long.csv", contents.as_bytes());

        let table = DataLoader::load_table(&path).unwrap();
        assert_eq!(table.height(), 10_051);
        assert_eq!(
            table.column_kind("medical_attribute_result").unwrap(),
            ColumnKind::Numeric
        );
        let values = table.numeric_values("medical_attribute_result").unwrap();
        assert_eq!(values.len(), 10_051);
        assert_eq!(values.last(), Some(&7.5));
    }

    #[test]
    fn test_late_text_turns_column_into_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = String::from("patient_id,medical_attribute_result\n");
        for i in 0..10_050 {
            contents.push_str(&format!("p{},5\n", i));
        }
        contents.push_str("pz,7.5\npy,<5\n");
        let path = write_csv(&dir, "long.csv", contents.as_bytes());

        let table = DataLoader::load_table(&path).unwrap();
        assert_eq!(
            table.column_kind("medical_attribute_result").unwrap(),
            ColumnKind::Text
        );
        let values = table.text_values("medical_attribute_result").unwrap();
        assert_eq!(values.iter().flatten().count(), 10_052);
        assert_eq!(values[10_051].as_deref(), Some("<5"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DataLoader::load_table(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }

    #[test]
    fn test_wrong_field_count_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "bad.csv", b"a,b\n1,2\n3,4,5\n");
        assert!(matches!(
            DataLoader::load_table(&path),
            Err(LoaderError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "bin.csv", b"a,b\n1,\xff\xfe\n");
        assert!(matches!(
            DataLoader::load_table(&path),
            Err(LoaderError::Parse { .. })
        ));
    }
}
