//! Data module - CSV loading, the Table model, and row filtering

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, LoaderError};
pub use processor::*;
pub use table::{ColumnKind, Table, TableError};
