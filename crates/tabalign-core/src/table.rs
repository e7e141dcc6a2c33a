//! Tabular input model

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// An ordered sequence of rows with a fixed set of named columns.
///
/// Every value is text. Absent cells are the empty string; there is no null.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Unchecked wire form; deserialization goes through [`Table::new`].
#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for Table {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Table::new(raw.columns, raw.rows)
    }
}

impl Table {
    /// Build a table, checking that every row matches the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        let width = columns.len();
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(TableError::RaggedRow {
                row,
                expected: width,
                found: values.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// Build a table with positional column names `Col_1..Col_n`.
    pub fn with_positional_columns(
        width: usize,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, TableError> {
        Self::new(positional_columns(width), rows)
    }

    /// Convenience constructor for literals, mostly useful in tests.
    pub fn from_rows<R, V>(width: usize, rows: R) -> Result<Self, TableError>
    where
        R: IntoIterator<Item = V>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        Self::with_positional_columns(width, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A row of empty values as wide as this table.
    pub fn blank_row(&self) -> Vec<String> {
        vec![String::new(); self.width()]
    }
}

/// Column names used when the input carries no header row.
pub fn positional_columns(width: usize) -> Vec<String> {
    (1..=width).map(|i| format!("Col_{}", i)).collect()
}
