//! Parsing of pasted spreadsheet text into a [`Table`]
//!
//! Spreadsheet applications put tab-separated text on the clipboard, quoting
//! cells that contain tabs, quotes, or line breaks. This module turns that
//! text into a rectangular table of strings.

use crate::table::{positional_columns, Table, TableError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No data to compare")]
    Empty,
    #[error("Line {line}: expected {expected} fields, saw {found}")]
    Malformed {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("Failed to read delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Options for [`parse_paste`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteOptions {
    /// Treat the first line as column names
    pub has_header: bool,
    /// Field separator byte
    pub delimiter: u8,
}

impl Default for PasteOptions {
    fn default() -> Self {
        Self {
            has_header: false,
            delimiter: b'\t',
        }
    }
}

impl PasteOptions {
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Parse pasted delimited text.
///
/// The table width comes from the header line, or from the first line when
/// there is no header. Shorter lines are padded with empty values; longer
/// lines are rejected.
pub fn parse_paste(text: &str, options: &PasteOptions) -> Result<Table, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut header: Option<Vec<String>> = None;
    let mut width: Option<usize> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for record in reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line());
        let values: Vec<String> = record.iter().map(str::to_string).collect();

        let expected = match width {
            Some(w) => w,
            None => {
                width = Some(values.len());
                if options.has_header {
                    header = Some(values);
                    continue;
                }
                values.len()
            }
        };

        if values.len() > expected {
            return Err(ParseError::Malformed {
                line,
                expected,
                found: values.len(),
            });
        }
        rows.push(pad(values, expected));
    }

    let width = width.unwrap_or(0);
    let columns = match header {
        Some(names) => header_columns(names),
        None => positional_columns(width),
    };
    debug!(
        rows = rows.len(),
        columns = columns.len(),
        has_header = options.has_header,
        "parsed pasted table"
    );
    Ok(Table::new(columns, rows)?)
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| field.is_empty()) && record.len() <= 1
}

fn pad(mut values: Vec<String>, width: usize) -> Vec<String> {
    values.resize(width, String::new());
    values
}

/// Name blank header cells positionally and make duplicates unique.
fn header_columns(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(names.len());
    for (i, name) in names.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut n = 1;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{}.{}", base, n);
            n += 1;
        }
        columns.push(candidate);
    }
    columns
}
