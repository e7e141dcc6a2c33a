//! Turning two pasted inputs into a comparison, shared by the CLI and the UI

use crate::cli::InputArgs;
use crate::config::{parse_delimiter, Config, ConfigError};
use std::fmt;
use std::time::Duration;
use tabalign_core::{
    parse_paste, Aligner, Operation, ParseError, PasteOptions, ResultTable, Table,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Please paste data into both A and B fields.")]
    Missing,
    #[error("Error parsing data {side}: {error}")]
    Parse { side: Side, error: ParseError },
}

/// Effective options after merging the config file with command-line flags
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub paste: PasteOptions,
    pub aligner: Aligner,
    pub only_diff: bool,
}

impl Settings {
    pub fn resolve(config: &Config, args: &InputArgs) -> Result<Self, ConfigError> {
        let mut paste = config.paste_options()?;
        if let Some(d) = &args.delimiter {
            paste = paste.with_delimiter(parse_delimiter(d)?);
        }
        if let Some(header) = args.header_override() {
            paste = paste.with_header(header);
        }

        let algorithm = args.algorithm.map(Into::into).unwrap_or(config.algorithm);
        let mut aligner = Aligner::new().with_algorithm(algorithm);
        let timeout_ms = args.timeout_ms.unwrap_or(config.timeout_ms);
        if timeout_ms > 0 {
            aligner = aligner.with_deadline(Duration::from_millis(timeout_ms));
        }

        Ok(Self {
            paste,
            aligner,
            only_diff: config.ui.show_only_differences,
        })
    }
}

/// Parse both inputs, refusing to go on if either is empty.
pub fn load_tables(
    text_a: &str,
    text_b: &str,
    options: &PasteOptions,
) -> Result<(Table, Table), InputError> {
    if text_a.trim().is_empty() || text_b.trim().is_empty() {
        return Err(InputError::Missing);
    }
    let a = parse_paste(text_a, options).map_err(|error| InputError::Parse {
        side: Side::A,
        error,
    })?;
    let b = parse_paste(text_b, options).map_err(|error| InputError::Parse {
        side: Side::B,
        error,
    })?;
    tracing::info!(rows = a.len(), columns = a.width(), "loaded data A");
    tracing::info!(rows = b.len(), columns = b.width(), "loaded data B");
    Ok((a, b))
}

/// Everything one comparison produced
#[derive(Debug, Clone)]
pub struct Comparison {
    pub a: Table,
    pub b: Table,
    pub operations: Vec<Operation>,
    pub result: ResultTable,
}

impl Comparison {
    pub fn run(text_a: &str, text_b: &str, settings: &Settings) -> Result<Self, InputError> {
        let (a, b) = load_tables(text_a, text_b, &settings.paste)?;
        let operations = settings.aligner.operations(&a, &b);
        let result = settings.aligner.expand(&a, &b, &operations);
        Ok(Self {
            a,
            b,
            operations,
            result,
        })
    }

    /// "Loaded Data A: 2 rows, 3 columns"
    pub fn shape(&self, side: Side) -> String {
        let table = match side {
            Side::A => &self.a,
            Side::B => &self.b,
        };
        format!(
            "Loaded Data {}: {} rows, {} columns",
            side,
            table.len(),
            table.width()
        )
    }
}
