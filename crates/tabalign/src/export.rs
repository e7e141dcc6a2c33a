//! Writing comparison results to files

use crate::cli::ExportFormat;
use crate::output::{write_csv_report, write_json_report, Report};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tabalign_core::{Operation, ResultTable};
use thiserror::Error;

pub const SHEET_NAME: &str = "Comparison Result";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XLSX error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write {format:?}: {message}")]
    Encode {
        format: ExportFormat,
        message: String,
    },
    #[error("Cannot infer export format from {0}; pass --export-format")]
    UnknownFormat(String),
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx") => Ok(ExportFormat::Xlsx),
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnknownFormat(path.display().to_string())),
        }
    }
}

/// Write `result` to `path` in the given format.
pub fn export_result(
    result: &ResultTable,
    operations: &[Operation],
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Xlsx => {
            let mut workbook = build_workbook(result)?;
            workbook.save(path)?;
        }
        ExportFormat::Csv => {
            let mut file = BufWriter::new(File::create(path)?);
            write_csv_report(&mut file, result, false).map_err(|e| ExportError::Encode {
                format,
                message: e.to_string(),
            })?;
            file.flush()?;
        }
        ExportFormat::Json => {
            let mut file = BufWriter::new(File::create(path)?);
            let report = Report::new(result, operations, false);
            write_json_report(&mut file, &report).map_err(|e| ExportError::Encode {
                format,
                message: e.to_string(),
            })?;
            file.flush()?;
        }
    }
    tracing::info!(path = %path.display(), ?format, rows = result.len(), "exported result");
    Ok(())
}

/// One sheet, bold header row, every cell written as text.
pub fn build_workbook(result: &ResultTable) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    write_result_sheet(sheet, result, &header_format)?;
    Ok(workbook)
}

fn write_result_sheet(
    sheet: &mut Worksheet,
    result: &ResultTable,
    header: &Format,
) -> Result<(), XlsxError> {
    for (idx, title) in result.columns().iter().enumerate() {
        sheet.write_string_with_format(0, idx as u16, title, header)?;
    }

    for (r, row) in result.rows().iter().enumerate() {
        let excel_row = r as u32 + 1;
        for (idx, cell) in row.cells().enumerate() {
            sheet.write_string(excel_row, idx as u16, cell)?;
        }
    }

    for (idx, width) in column_widths(result).into_iter().enumerate() {
        sheet.set_column_width(idx as u16, width as f64)?;
    }
    Ok(())
}

/// Longest cell or header in each column, plus two characters.
pub fn column_widths(result: &ResultTable) -> Vec<usize> {
    let mut widths: Vec<usize> = result.columns().iter().map(|c| c.chars().count()).collect();
    for row in result.rows() {
        for (idx, cell) in row.cells().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }
    widths.into_iter().map(|w| w + 2).collect()
}
