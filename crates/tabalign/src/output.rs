use crate::text::{display_width, pad_to, single_line, truncate_text, MAX_CELL_WIDTH};
use anyhow::Result;
use crossterm::style::Stylize;
use serde::Serialize;
use std::io::Write;
use tabalign_core::{AlignedRow, DiffLabel, DiffSummary, Operation, ResultTable};

/// Serializable view of one comparison
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub columns: Vec<String>,
    pub operations: &'a [Operation],
    pub rows: Vec<&'a AlignedRow>,
    pub summary: DiffSummary,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a ResultTable, operations: &'a [Operation], only_diff: bool) -> Self {
        Self {
            columns: result.columns(),
            operations,
            rows: visible_rows(result, only_diff).collect(),
            summary: result.summary(),
        }
    }
}

pub fn visible_rows(result: &ResultTable, only_diff: bool) -> impl Iterator<Item = &AlignedRow> {
    result
        .rows()
        .iter()
        .filter(move |r| !only_diff || r.label.is_difference())
}

pub fn write_json_report<W: Write>(w: &mut W, report: &Report<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)?;
    writeln!(w)?;
    Ok(())
}

pub fn write_csv_report<W: Write>(w: W, result: &ResultTable, only_diff: bool) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    writer.write_record(result.columns())?;
    for row in visible_rows(result, only_diff) {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_text_report<W: Write>(
    w: &mut W,
    result: &ResultTable,
    only_diff: bool,
    quiet: bool,
    color: bool,
) -> Result<()> {
    if !quiet {
        let rows: Vec<&AlignedRow> = visible_rows(result, only_diff).collect();
        if rows.is_empty() {
            writeln!(w, "No rows to show.")?;
        } else {
            write_table(w, result.columns(), &rows, color)?;
        }
        writeln!(w)?;
    }
    write_summary(w, &result.summary(), color)
}

fn write_table<W: Write>(
    w: &mut W,
    columns: Vec<String>,
    rows: &[&AlignedRow],
    color: bool,
) -> Result<()> {
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.cells()
                .map(|c| truncate_text(&single_line(c), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = columns
        .iter()
        .map(|c| display_width(c).min(MAX_CELL_WIDTH))
        .collect();
    for cells in &rendered {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(display_width(cell));
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, &width)| pad_to(&truncate_text(c, MAX_CELL_WIDTH), width))
        .collect();
    let header = header.join("  ");
    if color {
        writeln!(w, "{}", header.trim_end().bold())?;
    } else {
        writeln!(w, "{}", header.trim_end())?;
    }

    for (row, cells) in rows.iter().zip(&rendered) {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| pad_to(cell, width))
            .collect();
        let line = line.join("  ");
        let line = line.trim_end();
        if color {
            writeln!(w, "{}", paint(line, row.label))?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}

fn paint(text: &str, label: DiffLabel) -> String {
    match label {
        DiffLabel::Match => text.to_string(),
        DiffLabel::Mismatch => text.yellow().to_string(),
        DiffLabel::OnlyInA => text.red().to_string(),
        DiffLabel::OnlyInB => text.green().to_string(),
    }
}

fn write_summary<W: Write>(w: &mut W, summary: &DiffSummary, color: bool) -> Result<()> {
    let status = if summary.is_identical() {
        "identical"
    } else {
        "different"
    };
    if color {
        let status = if summary.is_identical() {
            status.green().bold()
        } else {
            status.yellow().bold()
        };
        writeln!(w, "{} rows ({}): {}", summary.total(), status, summary)?;
    } else {
        writeln!(w, "{} rows ({}): {}", summary.total(), status, summary)?;
    }
    Ok(())
}
