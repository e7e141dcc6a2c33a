//! Aligned comparison output

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking columns that come from table A
pub const A_PREFIX: &str = "A_";
/// Prefix marking columns that come from table B
pub const B_PREFIX: &str = "B_";
/// Name of the classification column
pub const LABEL_COLUMN: &str = "Diff_Type";

/// Classification of one aligned row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffLabel {
    /// Both sides present and equal
    #[serde(rename = "Match")]
    Match,
    /// Both sides present, paired positionally inside a replace block
    #[serde(rename = "Mismatch")]
    Mismatch,
    #[serde(rename = "Only in A")]
    OnlyInA,
    #[serde(rename = "Only in B")]
    OnlyInB,
}

impl DiffLabel {
    pub const ALL: [DiffLabel; 4] = [
        DiffLabel::Match,
        DiffLabel::Mismatch,
        DiffLabel::OnlyInA,
        DiffLabel::OnlyInB,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiffLabel::Match => "Match",
            DiffLabel::Mismatch => "Mismatch",
            DiffLabel::OnlyInA => "Only in A",
            DiffLabel::OnlyInB => "Only in B",
        }
    }

    /// Check if this row is a difference (not a match)
    pub fn is_difference(&self) -> bool {
        *self != DiffLabel::Match
    }
}

impl fmt::Display for DiffLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row: A's values, B's values, and the classification.
///
/// A side that has no row here carries a blank row of empty strings as wide
/// as its table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub a: Vec<String>,
    pub b: Vec<String>,
    pub label: DiffLabel,
}

impl AlignedRow {
    pub fn new(a: Vec<String>, b: Vec<String>, label: DiffLabel) -> Self {
        Self { a, b, label }
    }

    /// Flatten into the result table's column layout.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.a
            .iter()
            .chain(self.b.iter())
            .map(String::as_str)
            .chain(std::iter::once(self.label.as_str()))
    }
}

/// Count of rows per label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub matches: usize,
    pub mismatches: usize,
    pub only_in_a: usize,
    pub only_in_b: usize,
}

impl DiffSummary {
    pub fn record(&mut self, label: DiffLabel) {
        match label {
            DiffLabel::Match => self.matches += 1,
            DiffLabel::Mismatch => self.mismatches += 1,
            DiffLabel::OnlyInA => self.only_in_a += 1,
            DiffLabel::OnlyInB => self.only_in_b += 1,
        }
    }

    pub fn count(&self, label: DiffLabel) -> usize {
        match label {
            DiffLabel::Match => self.matches,
            DiffLabel::Mismatch => self.mismatches,
            DiffLabel::OnlyInA => self.only_in_a,
            DiffLabel::OnlyInB => self.only_in_b,
        }
    }

    pub fn total(&self) -> usize {
        self.matches + self.mismatches + self.only_in_a + self.only_in_b
    }

    pub fn differences(&self) -> usize {
        self.total() - self.matches
    }

    /// True when every row matched, including the trivial empty comparison.
    pub fn is_identical(&self) -> bool {
        self.differences() == 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} match, {} mismatch, {} only in A, {} only in B",
            self.matches, self.mismatches, self.only_in_a, self.only_in_b
        )
    }
}

/// Ordered aligned rows plus the column names of both inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    a_columns: Vec<String>,
    b_columns: Vec<String>,
    rows: Vec<AlignedRow>,
}

impl ResultTable {
    pub fn new(a_columns: Vec<String>, b_columns: Vec<String>, rows: Vec<AlignedRow>) -> Self {
        Self {
            a_columns,
            b_columns,
            rows,
        }
    }

    /// Output column names: `A_*`, then `B_*`, then [`LABEL_COLUMN`].
    pub fn columns(&self) -> Vec<String> {
        self.a_columns
            .iter()
            .map(|c| format!("{}{}", A_PREFIX, c))
            .chain(self.b_columns.iter().map(|c| format!("{}{}", B_PREFIX, c)))
            .chain(std::iter::once(LABEL_COLUMN.to_string()))
            .collect()
    }

    pub fn a_columns(&self) -> &[String] {
        &self.a_columns
    }

    pub fn b_columns(&self) -> &[String] {
        &self.b_columns
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_with(&self, label: DiffLabel) -> impl Iterator<Item = &AlignedRow> {
        self.rows.iter().filter(move |r| r.label == label)
    }

    /// Rows that are not matches, in order
    pub fn differences(&self) -> impl Iterator<Item = &AlignedRow> {
        self.rows.iter().filter(|r| r.label.is_difference())
    }

    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for row in &self.rows {
            summary.record(row.label);
        }
        summary
    }
}
