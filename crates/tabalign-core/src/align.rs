//! Row alignment engine

use crate::key::{keys_for, RowKey};
use crate::result::{AlignedRow, DiffLabel, ResultTable};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffTag};
use std::ops::Range;
use std::time::{Duration, Instant};
use tracing::debug;

/// The kind of an alignment operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    /// Rows are identical on both sides
    Equal,
    /// A block of A rows stands where a block of B rows stands
    Replace,
    /// Rows only present in A
    Delete,
    /// Rows only present in B
    Insert,
}

/// One alignment instruction: `[i1, i2)` into A and `[j1, j2)` into B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OpKind,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl Operation {
    pub fn new(kind: OpKind, i1: usize, i2: usize, j1: usize, j2: usize) -> Self {
        Self { kind, i1, i2, j1, j2 }
    }

    pub fn a_range(&self) -> Range<usize> {
        self.i1..self.i2
    }

    pub fn b_range(&self) -> Range<usize> {
        self.j1..self.j2
    }

    pub fn len_a(&self) -> usize {
        self.i2 - self.i1
    }

    pub fn len_b(&self) -> usize {
        self.j2 - self.j1
    }

    /// Number of aligned rows this operation expands to.
    pub fn output_rows(&self) -> usize {
        self.len_a().max(self.len_b())
    }

    /// Operation covering a divergent gap, classified by which sides are non-empty.
    fn change(a: Range<usize>, b: Range<usize>) -> Option<Self> {
        let kind = match (a.is_empty(), b.is_empty()) {
            (true, true) => return None,
            (false, true) => OpKind::Delete,
            (true, false) => OpKind::Insert,
            (false, false) => OpKind::Replace,
        };
        Some(Self::new(kind, a.start, a.end, b.start, b.end))
    }
}

/// Diff algorithm used for the alignment step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<AlignAlgorithm> for Algorithm {
    fn from(value: AlignAlgorithm) -> Self {
        match value {
            AlignAlgorithm::Myers => Algorithm::Myers,
            AlignAlgorithm::Patience => Algorithm::Patience,
            AlignAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// The main alignment engine
///
/// Holds configuration only, so a single instance can serve any number of
/// comparisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aligner {
    algorithm: AlignAlgorithm,
    /// Upper bound on time spent in the diff primitive
    timeout: Option<Duration>,
}

impl Aligner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: AlignAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Past the deadline the diff falls back to a coarser alignment, which
    /// still satisfies every operation invariant.
    pub fn with_deadline(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn algorithm(&self) -> AlignAlgorithm {
        self.algorithm
    }

    /// Compare two tables and produce the annotated result.
    pub fn compare(&self, a: &Table, b: &Table) -> ResultTable {
        let ops = self.operations(a, b);
        self.expand(a, b, &ops)
    }

    /// Alignment step: ordered operations covering both tables.
    pub fn operations(&self, a: &Table, b: &Table) -> Vec<Operation> {
        let keys_a = keys_for(a);
        let keys_b = keys_for(b);
        self.diff_keys(&keys_a, &keys_b)
    }

    pub fn diff_keys(&self, a: &[RowKey], b: &[RowKey]) -> Vec<Operation> {
        let started = Instant::now();
        let deadline = self.timeout.map(|t| started + t);
        let raw = similar::capture_diff_slices_deadline(self.algorithm.into(), a, b, deadline);
        let ops = normalize(raw.iter().map(|op| op.as_tag_tuple()), a.len(), b.len());
        debug!(
            algorithm = ?self.algorithm,
            rows_a = a.len(),
            rows_b = b.len(),
            ops = ops.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "aligned row keys"
        );
        ops
    }

    /// Expansion step: turn operations into aligned rows, in operation order.
    pub fn expand(&self, a: &Table, b: &Table, ops: &[Operation]) -> ResultTable {
        let capacity = ops.iter().map(Operation::output_rows).sum();
        let mut rows = Vec::with_capacity(capacity);

        for op in ops {
            match op.kind {
                OpKind::Equal => {
                    for k in 0..op.len_a() {
                        rows.push(AlignedRow::new(
                            a.rows()[op.i1 + k].clone(),
                            b.rows()[op.j1 + k].clone(),
                            DiffLabel::Match,
                        ));
                    }
                }
                OpKind::Delete => {
                    for k in 0..op.len_a() {
                        rows.push(AlignedRow::new(
                            a.rows()[op.i1 + k].clone(),
                            b.blank_row(),
                            DiffLabel::OnlyInA,
                        ));
                    }
                }
                OpKind::Insert => {
                    for k in 0..op.len_b() {
                        rows.push(AlignedRow::new(
                            a.blank_row(),
                            b.rows()[op.j1 + k].clone(),
                            DiffLabel::OnlyInB,
                        ));
                    }
                }
                OpKind::Replace => {
                    // Positional pairing within the block; no nested alignment.
                    let (len_a, len_b) = (op.len_a(), op.len_b());
                    for k in 0..len_a.max(len_b) {
                        let in_a = k < len_a;
                        let in_b = k < len_b;
                        let row_a = if in_a {
                            a.rows()[op.i1 + k].clone()
                        } else {
                            a.blank_row()
                        };
                        let row_b = if in_b {
                            b.rows()[op.j1 + k].clone()
                        } else {
                            b.blank_row()
                        };
                        let label = match (in_a, in_b) {
                            (true, true) => DiffLabel::Mismatch,
                            (true, false) => DiffLabel::OnlyInA,
                            _ => DiffLabel::OnlyInB,
                        };
                        rows.push(AlignedRow::new(row_a, row_b, label));
                    }
                }
            }
        }

        debug!(rows = rows.len(), "expanded operations");
        ResultTable::new(a.columns().to_vec(), b.columns().to_vec(), rows)
    }
}

/// Compare two tables with the default aligner.
pub fn align_tables(a: &Table, b: &Table) -> ResultTable {
    Aligner::new().compare(a, b)
}

/// Bring raw diff output into canonical form.
///
/// Adjacent equal runs are merged, and every gap between equal runs becomes
/// exactly one Replace, Delete, or Insert. Gaps the input leaves uncovered
/// (there should be none) are folded into the surrounding change block so the
/// result always partitions `[0, len_a)` and `[0, len_b)`.
fn normalize<I>(raw: I, len_a: usize, len_b: usize) -> Vec<Operation>
where
    I: IntoIterator<Item = (DiffTag, Range<usize>, Range<usize>)>,
{
    let mut ops: Vec<Operation> = Vec::new();
    // Cursor: everything before (a, b) has been emitted.
    let (mut a, mut b) = (0usize, 0usize);

    for (tag, old, new) in raw {
        if tag != DiffTag::Equal || old.is_empty() {
            continue;
        }
        // Flush the divergent gap leading up to this equal run.
        if let Some(op) = Operation::change(a..old.start, b..new.start) {
            ops.push(op);
        }
        match ops.last_mut() {
            Some(prev)
                if prev.kind == OpKind::Equal && prev.i2 == old.start && prev.j2 == new.start =>
            {
                prev.i2 = old.end;
                prev.j2 = new.end;
            }
            _ => ops.push(Operation::new(
                OpKind::Equal,
                old.start,
                old.end,
                new.start,
                new.end,
            )),
        }
        a = old.end;
        b = new.end;
    }

    if let Some(op) = Operation::change(a..len_a, b..len_b) {
        ops.push(op);
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        let width = rows.first().map_or(2, |r| r.len());
        Table::from_rows(width, rows.iter().map(|r| r.iter().copied())).unwrap()
    }

    fn labels(result: &ResultTable) -> Vec<DiffLabel> {
        result.rows().iter().map(|r| r.label).collect()
    }

    fn assert_partition(ops: &[Operation], len_a: usize, len_b: usize) {
        let (mut a, mut b) = (0, 0);
        for op in ops {
            assert_eq!(op.i1, a, "A spans must be contiguous: {:?}", ops);
            assert_eq!(op.j1, b, "B spans must be contiguous: {:?}", ops);
            assert!(op.i2 >= op.i1 && op.j2 >= op.j1);
            a = op.i2;
            b = op.j2;
        }
        assert_eq!((a, b), (len_a, len_b), "spans must cover both tables");
    }

    #[test]
    fn test_identical_tables_all_match() {
        let a = table(&[&["x", "1"], &["y", "2"]]);
        let b = a.clone();

        let result = align_tables(&a, &b);

        assert_eq!(labels(&result), vec![DiffLabel::Match, DiffLabel::Match]);
        assert_eq!(result.rows()[0].a, vec!["x", "1"]);
        assert_eq!(result.rows()[0].b, vec!["x", "1"]);
        assert_eq!(result.rows()[1].a, vec!["y", "2"]);
        assert_eq!(result.rows()[1].b, vec!["y", "2"]);
    }

    #[test]
    fn test_identical_tables_single_equal_op() {
        let a = table(&[&["x", "1"], &["y", "2"], &["z", "3"]]);
        let ops = Aligner::new().operations(&a, &a);
        assert_eq!(ops, vec![Operation::new(OpKind::Equal, 0, 3, 0, 3)]);
    }

    #[test]
    fn test_empty_b_only_in_a() {
        let a = Table::from_rows(2, [["x", "1"]]).unwrap();
        let b = Table::from_rows(1, Vec::<Vec<&str>>::new()).unwrap();

        let result = align_tables(&a, &b);

        assert_eq!(result.len(), 1);
        let row = &result.rows()[0];
        assert_eq!(row.label, DiffLabel::OnlyInA);
        assert_eq!(row.a, vec!["x", "1"]);
        assert_eq!(row.b, vec![""]);
    }

    #[test]
    fn test_insert_in_middle_keeps_matches() {
        let a = table(&[&["x", "1"], &["z", "9"]]);
        let b = table(&[&["x", "1"], &["y", "2"], &["z", "9"]]);

        let ops = Aligner::new().operations(&a, &b);
        assert_eq!(
            ops,
            vec![
                Operation::new(OpKind::Equal, 0, 1, 0, 1),
                Operation::new(OpKind::Insert, 1, 1, 1, 2),
                Operation::new(OpKind::Equal, 1, 2, 2, 3),
            ]
        );

        let result = Aligner::new().expand(&a, &b, &ops);
        assert_eq!(
            labels(&result),
            vec![DiffLabel::Match, DiffLabel::OnlyInB, DiffLabel::Match]
        );
        assert_eq!(result.rows()[1].a, vec!["", ""]);
        assert_eq!(result.rows()[1].b, vec!["y", "2"]);
        assert_eq!(result.rows()[2].a, vec!["z", "9"]);
    }

    #[test]
    fn test_single_change_is_one_mismatch() {
        let a = table(&[&["a", "1"]]);
        let b = table(&[&["a", "2"]]);

        let ops = Aligner::new().operations(&a, &b);
        assert_eq!(ops, vec![Operation::new(OpKind::Replace, 0, 1, 0, 1)]);

        let result = align_tables(&a, &b);
        assert_eq!(labels(&result), vec![DiffLabel::Mismatch]);
        assert_eq!(result.rows()[0].a, vec!["a", "1"]);
        assert_eq!(result.rows()[0].b, vec!["a", "2"]);
    }

    #[test]
    fn test_replace_longer_b_tails_only_in_b() {
        let a = table(&[&["k", "0"], &["a", "1"], &["k", "9"]]);
        let b = table(&[&["k", "0"], &["b", "1"], &["b", "2"], &["b", "3"], &["k", "9"]]);

        let result = align_tables(&a, &b);
        assert_eq!(
            labels(&result),
            vec![
                DiffLabel::Match,
                DiffLabel::Mismatch,
                DiffLabel::OnlyInB,
                DiffLabel::OnlyInB,
                DiffLabel::Match,
            ]
        );
        assert_eq!(result.rows()[1].a, vec!["a", "1"]);
        assert_eq!(result.rows()[1].b, vec!["b", "1"]);
        assert_eq!(result.rows()[2].a, vec!["", ""]);
        assert_eq!(result.rows()[3].b, vec!["b", "3"]);
    }

    #[test]
    fn test_replace_longer_a_tails_only_in_a() {
        let a = table(&[&["a", "1"], &["a", "2"], &["a", "3"]]);
        let b = table(&[&["b", "1"]]);

        let result = align_tables(&a, &b);
        assert_eq!(
            labels(&result),
            vec![DiffLabel::Mismatch, DiffLabel::OnlyInA, DiffLabel::OnlyInA]
        );
        assert_eq!(result.rows()[2].a, vec!["a", "3"]);
        assert_eq!(result.rows()[2].b, vec!["", ""]);
    }

    #[test]
    fn test_disjoint_tables_single_replace() {
        let a = table(&[&["a", "1"], &["a", "2"]]);
        let b = table(&[&["b", "1"], &["b", "2"], &["b", "3"]]);

        let ops = Aligner::new().operations(&a, &b);
        assert_eq!(ops, vec![Operation::new(OpKind::Replace, 0, 2, 0, 3)]);
        assert_eq!(align_tables(&a, &b).len(), 3);
    }

    #[test]
    fn test_both_empty() {
        let a = Table::from_rows(2, Vec::<Vec<&str>>::new()).unwrap();
        let b = Table::from_rows(3, Vec::<Vec<&str>>::new()).unwrap();

        assert!(Aligner::new().operations(&a, &b).is_empty());
        let result = align_tables(&a, &b);
        assert!(result.is_empty());
        assert_eq!(result.columns().len(), 6);
    }

    #[test]
    fn test_different_widths() {
        let a = Table::from_rows(1, [["x"], ["y"]]).unwrap();
        let b = Table::from_rows(3, [["x", "", ""], ["y", "2", "3"]]).unwrap();

        let result = align_tables(&a, &b);
        for row in result.rows() {
            assert_eq!(row.a.len(), 1);
            assert_eq!(row.b.len(), 3);
        }
        assert!(result.rows().iter().all(|r| r.label != DiffLabel::Match));
    }

    #[test]
    fn test_zero_width_row_does_not_match_single_empty_cell() {
        let a = Table::from_rows(0, [Vec::<&str>::new()]).unwrap();
        let b = Table::from_rows(1, [[""]]).unwrap();

        let result = align_tables(&a, &b);
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0].label, DiffLabel::Mismatch);
        assert!(result.rows()[0].a.is_empty());
        assert_eq!(result.rows()[0].b, vec![String::new()]);
    }

    #[test]
    fn test_all_algorithms_partition() {
        let a = table(&[&["a", "1"], &["b", "2"], &["c", "3"], &["d", "4"], &["a", "1"]]);
        let b = table(&[&["b", "2"], &["x", "0"], &["d", "4"], &["a", "1"], &["e", "5"]]);

        for algorithm in [AlignAlgorithm::Myers, AlignAlgorithm::Patience, AlignAlgorithm::Lcs] {
            let aligner = Aligner::new().with_algorithm(algorithm);
            let ops = aligner.operations(&a, &b);
            assert_partition(&ops, a.len(), b.len());
            let expected: usize = ops.iter().map(Operation::output_rows).sum();
            assert_eq!(aligner.compare(&a, &b).len(), expected, "{:?}", algorithm);
        }
    }

    #[test]
    fn test_zero_deadline_still_partitions() {
        let a = table(&[&["a", "1"], &["b", "2"], &["c", "3"]]);
        let b = table(&[&["a", "1"], &["c", "3"], &["d", "4"]]);

        let aligner = Aligner::new().with_deadline(Duration::ZERO);
        let ops = aligner.operations(&a, &b);
        assert_partition(&ops, 3, 3);
    }

    #[test]
    fn test_normalize_merges_equal_runs() {
        let raw = vec![
            (DiffTag::Equal, 0..1, 0..1),
            (DiffTag::Equal, 1..3, 1..3),
        ];
        assert_eq!(
            normalize(raw, 3, 3),
            vec![Operation::new(OpKind::Equal, 0, 3, 0, 3)]
        );
    }

    #[test]
    fn test_normalize_folds_delete_and_insert_into_replace() {
        let raw = vec![
            (DiffTag::Equal, 0..1, 0..1),
            (DiffTag::Insert, 1..1, 1..2),
            (DiffTag::Delete, 1..2, 2..2),
            (DiffTag::Equal, 2..3, 2..3),
        ];
        assert_eq!(
            normalize(raw, 3, 3),
            vec![
                Operation::new(OpKind::Equal, 0, 1, 0, 1),
                Operation::new(OpKind::Replace, 1, 2, 1, 2),
                Operation::new(OpKind::Equal, 2, 3, 2, 3),
            ]
        );
    }

    #[test]
    fn test_normalize_trailing_gap() {
        let raw = vec![(DiffTag::Equal, 0..1, 0..1)];
        assert_eq!(
            normalize(raw, 3, 1),
            vec![
                Operation::new(OpKind::Equal, 0, 1, 0, 1),
                Operation::new(OpKind::Delete, 1, 3, 1, 1),
            ]
        );
    }

    #[test]
    fn test_operation_serializes_lowercase_kind() {
        let op = Operation::new(OpKind::Insert, 1, 1, 1, 2);
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"kind":"insert","i1":1,"i2":1,"j1":1,"j2":2}"#);
    }
}
