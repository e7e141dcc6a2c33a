//! Tabalign Core - Row-aligned comparison of two tables
//!
//! This library keys the rows of two tables, aligns the key sequences with an
//! LCS-family diff, and expands the alignment into an annotated result where
//! every row is a Match, a Mismatch, or present only in A or only in B.
//!
//! ```
//! use tabalign_core::{align_tables, DiffLabel, Table};
//!
//! let a = Table::from_rows(2, [["x", "1"], ["z", "9"]]).unwrap();
//! let b = Table::from_rows(2, [["x", "1"], ["y", "2"], ["z", "9"]]).unwrap();
//! let result = align_tables(&a, &b);
//! assert_eq!(result.rows()[1].label, DiffLabel::OnlyInB);
//! ```

pub mod align;
pub mod key;
pub mod paste;
pub mod result;
pub mod table;

pub use align::{align_tables, AlignAlgorithm, Aligner, OpKind, Operation};
pub use key::{keys_for, RowKey, KEY_DELIMITER};
pub use paste::{parse_paste, ParseError, PasteOptions};
pub use result::{AlignedRow, DiffLabel, DiffSummary, ResultTable, LABEL_COLUMN};
pub use table::{Table, TableError};
