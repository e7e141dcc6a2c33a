//! Row keys used for equality during alignment

use crate::table::Table;

/// Marker placed before each column value when building a [`RowKey`].
///
/// Unit separator, record separator, unit separator. Spreadsheet clipboard
/// text never carries these, but nothing stops a caller from building a table
/// whose cells contain them: a cell holding this sequence can make two
/// different rows key equal (or the reverse). That case is not detected.
pub const KEY_DELIMITER: &str = "\u{1f}\u{1e}\u{1f}";

/// Comparable key for one row. Never shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(String);

impl RowKey {
    /// Concatenate the row's values in column order, each preceded by
    /// [`KEY_DELIMITER`], so rows of different widths never share a key.
    pub fn from_row<S: AsRef<str>>(values: &[S]) -> Self {
        let mut key = String::with_capacity(
            values.iter().map(|v| v.as_ref().len()).sum::<usize>()
                + KEY_DELIMITER.len() * values.len(),
        );
        for value in values {
            key.push_str(KEY_DELIMITER);
            key.push_str(value.as_ref());
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key every row of `table`, in row order.
pub fn keys_for(table: &Table) -> Vec<RowKey> {
    table.rows().iter().map(|r| RowKey::from_row(r.as_slice())).collect()
}
