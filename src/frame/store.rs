use std::fmt::{self, Debug, Formatter};

use super::error::ColumnLengthMismatch;

/// Column-oriented storage a [`Frame`](super::Frame) delegates to.
///
/// The adapter never stores table data itself; implement this trait over a real
/// columnar backend to point it at one. Columns are named, hold one value per
/// row in row-index order, and are replaced wholesale: the adapter always
/// materializes a full output column before writing it.
pub trait ColumnStore {
    /// The element type stored in every column.
    type Value;

    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the column names in table order.
    fn names(&self) -> Vec<&str>;

    /// Borrows the named column in row order, if it exists.
    fn column(&self, name: &str) -> Option<&[Self::Value]>;

    /// Creates or overwrites the named column, leaving all other columns and
    /// the row order unchanged. Callers must supply exactly
    /// [`row_count`](ColumnStore::row_count) values.
    fn write_column(&mut self, name: &str, values: Vec<Self::Value>);
}

/// A minimal in-memory [`ColumnStore`]: named columns of equal length, kept in
/// insertion order. This is the test- and demo-grade backend; it makes no
/// attempt at columnar compression or zero-copy anything.
///
/// # Examples
/// ```
/// use flowseq::frame::{ColumnStore, MemTable};
///
/// let table = MemTable::new()
///     .with_column("a", vec![1, 2, 3])
///     .unwrap()
///     .with_column("b", vec![4, 5, 6])
///     .unwrap();
///
/// assert_eq!(table.row_count(), 3);
/// assert_eq!(table.names(), vec!["a", "b"]);
/// assert_eq!(table.column("b"), Some(&[4, 5, 6][..]));
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct MemTable<V> {
    columns: Vec<(String, Vec<V>)>,
}

impl<V> MemTable<V> {
    /// Creates a table with no columns and no rows.
    pub const fn new() -> MemTable<V> {
        MemTable {
            columns: Vec::new(),
        }
    }

    /// Adds or replaces a column, builder style. The first column fixes the
    /// table's row count; every later column must match it.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<V>,
    ) -> Result<MemTable<V>, ColumnLengthMismatch> {
        if let Some((_, first)) = self.columns.first() {
            if first.len() != values.len() {
                return Err(ColumnLengthMismatch {
                    expected: first.len(),
                    actual: values.len(),
                });
            }
        }
        let name = name.into();
        match self.columns.iter().position(|(n, _)| *n == name) {
            Some(index) => self.columns[index].1 = values,
            None => self.columns.push((name, values)),
        }
        Ok(self)
    }
}

impl<V> ColumnStore for MemTable<V> {
    type Value = V;

    fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn column(&self, name: &str) -> Option<&[V]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    fn write_column(&mut self, name: &str, values: Vec<V>) {
        match self.columns.iter().position(|(n, _)| n == name) {
            Some(index) => self.columns[index].1 = values,
            None => self.columns.push((name.to_owned(), values)),
        }
    }
}

impl<V: Debug> Debug for MemTable<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, values) in &self.columns {
            map.entry(name, values);
        }
        map.finish()
    }
}
