use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

use crate::registry::error::UnknownFunction;

/// A column name that does not exist in the wrapped table.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownColumn {
    /// The missing column's name.
    pub name: String,
}

impl Display for UnknownColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "No column named {:?} in this table!", self.name)
    }
}

impl Error for UnknownColumn {}

/// A column whose length does not match the table's row count.
#[derive(Debug, PartialEq, Eq)]
pub struct ColumnLengthMismatch {
    /// The table's row count.
    pub expected: usize,
    /// The offered column's length.
    pub actual: usize,
}

impl Display for ColumnLengthMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column of {} values does not fit a table with {} rows!",
            self.actual, self.expected
        )
    }
}

impl Error for ColumnLengthMismatch {}

/// Union of the failures of [`Frame::apply`](super::Frame::apply) and
/// [`Frame::apply_into`](super::Frame::apply_into). Both causes are checked
/// before any row is touched.
#[derive(Debug, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum ApplyError {
    /// The input column does not exist.
    UnknownColumn(UnknownColumn),
    /// The named function is not registered.
    UnknownFunction(UnknownFunction),
}
