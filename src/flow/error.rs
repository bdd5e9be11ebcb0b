use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index at or past the end of a materialized flow.
#[derive(Debug, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The offending index.
    pub index: usize,
    /// The length of the flow at the time of the access.
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Index {} out of bounds for flow with {} elements!",
            self.index, self.len
        )
    }
}

impl Error for IndexOutOfBounds {}

/// Positional access was attempted on a lazy flow, whose elements do not exist
/// yet.
#[derive(Debug, PartialEq, Eq)]
pub struct Unmaterialized;

impl Display for Unmaterialized {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Positional access requires a materialized flow; call unstream() first!"
        )
    }
}

impl Error for Unmaterialized {}

/// A batch or rolling group size of zero.
#[derive(Debug, PartialEq, Eq)]
pub struct SizeZero;

impl Display for SizeZero {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Group size must be at least 1!")
    }
}

impl Error for SizeZero {}

/// A rolling window wider than the materialized flow it should slide over.
#[derive(Debug, PartialEq, Eq)]
pub struct WindowTooLarge {
    /// The requested window width.
    pub window: usize,
    /// The length of the flow.
    pub len: usize,
}

impl Display for WindowTooLarge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Window of {} does not fit a flow with {} elements!",
            self.window, self.len
        )
    }
}

impl Error for WindowTooLarge {}

/// Union of the failures of positional access ([`Flow::get`](super::Flow::get)
/// and [`Flow::replace`](super::Flow::replace)).
#[derive(Debug, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum GetError {
    /// The flow is lazy.
    Unmaterialized(Unmaterialized),
    /// The index is past the end.
    OutOfBounds(IndexOutOfBounds),
}

/// Union of the failures of [`Flow::rolling`](super::Flow::rolling).
#[derive(Debug, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum WindowError {
    /// The window width is zero.
    SizeZero(SizeZero),
    /// The window is wider than the flow.
    TooLarge(WindowTooLarge),
}
