use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// A name that resolved to no registered function.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownFunction {
    /// The name that failed to resolve.
    pub name: String,
}

impl Display for UnknownFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "No function registered under the name {:?}!", self.name)
    }
}

impl Error for UnknownFunction {}

/// An attempt to register a function under one of the sequence core's own
/// operation names.
#[derive(Debug, PartialEq, Eq)]
pub struct ReservedName {
    /// The rejected name.
    pub name: String,
}

impl Display for ReservedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} is a sequence operation and cannot be registered!",
            self.name
        )
    }
}

impl Error for ReservedName {}
