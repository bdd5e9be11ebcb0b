//! Shared invocation counters for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

/// Counts how many times a closure was invoked. Clones share the same counter,
/// so one handle can be moved into the closure while the test keeps the other.
#[derive(Debug, Default, Clone)]
pub struct CallCount(Rc<RefCell<usize>>);

impl CallCount {
    /// Creates a counter starting at zero.
    pub fn new() -> CallCount {
        CallCount::default()
    }

    /// Records one invocation.
    pub fn bump(&self) {
        self.0.replace_with(|count| *count + 1);
    }

    /// Returns the number of invocations recorded so far.
    pub fn get(&self) -> usize {
        *self.0.borrow()
    }
}
