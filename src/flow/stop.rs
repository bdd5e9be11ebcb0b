use std::cell::Cell;
use std::rc::Rc;

/// Cooperative cancellation handle for [`stop_when`](super::Flow::stop_when).
///
/// Clones share one underlying flag, so a terminal can drain a
/// [`stop_when`](super::Flow::stop_when)-bounded flow while a callback holding
/// another clone decides when to end it. Without such a stage, a terminal over
/// an unbounded source runs until the process is interrupted.
///
/// # Examples
/// ```
/// use flowseq::flow::StopToken;
///
/// let token = StopToken::new();
/// let handle = token.clone();
/// assert!(!token.is_stopped());
/// handle.stop();
/// assert!(token.is_stopped());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    /// Creates a token in the running state.
    pub fn new() -> StopToken {
        StopToken::default()
    }

    /// Requests that production stop before the next element.
    pub fn stop(&self) {
        self.0.set(true);
    }

    /// Returns true once [`stop`](StopToken::stop) has been called on any
    /// clone.
    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}
