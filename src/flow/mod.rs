//! The chainable sequence core, [`Flow`], and its satellites.
//!
//! A [`Flow`] is created from a finite collection ([`Flow::of`]) or a lazy
//! pull-based source ([`Flow::source`]), transformed through chaining calls,
//! and drained by a terminal. [`Window`] groups elements for
//! [`batch`](Flow::batch)/[`rolling`](Flow::rolling), [`StopToken`] bounds
//! terminals over unbounded sources, and [`error`] holds the strongly-typed
//! failures of the structural operations.

pub mod error;
pub mod flow;
pub mod iter;
pub mod stop;
pub mod window;


#[doc(inline)]
pub use flow::Flow;
#[doc(inline)]
pub use iter::Items;
#[doc(inline)]
pub use stop::StopToken;
#[doc(inline)]
pub use window::Window;
