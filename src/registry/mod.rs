//! Explicit name-to-function dispatch, [`Registry`].
//!
//! Pipelines can be assembled from named steps: register a unary function once,
//! then apply it anywhere with [`call`](crate::flow::Flow::call) or per column
//! with [`apply`](crate::frame::Frame::apply). Resolution failures are loud
//! ([`UnknownFunction`](error::UnknownFunction)), and the sequence core's own
//! operation names are reserved so a registered function can never shadow a
//! built-in.

pub mod error;
pub mod registry;


#[doc(inline)]
pub use registry::Registry;
