//! Chainable, mode-aware sequences for exploratory data processing.
//!
//! # Purpose
//! This crate grew out of wanting `Iterator`-style chaining for messy, exploratory
//! work: pipelines that can switch between materialized and deferred evaluation
//! mid-chain, and that can be told to soak up per-element failures instead of
//! dying on the first bad record. It is a single-process convenience layer over
//! sequence and tabular data, not an execution engine.
//!
//! # The pieces
//! - [`Flow`](flow::Flow) is the core: a sequence that is either *eager* (a
//!   materialized, ordered buffer) or *lazy* (a pending chain over a pull-based
//!   source). Transformations on an eager flow run immediately; on a lazy flow
//!   they are recorded and only run when a terminal such as
//!   [`to_vec`](flow::Flow::to_vec) or [`run`](flow::Flow::run) forces them.
//! - [`Item`](item::Item) marks each element as either a computed value or the
//!   hole left behind by a contained failure. Pipelines opt into containment with
//!   [`safe`](flow::Flow::safe) and settle the holes later with
//!   [`drop_empty`](flow::Flow::drop_empty) or
//!   [`fill_empty`](flow::Flow::fill_empty).
//! - [`Registry`](registry::Registry) maps names to unary functions so pipelines
//!   can be assembled from named steps ([`call`](flow::Flow::call)) without
//!   giving up static typing. Lookup failures are loud, and the core's own
//!   operation names can never be shadowed.
//! - [`Frame`](frame::Frame) applies the same named steps to single columns of a
//!   column-oriented table. Storage stays behind the
//!   [`ColumnStore`](frame::ColumnStore) trait; this crate only ships the
//!   test-grade [`MemTable`](frame::MemTable).
//!
//! # Error Handling
//! Structural mistakes (a zero batch size, an unknown column, indexing a lazy
//! flow) are strongly-typed [`Result`]s and always propagate. Failures *inside*
//! user functions are different: by default they propagate too (fail-fast), but a
//! [`safe`](flow::Flow::safe) flow catches them per element and records an
//! [`Absent`](item::Item::Absent) marker so the rest of the pipeline keeps
//! moving. A few convenience methods (`flow[i]`, [`to_vec`](flow::Flow::to_vec))
//! prefer panicking over returning a `Result` for ergonomics; each documents
//! exactly when.
//!
//! # Concurrency
//! None. Everything here is single-threaded and synchronous by design; the lazy
//! source is a pull-based iterator, not an async stream. Registered functions are
//! shared with [`Rc`](std::rc::Rc), deliberately not `Send`.
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::missing_const_for_fn)]
#![allow(clippy::module_inception)]

pub mod flow;
#[cfg(feature = "frame")]
pub mod frame;
pub mod item;
pub mod registry;

pub(crate) mod util;
