use super::error::{ApplyError, ColumnLengthMismatch, UnknownColumn};
use super::store::ColumnStore;
use crate::flow::Flow;
use crate::registry::Registry;

/// Tabular adapter: applies registered functions to named columns of a wrapped
/// [`ColumnStore`].
///
/// Application is element-wise per row, independent across rows, in row-index
/// order from the top; each application materializes its entire output column
/// before the next one begins. Both the function name and the input column are
/// resolved before any row is touched, so a misspelling fails up front (with
/// the table intact) instead of halfway through a column.
///
/// Column applications mutate the wrapped store through an exclusive borrow and
/// return `&mut self` for chaining, in the style of
/// [`Command`](std::process::Command). The adapter composes a table reference;
/// it is not a sequence itself. To run a containment-wrapped pipeline over one
/// column, pull it out with [`column_flow`](Frame::column_flow), settle the
/// holes, and write the result back with [`with_column`](Frame::with_column).
///
/// # Examples
/// ```
/// use flowseq::frame::{ColumnStore, Frame, MemTable};
/// use flowseq::registry::Registry;
///
/// let mut registry = Registry::new();
/// registry.register("add1", |x: i64| x + 1).unwrap();
/// registry.register("mul2", |x: i64| x * 2).unwrap();
///
/// let table = MemTable::new()
///     .with_column("a", vec![0_i64, 1, 2, 3, 4])
///     .unwrap();
/// let mut frame = Frame::new(table);
/// frame
///     .apply_into("add1", "a", "b", &registry)
///     .unwrap()
///     .apply_into("mul2", "b", "c", &registry)
///     .unwrap();
///
/// assert_eq!(frame.store().column("b"), Some(&[1_i64, 2, 3, 4, 5][..]));
/// assert_eq!(frame.store().column("c"), Some(&[2_i64, 4, 6, 8, 10][..]));
/// ```
#[derive(Debug)]
pub struct Frame<S> {
    store: S,
}

impl<S: ColumnStore> Frame<S> {
    /// Wraps an existing table.
    pub const fn new(store: S) -> Frame<S> {
        Frame { store }
    }

    /// Unwraps the adapter back into the table.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Borrows the wrapped table.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the number of rows in the wrapped table.
    pub fn row_count(&self) -> usize {
        self.store.row_count()
    }
}

impl<S: ColumnStore> Frame<S>
where
    S::Value: Clone + 'static,
{
    /// Applies the function registered under `name` to `column` in place:
    /// reads `column` row by row, applies the function element-wise, and
    /// writes the result back over `column`.
    pub fn apply(
        &mut self,
        name: &str,
        column: &str,
        registry: &Registry<S::Value>,
    ) -> Result<&mut Frame<S>, ApplyError> {
        self.apply_into(name, column, column, registry)
    }

    /// Applies the function registered under `name`, reading from `input` and
    /// writing into `output` (created if absent, otherwise overwritten) with
    /// all other columns and the row order left unchanged.
    ///
    /// Fails with [`ApplyError`] when the name is not registered or `input`
    /// does not exist, in both cases before any row has been touched.
    pub fn apply_into(
        &mut self,
        name: &str,
        input: &str,
        output: &str,
        registry: &Registry<S::Value>,
    ) -> Result<&mut Frame<S>, ApplyError> {
        let op = registry.resolve(name)?;
        let values = match self.store.column(input) {
            Some(values) => values.to_vec(),
            None => {
                return Err(UnknownColumn {
                    name: input.to_owned(),
                }
                .into());
            }
        };
        let out: Vec<S::Value> = values.into_iter().map(|value| (*op)(value)).collect();
        self.store.write_column(output, out);
        Ok(self)
    }

    /// Copies the named column out as an eager [`Flow`], for pipelines beyond
    /// single-function application, containment in particular.
    ///
    /// # Examples
    /// ```
    /// use flowseq::frame::{ColumnStore, Frame, MemTable};
    ///
    /// let table = MemTable::new()
    ///     .with_column("x", vec![0_i64, 1, 2])
    ///     .unwrap();
    /// let mut frame = Frame::new(table);
    ///
    /// let filled = frame
    ///     .column_flow("x")
    ///     .unwrap()
    ///     .safe()
    ///     .map(|x| 10 / x)
    ///     .fill_empty(0)
    ///     .to_vec();
    /// frame.with_column("y", filled).unwrap();
    ///
    /// assert_eq!(frame.store().column("y"), Some(&[0_i64, 10, 5][..]));
    /// ```
    pub fn column_flow(&self, name: &str) -> Result<Flow<S::Value>, UnknownColumn> {
        match self.store.column(name) {
            Some(values) => Ok(Flow::of(values.to_vec())),
            None => Err(UnknownColumn {
                name: name.to_owned(),
            }),
        }
    }

    /// Creates or overwrites the named column with `values`, which must hold
    /// exactly one value per row of the wrapped table.
    pub fn with_column(
        &mut self,
        name: &str,
        values: Vec<S::Value>,
    ) -> Result<&mut Frame<S>, ColumnLengthMismatch> {
        let expected = self.store.row_count();
        if !self.store.names().is_empty() && values.len() != expected {
            return Err(ColumnLengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        self.store.write_column(name, values);
        Ok(self)
    }
}
