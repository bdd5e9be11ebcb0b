use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ops::{Bound, Index, RangeBounds};
use std::panic::{self, AssertUnwindSafe};

use crate::flow::error::{
    GetError, IndexOutOfBounds, SizeZero, Unmaterialized, WindowError, WindowTooLarge,
};
use crate::flow::stop::StopToken;
use crate::flow::window::{Batches, Rolling, Window};
use crate::item::Item::{self, Absent, Present};
use crate::registry::Registry;
use crate::registry::error::UnknownFunction;

/// A chainable, mode-aware sequence. Can be thought of as a `Vec` when built
/// with [`of`](Flow::of) and as an `Iterator` when built with
/// [`source`](Flow::source).
///
/// # Modes
/// An *eager* flow holds a materialized, ordered buffer; every transformation
/// runs immediately and returns a new eager flow. A *lazy* flow holds a
/// pull-based source plus the chain of pending per-element stages; nothing runs
/// until a terminal ([`to_vec`](Flow::to_vec), [`items`](Flow::items),
/// [`run`](Flow::run), [`subscribe`](Flow::subscribe)) forces it.
/// [`stream`](Flow::stream) and [`unstream`](Flow::unstream) convert between the
/// two, preserving order; both are no-ops when the flow is already in the
/// requested mode.
///
/// # Containment
/// [`safe`](Flow::safe) flips the flow into containment: from then on a panic
/// inside a user function costs only that element, which is recorded as
/// [`Absent`](crate::item::Item::Absent) while the rest of the pipeline keeps
/// running. [`drop_empty`](Flow::drop_empty) and
/// [`fill_empty`](Flow::fill_empty) settle the holes. Structural errors (a zero
/// group size, an out-of-range window, an unknown registered name) are ordinary
/// [`Result`]s and propagate regardless of containment.
///
/// # Time Complexity
/// Costs are per *forced* evaluation; on a lazy flow the transformation itself
/// is `O(1)` and the listed cost is paid by the terminal. `n` is the number of
/// elements, `w` the window width.
///
/// | Method | Complexity |
/// |-|-|
/// | `map` / `filter` / `flat_map` | `O(n)` |
/// | `batch` | `O(n)` |
/// | `rolling` | `O(n * w)` |
/// | `get` / `replace` | `O(1)` |
/// | `stream` | `O(1)` |
/// | `unstream` | `O(n)` |
///
/// # Examples
/// ```
/// use flowseq::flow::Flow;
///
/// let out = Flow::of([0, 1, 2, 3, 4])
///     .filter(|x| x % 2 == 1)
///     .map(|x| x + 1)
///     .map(|x| x * 2);
/// assert_eq!(out.to_vec(), vec![4, 8]);
/// ```
pub struct Flow<T> {
    pub(crate) repr: Repr<T>,
    pub(crate) safe: bool,
}

pub(crate) enum Repr<T> {
    Eager(Vec<Item<T>>),
    Lazy(Box<dyn Iterator<Item = Item<T>>>),
}

/// Collects into the eager representation or boxes the pending chain, matching
/// the mode of the flow the elements came from.
fn rebuild<U: 'static>(
    eager: bool,
    safe: bool,
    iter: impl Iterator<Item = Item<U>> + 'static,
) -> Flow<U> {
    if eager {
        Flow {
            repr: Repr::Eager(iter.collect()),
            safe,
        }
    } else {
        Flow {
            repr: Repr::Lazy(Box::new(iter)),
            safe,
        }
    }
}

impl<T> Flow<T> {
    /// Creates an empty eager flow.
    pub const fn new() -> Flow<T> {
        Flow {
            repr: Repr::Eager(Vec::new()),
            safe: false,
        }
    }

    /// Creates an eager flow from a finite ordered collection, preserving
    /// order.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// assert_eq!(Flow::of(0..3).to_vec(), vec![0, 1, 2]);
    /// ```
    pub fn of(items: impl IntoIterator<Item = T>) -> Flow<T> {
        Flow {
            repr: Repr::Eager(items.into_iter().map(Present).collect()),
            safe: false,
        }
    }

    /// Returns true if the flow holds a materialized buffer.
    pub const fn is_eager(&self) -> bool {
        matches!(self.repr, Repr::Eager(_))
    }

    /// Returns true if the flow holds a deferred source.
    pub const fn is_lazy(&self) -> bool {
        matches!(self.repr, Repr::Lazy(_))
    }

    /// Returns true if containment is active.
    pub const fn is_safe(&self) -> bool {
        self.safe
    }

    /// Returns the number of elements, which is only known for an eager flow.
    pub fn len(&self) -> Option<usize> {
        match &self.repr {
            Repr::Eager(items) => Some(items.len()),
            Repr::Lazy(_) => None,
        }
    }

    /// Returns whether the flow holds no elements, which is only known for an
    /// eager flow.
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }

    /// Activates containment: from here on, a panic inside a user function
    /// turns that element into [`Absent`](crate::item::Item::Absent) instead of
    /// unwinding, and later elements still process.
    ///
    /// The panic is caught per element with
    /// [`catch_unwind`](std::panic::catch_unwind); the global panic hook still
    /// runs, so panic messages may appear on stderr.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    /// use flowseq::item::Item;
    ///
    /// let out = Flow::of([1, 2, 3, 4]).safe().map(|x| 10 / (x - 1));
    /// assert_eq!(
    ///     out.items(),
    ///     vec![Item::Absent, Item::Present(10), Item::Present(5), Item::Present(3)],
    /// );
    /// ```
    pub fn safe(mut self) -> Flow<T> {
        self.safe = true;
        self
    }

    /// Borrows the element at `index` of a materialized flow.
    ///
    /// Fails with [`Unmaterialized`] on a lazy flow rather than forcing it, and
    /// with [`IndexOutOfBounds`] past the end.
    pub fn get(&self, index: usize) -> Result<&Item<T>, GetError> {
        match &self.repr {
            Repr::Lazy(_) => Err(Unmaterialized.into()),
            Repr::Eager(items) => {
                let len = items.len();
                items
                    .get(index)
                    .ok_or_else(|| IndexOutOfBounds { index, len }.into())
            }
        }
    }

    /// Replaces the element at `index` of a materialized flow, returning the
    /// previous element.
    pub fn replace(&mut self, index: usize, value: T) -> Result<Item<T>, GetError> {
        match &mut self.repr {
            Repr::Lazy(_) => Err(Unmaterialized.into()),
            Repr::Eager(items) => {
                let len = items.len();
                match items.get_mut(index) {
                    Some(slot) => Ok(mem::replace(slot, Present(value))),
                    None => Err(IndexOutOfBounds { index, len }.into()),
                }
            }
        }
    }
}

impl<T: 'static> Flow<T> {
    /// Creates a lazy flow over a pull-based source. Nothing is consumed until
    /// a terminal forces evaluation, so the source may be expensive or even
    /// unbounded (see [`stop_when`](Flow::stop_when) for the latter).
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// let flow = Flow::source((0..).map(|x| x * x));
    /// assert!(flow.is_lazy());
    /// assert_eq!(flow.head(3).to_vec(), vec![0, 1, 4]);
    /// ```
    pub fn source(iter: impl Iterator<Item = T> + 'static) -> Flow<T> {
        Flow {
            repr: Repr::Lazy(Box::new(iter.map(Present))),
            safe: false,
        }
    }

    /// Converts to the lazy representation. A no-op on a flow that is already
    /// lazy; an eager flow becomes a source over its buffer without copying.
    pub fn stream(self) -> Flow<T> {
        let safe = self.safe;
        match self.repr {
            Repr::Eager(items) => Flow {
                repr: Repr::Lazy(Box::new(items.into_iter())),
                safe,
            },
            lazy @ Repr::Lazy(_) => Flow { repr: lazy, safe },
        }
    }

    /// Converts to the eager representation by fully draining the source
    /// through the pending chain. A no-op on a flow that is already eager.
    ///
    /// Over an unbounded source this never returns; bound it first with
    /// [`head`](Flow::head) or [`stop_when`](Flow::stop_when).
    pub fn unstream(self) -> Flow<T> {
        let safe = self.safe;
        match self.repr {
            Repr::Lazy(iter) => Flow {
                repr: Repr::Eager(iter.collect()),
                safe,
            },
            eager @ Repr::Eager(_) => Flow { repr: eager, safe },
        }
    }

    /// Consumes the flow into its element iterator, erasing the mode.
    pub(crate) fn into_items(self) -> Box<dyn Iterator<Item = Item<T>>> {
        match self.repr {
            Repr::Eager(items) => Box::new(items.into_iter()),
            Repr::Lazy(iter) => iter,
        }
    }

    /// Applies `fn` to every element, preserving order.
    ///
    /// Eager: runs immediately. Lazy: appends a stage to the pending chain.
    /// Under containment a panic in `fn` yields
    /// [`Absent`](crate::item::Item::Absent) for that element; otherwise it
    /// propagates and aborts the transformation. `fn` is never invoked on an
    /// element that is already absent.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// let out = Flow::of([1, 2, 3, 4]).map(|x| x + 1).map(|x| x * 2);
    /// assert_eq!(out.to_vec(), vec![4, 6, 8, 10]);
    /// ```
    pub fn map<U: 'static, F>(self, f: F) -> Flow<U>
    where
        F: FnMut(T) -> U + 'static,
    {
        let (eager, safe) = (self.is_eager(), self.safe);
        let mut f = f;
        let step = move |item: Item<T>| {
            if safe {
                item.map_catching(&mut f)
            } else {
                item.map(&mut f)
            }
        };
        rebuild(eager, safe, self.into_items().map(step))
    }

    /// Keeps the order-preserving subset of elements for which `predicate`
    /// returns true.
    ///
    /// Absent elements are retained without consulting `predicate`; they are
    /// holes to be settled later, not values to be judged. Under containment a
    /// panicking predicate converts the element into a hole (retained).
    pub fn filter<P>(self, predicate: P) -> Flow<T>
    where
        P: FnMut(&T) -> bool + 'static,
    {
        let (eager, safe) = (self.is_eager(), self.safe);
        let mut predicate = predicate;
        let step = move |item: Item<T>| -> Option<Item<T>> {
            match item {
                Absent => Some(Absent),
                Present(value) => {
                    if safe {
                        match panic::catch_unwind(AssertUnwindSafe(|| predicate(&value))) {
                            Ok(true) => Some(Present(value)),
                            Ok(false) => None,
                            Err(_) => Some(Absent),
                        }
                    } else if predicate(&value) {
                        Some(Present(value))
                    } else {
                        None
                    }
                }
            }
        };
        rebuild(eager, safe, self.into_items().filter_map(step))
    }

    /// Applies `fn`, which may produce any number of outputs per input, and
    /// concatenates the results preserving per-input then intra-output order.
    ///
    /// An absent input yields a single absent output. Under containment a panic
    /// in `fn` also yields a single absent output.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// let out = Flow::of([1, 2, 3]).flat_map(|x| 0..x);
    /// assert_eq!(out.to_vec(), vec![0, 0, 1, 0, 1, 2]);
    /// ```
    pub fn flat_map<U: 'static, I, F>(self, f: F) -> Flow<U>
    where
        I: IntoIterator<Item = U>,
        F: FnMut(T) -> I + 'static,
    {
        let (eager, safe) = (self.is_eager(), self.safe);
        let mut f = f;
        let step = move |item: Item<T>| -> Vec<Item<U>> {
            match item {
                Absent => vec![Absent],
                Present(value) => {
                    if safe {
                        match panic::catch_unwind(AssertUnwindSafe(|| f(value))) {
                            Ok(out) => out.into_iter().map(Present).collect(),
                            Err(_) => vec![Absent],
                        }
                    } else {
                        f(value).into_iter().map(Present).collect()
                    }
                }
            }
        };
        rebuild(eager, safe, self.into_items().flat_map(step))
    }

    /// Groups consecutive elements into windows of `size`, the final window
    /// shorter when the length is not a multiple of `size`.
    ///
    /// Fails with [`SizeZero`] when `size` is zero.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::{Flow, Window};
    ///
    /// let windows = Flow::of(0..5).batch(2).unwrap().to_vec();
    /// assert_eq!(windows[0], Window::from(vec![0, 1]));
    /// assert_eq!(windows[2], Window::from(vec![4]));
    /// ```
    pub fn batch(self, size: usize) -> Result<Flow<Window<T>>, SizeZero> {
        if size == 0 {
            return Err(SizeZero);
        }
        let (eager, safe) = (self.is_eager(), self.safe);
        Ok(rebuild(eager, safe, Batches::new(self.into_items(), size)))
    }

    /// Produces the overlapping windows of width `window`, one per valid
    /// starting offset, stepping by one element.
    ///
    /// Fails with [`SizeZero`] when `window` is zero in either mode, and with
    /// [`WindowTooLarge`] when `window` exceeds the known length of an eager
    /// flow. A *lazy* flow shorter than `window` simply produces no windows,
    /// since its length cannot be known up front.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// let windows = Flow::of(0..5).rolling(3).unwrap().to_vec();
    /// assert_eq!(windows.len(), 3);
    /// assert_eq!(windows[1].clone().values(), vec![1, 2, 3]);
    /// ```
    pub fn rolling(self, window: usize) -> Result<Flow<Window<T>>, WindowError>
    where
        T: Clone,
    {
        if window == 0 {
            return Err(SizeZero.into());
        }
        if let Some(len) = self.len() {
            if window > len {
                return Err(WindowTooLarge { window, len }.into());
            }
        }
        let (eager, safe) = (self.is_eager(), self.safe);
        Ok(rebuild(eager, safe, Rolling::new(self.into_items(), window)))
    }

    /// Appends `value` to the end, materializing a lazy flow first.
    pub fn append(self, value: T) -> Flow<T> {
        let safe = self.safe;
        let mut items = match self.unstream().repr {
            Repr::Eager(items) => items,
            // unstream always produces the eager representation
            Repr::Lazy(_) => unreachable!(),
        };
        items.push(Present(value));
        Flow {
            repr: Repr::Eager(items),
            safe,
        }
    }

    /// Chains `other`'s elements after this flow's.
    ///
    /// The result is eager only when both operands already are, so that neither
    /// source is drained as a side effect; containment stays active if it was
    /// active on either side.
    pub fn concat(self, other: Flow<T>) -> Flow<T> {
        let eager = self.is_eager() && other.is_eager();
        let safe = self.safe || other.safe;
        rebuild(eager, safe, self.into_items().chain(other.into_items()))
    }

    /// Pairs elements positionally, ending at the shorter operand. A pair with
    /// an absent half is absent as a whole.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// let pairs = Flow::of([1, 2, 3]).zip(Flow::of(["a", "b", "c"]));
    /// assert_eq!(pairs.to_vec(), vec![(1, "a"), (2, "b"), (3, "c")]);
    /// ```
    pub fn zip<U: 'static>(self, other: Flow<U>) -> Flow<(T, U)> {
        let eager = self.is_eager() && other.is_eager();
        let safe = self.safe || other.safe;
        let zipped = self
            .into_items()
            .zip(other.into_items())
            .map(|pair| match pair {
                (Present(a), Present(b)) => Present((a, b)),
                _ => Absent,
            });
        rebuild(eager, safe, zipped)
    }

    /// Keeps the first `n` elements, in the flow's current mode.
    pub fn head(self, n: usize) -> Flow<T> {
        let (eager, safe) = (self.is_eager(), self.safe);
        rebuild(eager, safe, self.into_items().take(n))
    }

    /// Keeps the sub-range of elements selected by `range`, in the flow's
    /// current mode. A range reaching past the end is truncated rather than an
    /// error, mirroring how the terminal would simply run out of elements.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// assert_eq!(Flow::of(0..10).slice(2..5).to_vec(), vec![2, 3, 4]);
    /// assert_eq!(Flow::of(0..4).slice(2..).to_vec(), vec![2, 3]);
    /// ```
    pub fn slice(self, range: impl RangeBounds<usize>) -> Flow<T> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => Some(end + 1),
            Bound::Excluded(&end) => Some(end),
            Bound::Unbounded => None,
        };
        let (eager, safe) = (self.is_eager(), self.safe);
        let skipped = self.into_items().skip(start);
        match end {
            Some(end) => rebuild(eager, safe, skipped.take(end.saturating_sub(start))),
            None => rebuild(eager, safe, skipped),
        }
    }

    /// Ends production as soon as `token` is stopped, checked between element
    /// productions. This is the escape hatch for terminals over unbounded
    /// sources: stop the token from inside a [`subscribe`](Flow::subscribe)
    /// callback (or any code sharing a clone of it) and the drain ends
    /// cooperatively.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::{Flow, StopToken};
    ///
    /// let token = StopToken::new();
    /// let handle = token.clone();
    /// let mut seen = Vec::new();
    /// Flow::source(0..).stop_when(token).subscribe(|item| {
    ///     let value = item.value();
    ///     seen.push(value);
    ///     if value == 4 {
    ///         handle.stop();
    ///     }
    /// });
    /// assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn stop_when(self, token: StopToken) -> Flow<T> {
        let (eager, safe) = (self.is_eager(), self.safe);
        let mut iter = self.into_items();
        // The token is tested before pulling, so a stopped flow never touches
        // the source again.
        let guarded = std::iter::from_fn(move || {
            if token.is_stopped() {
                None
            } else {
                iter.next()
            }
        });
        rebuild(eager, safe, guarded)
    }

    /// Resolves `name` in `registry` and applies the function as a
    /// [`map`](Flow::map), mode- and containment-aware exactly like a closure.
    ///
    /// Fails with [`UnknownFunction`] when nothing is registered under `name`;
    /// lookup failure is structural and never contained.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    /// use flowseq::registry::Registry;
    ///
    /// let mut registry = Registry::new();
    /// registry.register("add1", |x: i32| x + 1).unwrap();
    /// registry.register("mul2", |x: i32| x * 2).unwrap();
    ///
    /// let out = Flow::of(0..5)
    ///     .call("add1", &registry)
    ///     .unwrap()
    ///     .call("mul2", &registry)
    ///     .unwrap();
    /// assert_eq!(out.to_vec(), vec![2, 4, 6, 8, 10]);
    /// ```
    pub fn call(self, name: &str, registry: &Registry<T>) -> Result<Flow<T>, UnknownFunction> {
        let op = registry.resolve(name)?;
        Ok(self.map(move |value| (*op)(value)))
    }

    /// Removes absent elements, preserving the relative order of the rest.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// let out = Flow::of([1, 2, 3, 4]).safe().map(|x| 10 / (x - 1)).drop_empty();
    /// assert_eq!(out.to_vec(), vec![10, 5, 3]);
    /// ```
    pub fn drop_empty(self) -> Flow<T> {
        let (eager, safe) = (self.is_eager(), self.safe);
        rebuild(eager, safe, self.into_items().filter(Item::is_present))
    }

    /// Replaces every absent element with `default`, preserving positions.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// let out = Flow::of([1, 2, 3, 4]).safe().map(|x| 10 / (x - 1)).fill_empty(0);
    /// assert_eq!(out.to_vec(), vec![0, 10, 5, 3]);
    /// ```
    pub fn fill_empty(self, default: T) -> Flow<T>
    where
        T: Clone,
    {
        let (eager, safe) = (self.is_eager(), self.safe);
        let filled = self.into_items().map(move |item| match item {
            Present(value) => Present(value),
            Absent => Present(default.clone()),
        });
        rebuild(eager, safe, filled)
    }

    /// Forces full evaluation and returns the values in order.
    ///
    /// Over an unbounded source this never returns; bound the flow first with
    /// [`head`](Flow::head) or [`stop_when`](Flow::stop_when).
    ///
    /// # Panics
    /// Panics on an unresolved absent element. A contained pipeline should
    /// settle its holes with [`drop_empty`](Flow::drop_empty) or
    /// [`fill_empty`](Flow::fill_empty) before collecting values; use
    /// [`items`](Flow::items) to observe the holes themselves.
    pub fn to_vec(self) -> Vec<T> {
        self.into_items()
            .enumerate()
            .map(|(index, item)| match item {
                Present(value) => value,
                Absent => panic!(
                    "Absent element at position {index}; settle it with drop_empty() or fill_empty() before collecting values!"
                ),
            })
            .collect()
    }

    /// Forces full evaluation and returns every element with its
    /// present-or-absent marker intact. Never panics.
    pub fn items(self) -> Vec<Item<T>> {
        self.into_items().collect()
    }

    /// Forces full evaluation and discards the result, for pipelines run only
    /// for their side effects.
    pub fn run(self) {
        self.subscribe(|_| ());
    }

    /// Forces evaluation, handing each element to `fn` in order. On a lazy flow
    /// each element travels the whole pending chain and is delivered before the
    /// next one is produced from the source.
    pub fn subscribe(self, mut f: impl FnMut(Item<T>)) {
        for item in self.into_items() {
            f(item);
        }
    }
}

impl<T: 'static> Flow<Window<T>> {
    /// Concatenates window contents back into a flat flow, one level only;
    /// the inverse of [`batch`](Flow::batch). An absent window re-emits a
    /// single absent element.
    ///
    /// # Examples
    /// ```
    /// use flowseq::flow::Flow;
    ///
    /// let out = Flow::of(0..7).batch(3).unwrap().flatten();
    /// assert_eq!(out.to_vec(), vec![0, 1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn flatten(self) -> Flow<T> {
        let (eager, safe) = (self.is_eager(), self.safe);
        let step = |item: Item<Window<T>>| -> Vec<Item<T>> {
            match item {
                Present(window) => window.into_items(),
                Absent => vec![Absent],
            }
        };
        rebuild(eager, safe, self.into_items().flat_map(step))
    }
}

impl<T> Default for Flow<T> {
    fn default() -> Flow<T> {
        Flow::new()
    }
}

impl<T> Index<usize> for Flow<T> {
    type Output = T;

    /// Convenience access to the value at `index`.
    ///
    /// # Panics
    /// Panics on a lazy flow, an out-of-bounds index, or an absent element; use
    /// [`get`](Flow::get) for a fallible lookup.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(Present(value)) => value,
            Ok(Absent) => panic!("Absent element at index {index}!"),
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T: Debug> Debug for Flow<T> {
    /// An eager flow renders as its materialized sequence; a lazy flow renders
    /// as the marker `<lazy flow>` rather than forcing evaluation as a side
    /// effect of display.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Eager(items) => f.debug_list().entries(items).finish(),
            Repr::Lazy(_) => f.write_str("<lazy flow>"),
        }
    }
}
