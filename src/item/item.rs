use std::fmt::{self, Debug, Formatter};
use std::panic::{self, AssertUnwindSafe};

use derive_more::IsVariant;

/// The outcome of one unit of work: a computed value, or the position of a value
/// whose computation failed while containment was active.
///
/// `Absent` never carries a value and `Present` always does. An `Absent` element
/// flows through further transformations untouched (user functions are never
/// invoked on it) until [`drop_empty`](crate::flow::Flow::drop_empty) removes it
/// or [`fill_empty`](crate::flow::Flow::fill_empty) substitutes a default.
///
/// In debug output a `Present` value renders as the value itself and an `Absent`
/// renders as `_`, so a flow with holes prints like `[1, _, 3]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Item<T> {
    /// A successfully computed value.
    Present(T),
    /// A placeholder for a value whose computation failed.
    Absent,
}

use Item::{Absent, Present};

impl<T> Item<T> {
    /// Applies `fn` to a present value, passing an absent one through untouched.
    ///
    /// # Examples
    /// ```
    /// use flowseq::item::Item;
    ///
    /// assert_eq!(Item::Present(2).map(|x| x + 1), Item::Present(3));
    /// assert_eq!(Item::<u8>::Absent.map(|x| x + 1), Item::Absent);
    /// ```
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Item<U> {
        match self {
            Present(value) => Present(f(value)),
            Absent => Absent,
        }
    }

    /// Applies `fn` to a present value, converting a panic raised by `fn` into
    /// [`Absent`]. An absent value passes through without invoking `fn` at all.
    ///
    /// The panic is caught with [`catch_unwind`](panic::catch_unwind), so the
    /// global panic hook still runs and may print to stderr.
    ///
    /// # Examples
    /// ```
    /// use flowseq::item::Item;
    ///
    /// assert_eq!(Item::Present(5).map_catching(|x| 10 / x), Item::Present(2));
    /// assert_eq!(Item::Present(0).map_catching(|x| 10 / x), Item::Absent);
    /// ```
    pub fn map_catching<U>(self, f: impl FnOnce(T) -> U) -> Item<U> {
        match self {
            Present(value) => match panic::catch_unwind(AssertUnwindSafe(|| f(value))) {
                Ok(out) => Present(out),
                Err(_) => Absent,
            },
            Absent => Absent,
        }
    }

    /// Converts into an [`Option`], mapping [`Present`] to `Some`.
    pub fn present(self) -> Option<T> {
        match self {
            Present(value) => Some(value),
            Absent => None,
        }
    }

    /// Converts from `&Item<T>` to `Item<&T>`.
    pub const fn as_ref(&self) -> Item<&T> {
        match self {
            Present(value) => Present(value),
            Absent => Absent,
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    /// Panics if the item is [`Absent`]. Use [`present`](Item::present) or
    /// [`unwrap_or`](Item::unwrap_or) when absence is an expected outcome.
    pub fn value(self) -> T {
        match self {
            Present(value) => value,
            Absent => panic!("Called value() on an absent item!"),
        }
    }

    /// Returns the contained value, or `default` if the item is [`Absent`].
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Present(value) => value,
            Absent => default,
        }
    }
}

impl<T> From<Option<T>> for Item<T> {
    fn from(option: Option<T>) -> Item<T> {
        match option {
            Some(value) => Present(value),
            None => Absent,
        }
    }
}

impl<T> From<Item<T>> for Option<T> {
    fn from(item: Item<T>) -> Option<T> {
        item.present()
    }
}

impl<T: Debug> Debug for Item<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Present(value) => value.fmt(f),
            Absent => f.write_str("_"),
        }
    }
}
