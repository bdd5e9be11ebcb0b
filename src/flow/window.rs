use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;

use crate::item::Item::{self, Present};

/// One group of consecutive elements, produced by [`batch`](super::Flow::batch)
/// or [`rolling`](super::Flow::rolling).
///
/// A window keeps each element's present-or-absent marker, so grouping a
/// contained flow loses nothing: [`flatten`](super::Flow::flatten) reconstructs
/// the exact original sequence, holes included. Windows deref to
/// `[Item<T>]`, which provides iteration, indexing and the rest of the slice
/// API for free.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Window<T>(pub(crate) Vec<Item<T>>);

impl<T> Window<T> {
    /// Returns the number of elements in the window.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the window contains no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwraps the window into its raw values.
    ///
    /// # Panics
    /// Panics if any element is absent; use [`present`](Window::present) when
    /// holes are an expected outcome.
    pub fn values(self) -> Vec<T> {
        self.0.into_iter().map(Item::value).collect()
    }

    /// Unwraps the window into the raw values of its present elements,
    /// dropping holes.
    pub fn present(self) -> Vec<T> {
        self.0.into_iter().filter_map(Item::present).collect()
    }

    pub(crate) fn into_items(self) -> Vec<Item<T>> {
        self.0
    }
}

impl<T> Deref for Window<T> {
    type Target = [Item<T>];

    fn deref(&self) -> &[Item<T>] {
        &self.0
    }
}

impl<T> From<Vec<T>> for Window<T> {
    fn from(values: Vec<T>) -> Window<T> {
        Window(values.into_iter().map(Present).collect())
    }
}

impl<T> IntoIterator for Window<T> {
    type Item = Item<T>;

    type IntoIter = std::vec::IntoIter<Item<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: Debug> Debug for Window<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

/// Iterator adapter behind [`batch`](super::Flow::batch): consecutive groups of
/// up to `size` elements, the last one shorter when the input runs out.
pub(crate) struct Batches<I> {
    iter: I,
    size: usize,
}

impl<I> Batches<I> {
    pub(crate) const fn new(iter: I, size: usize) -> Batches<I> {
        Batches { iter, size }
    }
}

impl<T, I: Iterator<Item = Item<T>>> Iterator for Batches<I> {
    type Item = Item<Window<T>>;

    fn next(&mut self) -> Option<Item<Window<T>>> {
        let mut group = Vec::with_capacity(self.size);
        while group.len() < self.size {
            match self.iter.next() {
                Some(item) => group.push(item),
                None => break,
            }
        }
        if group.is_empty() {
            None
        } else {
            Some(Present(Window(group)))
        }
    }
}

/// Iterator adapter behind [`rolling`](super::Flow::rolling): overlapping
/// windows of exactly `window` elements, stepping by one. Ends as soon as the
/// input cannot fill another full window.
pub(crate) struct Rolling<I, T> {
    iter: I,
    window: usize,
    buf: VecDeque<Item<T>>,
    done: bool,
}

impl<I, T> Rolling<I, T> {
    pub(crate) const fn new(iter: I, window: usize) -> Rolling<I, T> {
        Rolling {
            iter,
            window,
            buf: VecDeque::new(),
            done: false,
        }
    }
}

impl<T: Clone, I: Iterator<Item = Item<T>>> Iterator for Rolling<I, T> {
    type Item = Item<Window<T>>;

    fn next(&mut self) -> Option<Item<Window<T>>> {
        if self.done {
            return None;
        }
        while self.buf.len() < self.window {
            match self.iter.next() {
                Some(item) => self.buf.push_back(item),
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
        let window = Window(self.buf.iter().cloned().collect());
        self.buf.pop_front();
        Some(Present(window))
    }
}
