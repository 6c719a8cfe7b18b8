// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency lookup functions.

use core::fmt;

/// Maps an element to the elements that must be emitted before it.
///
/// Any `Fn(&T) -> I` where `I: IntoIterator<Item = T>` is a dependency
/// function. Wrap a function returning `Option<I>` in [`Fallible`] when a
/// missing dependency list should fail the sort instead of meaning "no
/// dependencies".
///
/// The ordering calls [`dependencies`](Self::dependencies) once per distinct
/// element (under its equality relation), never once per duplicate.
pub trait DependencyFn<T> {
    /// The dependency sequence for one element.
    type Dependencies: IntoIterator<Item = T>;

    /// Returns the dependencies of `item`, or `None` if there is no sequence
    /// at all.
    fn dependencies(&self, item: &T) -> Option<Self::Dependencies>;
}

impl<T, F, I> DependencyFn<T> for F
where
    F: Fn(&T) -> I,
    I: IntoIterator<Item = T>,
{
    type Dependencies = I;

    #[inline]
    fn dependencies(&self, item: &T) -> Option<I> {
        Some(self(item))
    }
}

/// A dependency function that may report no dependency sequence.
///
/// Returning `None` from the wrapped function is a contract violation that
/// surfaces as [`SortError::NullDependencies`](crate::SortError::NullDependencies)
/// on the first pull of the ordering, not when the ordering is constructed.
///
/// # Example
///
/// ```
/// use understory_toposort::{DefaultEquality, Fallible, SortError, TopologicalOrder};
///
/// let order = TopologicalOrder::new(
///     [1, 2],
///     Fallible::new(|i: &i32| (*i == 1).then(Vec::<i32>::new)),
///     DefaultEquality,
/// );
/// let mut iter = order.iter();
/// assert_eq!(iter.next(), Some(Err(SortError::NullDependencies { index: 1 })));
/// assert_eq!(iter.next(), None);
/// ```
#[derive(Copy, Clone)]
pub struct Fallible<F> {
    lookup: F,
}

impl<F> Fallible<F> {
    /// Wraps `lookup`, treating `None` as a missing dependency sequence.
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

impl<F> fmt::Debug for Fallible<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fallible").finish_non_exhaustive()
    }
}

impl<T, F, I> DependencyFn<T> for Fallible<F>
where
    F: Fn(&T) -> Option<I>,
    I: IntoIterator<Item = T>,
{
    type Dependencies = I;

    #[inline]
    fn dependencies(&self, item: &T) -> Option<I> {
        (self.lookup)(item)
    }
}
