// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering objects returned by the entry points.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::dependencies::DependencyFn;
use crate::equality::ItemEquality;
use crate::error::SortError;
use crate::iter::Iter;
use crate::provider::{Plain, SortProvider, Stable, ThenByProvider};
use crate::then_by::{NaturalOrder, ThenBy};

/// A lazily evaluated topological ordering that accepts tie-breakers.
///
/// Created by [`order_topologically`](crate::order_topologically) and
/// [`order_topologically_with`](crate::order_topologically_with). Nothing is
/// computed until the ordering is enumerated; every call to
/// [`iter`](Self::iter) starts a fresh, independent enumeration over a fresh
/// copy of the source.
///
/// Without tie-breakers, elements that become eligible earlier are emitted
/// earlier; beyond that the order among independent elements is unspecified.
/// Each [`then_by`](Self::then_by) layer orders the eligible elements by one
/// more key, with earlier layers taking precedence.
///
/// # Example
///
/// ```
/// use understory_toposort::order_topologically;
///
/// let words = ["house", "brick", "people", "wood", "holes", "mice"];
/// let sorted = order_topologically(words, |w: &&str| match *w {
///     "house" => vec!["brick", "wood"],
///     "people" => vec!["house"],
///     "holes" => vec!["wood", "mice"],
///     "mice" => vec!["house"],
///     _ => vec![],
/// })
/// .then_by(|w| *w)
/// .to_vec()
/// .unwrap();
/// assert_eq!(sorted, ["brick", "wood", "house", "mice", "holes", "people"]);
/// ```
pub struct TopologicalOrder<P> {
    provider: P,
}

impl<P: fmt::Debug> fmt::Debug for TopologicalOrder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologicalOrder")
            .field("provider", &self.provider)
            .finish()
    }
}

impl<S, D, E> TopologicalOrder<Plain<S, D, E>>
where
    S: IntoIterator + Clone,
    D: DependencyFn<S::Item>,
    E: ItemEquality<S::Item>,
{
    /// Creates an ordering of `source` with an explicit dependency function
    /// and equality relation.
    ///
    /// Accepts any [`DependencyFn`], including [`Fallible`](crate::Fallible)
    /// ones.
    pub fn new(source: S, dependencies: D, equality: E) -> Self {
        Self {
            provider: Plain::new(source, dependencies, equality),
        }
    }
}

impl<P: ThenByProvider> TopologicalOrder<P> {
    /// Breaks ties by ascending `key`.
    pub fn then_by<K, F>(self, key: F) -> TopologicalOrder<ThenBy<P, F, NaturalOrder<K>, K>>
    where
        K: Ord,
        F: Fn(&P::Item) -> K,
    {
        self.then_by_with(key, K::cmp as NaturalOrder<K>, false)
    }

    /// Breaks ties by descending `key`.
    pub fn then_by_desc<K, F>(self, key: F) -> TopologicalOrder<ThenBy<P, F, NaturalOrder<K>, K>>
    where
        K: Ord,
        F: Fn(&P::Item) -> K,
    {
        self.then_by_with(key, K::cmp as NaturalOrder<K>, true)
    }

    /// Breaks ties by `key` under `compare`, reversed if `descending`.
    ///
    /// # Example
    ///
    /// ```
    /// use understory_toposort::order_topologically;
    ///
    /// let sorted = order_topologically(["bb", "a", "ccc"], |_: &&str| Vec::new())
    ///     .then_by_with(|s| s.len(), |a: &usize, b: &usize| a.cmp(b), true)
    ///     .to_vec()
    ///     .unwrap();
    /// assert_eq!(sorted, ["ccc", "bb", "a"]);
    /// ```
    pub fn then_by_with<K, F, C>(
        self,
        key: F,
        compare: C,
        descending: bool,
    ) -> TopologicalOrder<ThenBy<P, F, C, K>>
    where
        F: Fn(&P::Item) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        TopologicalOrder {
            provider: ThenBy::new(self.provider, key, compare, descending),
        }
    }
}

impl<P: SortProvider> TopologicalOrder<P> {
    /// Starts a new enumeration.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter::new(&self.provider)
    }

    /// Runs a full enumeration and collects the result.
    ///
    /// # Errors
    ///
    /// Returns the first [`SortError`] the enumeration reports.
    pub fn to_vec(&self) -> Result<Vec<P::Item>, SortError> {
        self.iter().collect()
    }
}

impl<'a, P: SortProvider> IntoIterator for &'a TopologicalOrder<P> {
    type Item = Result<P::Item, SortError>;
    type IntoIter = Iter<'a, P>;

    fn into_iter(self) -> Iter<'a, P> {
        self.iter()
    }
}

/// A lazily evaluated topological ordering that stays close to source order.
///
/// Created by [`stable_order_topologically`](crate::stable_order_topologically)
/// and [`stable_order_topologically_with`](crate::stable_order_topologically_with).
/// Among the elements whose dependencies have all been emitted, the one that
/// came first in the source is emitted next. A source that already respects
/// its dependencies comes out unchanged.
///
/// Stable orderings are already fully determined, so they do not accept
/// tie-breakers.
pub struct StableTopologicalOrder<S, D, E> {
    provider: Stable<S, D, E>,
}

impl<S, D, E> fmt::Debug for StableTopologicalOrder<S, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StableTopologicalOrder")
            .field("provider", &self.provider)
            .finish()
    }
}

impl<S, D, E> StableTopologicalOrder<S, D, E>
where
    S: IntoIterator + Clone,
    D: DependencyFn<S::Item>,
    E: ItemEquality<S::Item>,
{
    /// Creates a stable ordering of `source` with an explicit dependency
    /// function and equality relation.
    pub fn new(source: S, dependencies: D, equality: E) -> Self {
        Self {
            provider: Stable::new(source, dependencies, equality),
        }
    }

    /// Starts a new enumeration.
    pub fn iter(&self) -> Iter<'_, Stable<S, D, E>> {
        Iter::new(&self.provider)
    }

    /// Runs a full enumeration and collects the result.
    ///
    /// # Errors
    ///
    /// Returns the first [`SortError`] the enumeration reports.
    pub fn to_vec(&self) -> Result<Vec<S::Item>, SortError> {
        self.iter().collect()
    }
}

impl<'a, S, D, E> IntoIterator for &'a StableTopologicalOrder<S, D, E>
where
    S: IntoIterator + Clone,
    D: DependencyFn<S::Item>,
    E: ItemEquality<S::Item>,
{
    type Item = Result<S::Item, SortError>;
    type IntoIter = Iter<'a, Stable<S, D, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::DefaultEquality;
    use alloc::vec;

    fn after_predecessor(i: &u32) -> Vec<u32> {
        if *i > 0 { vec![i - 1] } else { vec![] }
    }

    fn no_deps(_: &u32) -> Vec<u32> {
        Vec::new()
    }

    #[test]
    fn orderings_can_be_enumerated_repeatedly() {
        let order = TopologicalOrder::new(vec![2_u32, 0, 1], after_predecessor, DefaultEquality);
        assert_eq!(order.to_vec(), Ok(vec![0, 1, 2]));
        assert_eq!(order.to_vec(), Ok(vec![0, 1, 2]));

        let collected: Result<Vec<_>, _> = (&order).into_iter().collect();
        assert_eq!(collected, Ok(vec![0, 1, 2]));
    }

    #[test]
    fn stable_orderings_iterate_by_reference() {
        let order =
            StableTopologicalOrder::new(vec![2_u32, 3, 0, 1], after_predecessor, DefaultEquality);
        let mut out = Vec::new();
        for item in &order {
            out.push(item.unwrap());
        }
        assert_eq!(out, vec![0, 1, 2, 3]);
    }

    #[test]
    fn descending_layer_reverses_ties() {
        let order = TopologicalOrder::new(vec![1_u32, 3, 2], no_deps, DefaultEquality)
            .then_by_desc(|v| *v);
        assert_eq!(order.to_vec(), Ok(vec![3, 2, 1]));
    }
}
