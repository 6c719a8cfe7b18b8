// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering providers: the configuration behind one enumeration.
//!
//! A provider knows where the elements come from, how to find their
//! dependencies, how to tell elements apart, and which queue picks the next
//! eligible element. [`Plain`] and [`Stable`] sit at the bottom of a chain;
//! [`ThenBy`](crate::ThenBy) layers wrap a [`ThenByProvider`] and add one
//! tie-breaking key each.

use alloc::boxed::Box;
use core::fmt;

use crate::dependencies::DependencyFn;
use crate::equality::ItemEquality;
use crate::heap::{IndexHeap, IndexLess, SourceOrder};
use crate::items::SourceItems;
use crate::queue::{FifoQueue, ReadyQueue};

/// Everything an enumeration needs to run.
///
/// The provider itself is immutable: each enumeration asks it for a fresh
/// source sequence and a fresh queue, so enumerations never share state.
pub trait SortProvider {
    /// Element type.
    type Item;
    /// Source sequence, re-created for every enumeration.
    type Source: IntoIterator<Item = Self::Item>;
    /// Dependency function.
    type Dependencies: DependencyFn<Self::Item>;
    /// Equality relation.
    type Equality: ItemEquality<Self::Item>;
    /// Queue of eligible elements for one enumeration.
    type Queue<'a>: ReadyQueue<Self::Item>
    where
        Self: 'a;

    /// Returns a fresh copy of the source sequence.
    fn source(&self) -> Self::Source;

    /// Returns the dependency function.
    fn dependencies(&self) -> &Self::Dependencies;

    /// Returns the equality relation.
    fn equality(&self) -> &Self::Equality;

    /// Creates the queue for an enumeration over `len` elements.
    fn create_queue(&self, len: usize) -> Self::Queue<'_>;
}

/// A provider that accepts tie-breaking layers.
pub trait ThenByProvider: SortProvider {
    /// Composes this provider's index comparison with `next`.
    ///
    /// The returned comparison applies this provider's criteria first and
    /// defers to `next` on ties. `len` is the number of source elements, for
    /// sizing per-enumeration caches.
    fn index_order<'a>(
        &'a self,
        len: usize,
        next: Option<IndexLess<'a, Self::Item>>,
    ) -> IndexLess<'a, Self::Item>;
}

/// Dependency order with first-eligible, first-emitted tie handling.
pub struct Plain<S, D, E> {
    source: S,
    dependencies: D,
    equality: E,
}

impl<S, D, E> Plain<S, D, E> {
    pub(crate) fn new(source: S, dependencies: D, equality: E) -> Self {
        Self {
            source,
            dependencies,
            equality,
        }
    }
}

impl<S, D, E> fmt::Debug for Plain<S, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plain").finish_non_exhaustive()
    }
}

impl<S, D, E> SortProvider for Plain<S, D, E>
where
    S: IntoIterator + Clone,
    D: DependencyFn<S::Item>,
    E: ItemEquality<S::Item>,
{
    type Item = S::Item;
    type Source = S;
    type Dependencies = D;
    type Equality = E;
    type Queue<'a>
        = FifoQueue
    where
        Self: 'a;

    fn source(&self) -> S {
        self.source.clone()
    }

    fn dependencies(&self) -> &D {
        &self.dependencies
    }

    fn equality(&self) -> &E {
        &self.equality
    }

    fn create_queue(&self, len: usize) -> FifoQueue {
        FifoQueue::with_capacity(len)
    }
}

impl<S, D, E> ThenByProvider for Plain<S, D, E>
where
    S: IntoIterator + Clone,
    D: DependencyFn<S::Item>,
    E: ItemEquality<S::Item>,
{
    fn index_order<'a>(
        &'a self,
        _len: usize,
        next: Option<IndexLess<'a, S::Item>>,
    ) -> IndexLess<'a, S::Item> {
        debug_assert!(next.is_some(), "a plain ordering only orders through then-by layers");
        match next {
            Some(next) => next,
            None => Box::new(|_: &SourceItems<S::Item>, _: usize, _: usize| false),
        }
    }
}

/// Dependency order that keeps elements as close to their source position as
/// the dependencies allow.
///
/// Among eligible elements, the one that came first in the source is emitted
/// first.
pub struct Stable<S, D, E> {
    inner: Plain<S, D, E>,
}

impl<S, D, E> Stable<S, D, E> {
    pub(crate) fn new(source: S, dependencies: D, equality: E) -> Self {
        Self {
            inner: Plain::new(source, dependencies, equality),
        }
    }
}

impl<S, D, E> fmt::Debug for Stable<S, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stable").finish_non_exhaustive()
    }
}

impl<S, D, E> SortProvider for Stable<S, D, E>
where
    S: IntoIterator + Clone,
    D: DependencyFn<S::Item>,
    E: ItemEquality<S::Item>,
{
    type Item = S::Item;
    type Source = S;
    type Dependencies = D;
    type Equality = E;
    type Queue<'a>
        = IndexHeap<SourceOrder>
    where
        Self: 'a;

    fn source(&self) -> S {
        self.inner.source()
    }

    fn dependencies(&self) -> &D {
        self.inner.dependencies()
    }

    fn equality(&self) -> &E {
        self.inner.equality()
    }

    fn create_queue(&self, len: usize) -> IndexHeap<SourceOrder> {
        IndexHeap::new(SourceOrder, len)
    }
}

impl<S, D, E> ThenByProvider for Stable<S, D, E>
where
    S: IntoIterator + Clone,
    D: DependencyFn<S::Item>,
    E: ItemEquality<S::Item>,
{
    fn index_order<'a>(
        &'a self,
        _len: usize,
        next: Option<IndexLess<'a, S::Item>>,
    ) -> IndexLess<'a, S::Item> {
        match next {
            Some(next) => next,
            None => Box::new(|_: &SourceItems<S::Item>, a: usize, b: usize| a < b),
        }
    }
}
