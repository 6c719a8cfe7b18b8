// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tie-breaking layers keyed on a projection of each element.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use crate::heap::{IndexHeap, IndexLess};
use crate::items::SourceItems;
use crate::provider::{SortProvider, ThenByProvider};

/// Natural ordering of a key type, used by `then_by` and `then_by_desc`.
pub type NaturalOrder<K> = fn(&K, &K) -> Ordering;

/// A provider with one more tie-breaking key.
///
/// Among eligible elements, those with the least key (or greatest, when
/// descending) are emitted first. Elements with equal keys are ordered by the
/// next layer added after this one, if any. Criteria added earlier take
/// precedence over criteria added later.
///
/// The key selector runs at most once per element and enumeration.
pub struct ThenBy<P, F, C, K> {
    inner: P,
    key: F,
    compare: C,
    descending: bool,
    _key: PhantomData<fn() -> K>,
}

impl<P, F, C, K> ThenBy<P, F, C, K> {
    pub(crate) fn new(inner: P, key: F, compare: C, descending: bool) -> Self {
        Self {
            inner,
            key,
            compare,
            descending,
            _key: PhantomData,
        }
    }
}

impl<P: fmt::Debug, F, C, K> fmt::Debug for ThenBy<P, F, C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThenBy")
            .field("inner", &self.inner)
            .field("descending", &self.descending)
            .finish_non_exhaustive()
    }
}

impl<P, F, C, K> SortProvider for ThenBy<P, F, C, K>
where
    P: ThenByProvider,
    F: Fn(&P::Item) -> K,
    C: Fn(&K, &K) -> Ordering,
{
    type Item = P::Item;
    type Source = P::Source;
    type Dependencies = P::Dependencies;
    type Equality = P::Equality;
    type Queue<'a>
        = IndexHeap<IndexLess<'a, P::Item>>
    where
        Self: 'a;

    fn source(&self) -> P::Source {
        self.inner.source()
    }

    fn dependencies(&self) -> &P::Dependencies {
        self.inner.dependencies()
    }

    fn equality(&self) -> &P::Equality {
        self.inner.equality()
    }

    fn create_queue(&self, len: usize) -> Self::Queue<'_> {
        IndexHeap::new(self.index_order(len, None), len)
    }
}

impl<P, F, C, K> ThenByProvider for ThenBy<P, F, C, K>
where
    P: ThenByProvider,
    F: Fn(&P::Item) -> K,
    C: Fn(&K, &K) -> Ordering,
{
    fn index_order<'a>(
        &'a self,
        len: usize,
        mut next: Option<IndexLess<'a, P::Item>>,
    ) -> IndexLess<'a, P::Item> {
        let mut keys = KeyCache::with_len(len);
        let by_key: IndexLess<'a, P::Item> =
            Box::new(move |items: &SourceItems<P::Item>, a: usize, b: usize| {
                let ordering = keys.compare(items, a, b, &self.key, &self.compare);
                let ordering = if self.descending {
                    ordering.reverse()
                } else {
                    ordering
                };
                match ordering {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => next.as_mut().is_some_and(|next| next(items, a, b)),
                }
            });
        self.inner.index_order(len, Some(by_key))
    }
}

/// Keys computed so far, by source index.
struct KeyCache<K> {
    keys: Vec<Option<K>>,
}

impl<K> KeyCache<K> {
    fn with_len(len: usize) -> Self {
        let mut keys = Vec::new();
        keys.resize_with(len, || None);
        Self { keys }
    }

    fn compare<T>(
        &mut self,
        items: &SourceItems<T>,
        a: usize,
        b: usize,
        key: impl Fn(&T) -> K,
        compare: impl Fn(&K, &K) -> Ordering,
    ) -> Ordering {
        self.fill(items, a, &key);
        self.fill(items, b, &key);
        compare(self.cached(a), self.cached(b))
    }

    fn fill<T>(&mut self, items: &SourceItems<T>, index: usize, key: impl Fn(&T) -> K) {
        let slot = &mut self.keys[index];
        if slot.is_none() {
            let item = items
                .get(index)
                .expect("queued elements have not been emitted");
            *slot = Some(key(item));
        }
    }

    fn cached(&self, index: usize) -> &K {
        self.keys[index]
            .as_ref()
            .expect("key is cached before comparison")
    }
}
