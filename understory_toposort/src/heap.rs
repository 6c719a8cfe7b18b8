// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binary min-heap over source indices.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::items::SourceItems;

/// Initial heap storage, unless the declared maximum is smaller.
const INITIAL_CAPACITY: usize = 10;

/// A strict "less than" over pairs of source indices.
///
/// Implemented for [`SourceOrder`] and for any
/// `FnMut(&SourceItems<T>, usize, usize) -> bool`. The comparison may keep
/// state (for example a key cache), hence `&mut self`.
pub trait IndexOrder<T> {
    /// Returns `true` if the element at index `a` should be emitted before the
    /// element at index `b`.
    ///
    /// Both indices are waiting in the queue, so both elements are present in
    /// `items`.
    fn less(&mut self, items: &SourceItems<T>, a: usize, b: usize) -> bool;
}

impl<T, F> IndexOrder<T> for F
where
    F: FnMut(&SourceItems<T>, usize, usize) -> bool,
{
    #[inline]
    fn less(&mut self, items: &SourceItems<T>, a: usize, b: usize) -> bool {
        self(items, a, b)
    }
}

/// A type-erased index comparison, as composed by the then-by chain.
pub type IndexLess<'a, T> = Box<dyn FnMut(&SourceItems<T>, usize, usize) -> bool + 'a>;

/// Orders indices by their position in the source.
///
/// Popping from an [`IndexHeap`] with this order always yields the lowest
/// source index that is ready, which makes the ordering stable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceOrder;

impl<T> IndexOrder<T> for SourceOrder {
    #[inline]
    fn less(&mut self, _items: &SourceItems<T>, a: usize, b: usize) -> bool {
        debug_assert_ne!(a, b, "an index is never queued twice");
        a < b
    }
}

/// Binary min-heap of source indices under an [`IndexOrder`].
///
/// Storage starts small and grows geometrically, but never beyond the
/// declared maximum capacity: an ordering enqueues each index at most once, so
/// the element count bounds the heap.
pub struct IndexHeap<C> {
    heap: Vec<usize>,
    max_capacity: usize,
    order: C,
}

impl<C> fmt::Debug for IndexHeap<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexHeap")
            .field("len", &self.heap.len())
            .field("max_capacity", &self.max_capacity)
            .finish_non_exhaustive()
    }
}

impl<C> IndexHeap<C> {
    /// Creates an empty heap ordered by `order`, holding at most
    /// `max_capacity` indices.
    #[must_use]
    pub fn new(order: C, max_capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(INITIAL_CAPACITY.min(max_capacity)),
            max_capacity,
            order,
        }
    }

    /// Returns the number of queued indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no index is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Adds `index` to the heap.
    pub fn push<T>(&mut self, items: &SourceItems<T>, index: usize)
    where
        C: IndexOrder<T>,
    {
        if self.heap.len() == self.heap.capacity() {
            self.expand();
        }
        self.heap.push(index);
        self.swim(items, self.heap.len() - 1, index);
    }

    /// Removes and returns the least index, or `None` if the heap is empty.
    pub fn pop<T>(&mut self, items: &SourceItems<T>) -> Option<usize>
    where
        C: IndexOrder<T>,
    {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            return Some(last);
        }
        let least = self.heap[0];
        self.sink(items, 0, last);
        Some(least)
    }

    fn expand(&mut self) {
        let capacity = self.heap.capacity();
        let remaining = self.max_capacity.saturating_sub(capacity);
        debug_assert!(remaining > 0, "index heap over capacity");
        let target = if remaining <= capacity {
            self.max_capacity
        } else {
            2 * capacity
        };
        self.heap
            .reserve_exact(target.max(capacity + 1) - self.heap.len());
    }

    /// Moves `item` up from `index` until its parent is not greater.
    fn swim<T>(&mut self, items: &SourceItems<T>, mut index: usize, item: usize)
    where
        C: IndexOrder<T>,
    {
        while index > 0 {
            let parent = (index - 1) >> 1;
            let parent_item = self.heap[parent];
            if !self.order.less(items, item, parent_item) {
                break;
            }
            self.heap[index] = parent_item;
            index = parent;
        }
        self.heap[index] = item;
    }

    /// Moves `item` down from `index` until neither child is less.
    fn sink<T>(&mut self, items: &SourceItems<T>, mut index: usize, item: usize)
    where
        C: IndexOrder<T>,
    {
        let len = self.heap.len();
        let half = len >> 1;
        while index < half {
            let mut child = (index << 1) + 1;
            let right = child + 1;
            if right < len && self.order.less(items, self.heap[right], self.heap[child]) {
                child = right;
            }
            let child_item = self.heap[child];
            if !self.order.less(items, child_item, item) {
                break;
            }
            self.heap[index] = child_item;
            index = child;
        }
        self.heap[index] = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn items(n: usize) -> SourceItems<usize> {
        SourceItems::new((0..n).collect())
    }

    fn drain<C>(heap: &mut IndexHeap<C>, items: &SourceItems<usize>) -> Vec<usize>
    where
        C: IndexOrder<usize>,
    {
        let mut out = Vec::new();
        while let Some(index) = heap.pop(items) {
            out.push(index);
        }
        out
    }

    #[test]
    fn source_order_pops_lowest_index() {
        let items = items(8);
        let mut heap = IndexHeap::new(SourceOrder, 8);
        for index in [5, 1, 7, 3, 0, 6, 2, 4] {
            heap.push(&items, index);
        }
        assert_eq!(heap.len(), 8);
        assert_eq!(drain(&mut heap, &items), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert!(heap.is_empty());
        assert_eq!(heap.pop(&items), None);
    }

    #[test]
    fn custom_order_reads_items() {
        let items = SourceItems::new(vec![30_u32, 10, 20, 10]);
        // Smallest value first, ties by index.
        let order = |items: &SourceItems<u32>, a: usize, b: usize| {
            (items.get(a), a) < (items.get(b), b)
        };
        let mut heap = IndexHeap::new(order, 4);
        for index in 0..4 {
            heap.push(&items, index);
        }

        let mut out = Vec::new();
        while let Some(index) = heap.pop(&items) {
            out.push(index);
        }
        assert_eq!(out, vec![1, 3, 2, 0]);
    }

    #[test]
    fn interleaved_push_and_pop() {
        let items = items(6);
        let mut heap = IndexHeap::new(SourceOrder, 6);
        heap.push(&items, 4);
        heap.push(&items, 2);
        assert_eq!(heap.pop(&items), Some(2));
        heap.push(&items, 5);
        heap.push(&items, 0);
        assert_eq!(heap.pop(&items), Some(0));
        heap.push(&items, 1);
        heap.push(&items, 3);
        assert_eq!(drain(&mut heap, &items), vec![1, 3, 4, 5]);
    }

    #[test]
    fn growth_stops_at_max_capacity() {
        let n = 37;
        let items = items(n);
        let mut heap = IndexHeap::new(SourceOrder, n);
        for index in (0..n).rev() {
            heap.push(&items, index);
        }
        assert_eq!(heap.len(), n);
        assert_eq!(drain(&mut heap, &items), (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn small_maximum_limits_initial_storage() {
        let items = items(3);
        let mut heap = IndexHeap::new(SourceOrder, 3);
        assert!(heap.heap.capacity() >= 3, "room for every index up front");
        heap.push(&items, 2);
        heap.push(&items, 0);
        heap.push(&items, 1);
        assert_eq!(drain(&mut heap, &items), vec![0, 1, 2]);
    }
}
