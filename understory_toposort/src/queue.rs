// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queues of elements that are ready to be emitted.

use alloc::collections::VecDeque;

use crate::heap::{IndexHeap, IndexOrder};
use crate::items::SourceItems;

/// Selection strategy for the next eligible element.
///
/// Indices enter the queue once their in-degree reaches zero; the engine pops
/// one index per emitted element. The strategy decides which of the ready
/// indices goes next:
///
/// - [`FifoQueue`]: the index that became ready earliest.
/// - [`IndexHeap`]: the least index under an [`IndexOrder`].
pub trait ReadyQueue<T> {
    /// Returns the number of ready indices.
    fn len(&self) -> usize;

    /// Returns `true` if no index is ready.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks `index` as ready.
    fn push(&mut self, items: &SourceItems<T>, index: usize);

    /// Removes and returns the next index to emit.
    fn pop(&mut self, items: &SourceItems<T>) -> Option<usize>;
}

/// First-ready, first-served queue.
///
/// Indices that become ready in the same notification batch come out in the
/// order they were discovered. This yields *a* valid topological order; it
/// does not try to keep elements near their source position.
#[derive(Clone, Debug, Default)]
pub struct FifoQueue {
    queue: VecDeque<usize>,
}

impl FifoQueue {
    /// Creates an empty queue with room for `capacity` indices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
        }
    }
}

impl<T> ReadyQueue<T> for FifoQueue {
    fn len(&self) -> usize {
        self.queue.len()
    }

    fn push(&mut self, _items: &SourceItems<T>, index: usize) {
        self.queue.push_back(index);
    }

    fn pop(&mut self, _items: &SourceItems<T>) -> Option<usize> {
        self.queue.pop_front()
    }
}

impl<T, C> ReadyQueue<T> for IndexHeap<C>
where
    C: IndexOrder<T>,
{
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn push(&mut self, items: &SourceItems<T>, index: usize) {
        Self::push(self, items, index);
    }

    fn pop(&mut self, items: &SourceItems<T>) -> Option<usize> {
        Self::pop(self, items)
    }
}
