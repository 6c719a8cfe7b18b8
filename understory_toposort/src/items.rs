// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Materialized source elements.

use alloc::vec::Vec;

/// The source sequence of one enumeration, addressed by source index.
///
/// Elements are moved out as they are emitted, so [`get`](Self::get) returns
/// `None` for indices that have already been yielded. Indices that are still
/// waiting in a [`ReadyQueue`](crate::ReadyQueue) are always present, which
/// is what comparison-based queues rely on.
#[derive(Debug)]
pub struct SourceItems<T> {
    slots: Vec<Option<T>>,
}

impl<T> SourceItems<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            slots: items.into_iter().map(Some).collect(),
        }
    }

    /// Number of source elements, including ones already emitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the source was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the element at `index` unless it has already been emitted.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)?.as_ref()
    }

    pub(crate) fn take(&mut self, index: usize) -> Option<T> {
        self.slots.get_mut(index)?.take()
    }
}
