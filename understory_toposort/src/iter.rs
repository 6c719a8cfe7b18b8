// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy emission of a topological ordering.

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::error::SortError;
use crate::graph::DependencyGraph;
use crate::items::SourceItems;
use crate::provider::SortProvider;
use crate::queue::ReadyQueue;

/// Iterator over one enumeration of an ordering.
///
/// Yields elements using Kahn's algorithm:
///
/// 1. On the first call to [`next`](Iterator::next), materialize the source,
///    group duplicates, call the dependency function once per distinct
///    element and count the in-degree of each.
/// 2. Queue every element without dependencies.
/// 3. Repeatedly pop the element chosen by the provider's queue, yield it,
///    and release its dependents. Dependents are released on the following
///    call, so an enumeration that is abandoned early skips that work.
///
/// Nothing happens until the first pull: creating the iterator never calls
/// the dependency function.
///
/// # Errors
///
/// Failures are yielded as `Some(Err(_))`, after which the iterator is
/// exhausted:
///
/// - [`SortError::NullDependencies`] and [`SortError::DependencyNotInSource`]
///   on the first pull, before any element is yielded.
/// - [`SortError::CycleDetected`] on the pull that finds no eligible element
///   while elements remain. Elements yielded before that point are valid.
///
/// # Example
///
/// ```
/// use understory_toposort::{order_topologically, SortError};
///
/// // Every element depends on its successor, wrapping around.
/// let order = order_topologically(0..4, |i: &u32| [(i + 1) % 4]);
/// let mut iter = order.iter();
/// assert_eq!(iter.remaining(), None);
/// assert_eq!(iter.next(), Some(Err(SortError::CycleDetected { remaining: 4 })));
/// assert_eq!(iter.next(), None);
/// ```
pub struct Iter<'a, P>
where
    P: SortProvider + 'a,
{
    provider: &'a P,
    state: State<P::Item, P::Queue<'a>>,
}

enum State<T, Q> {
    /// Not pulled yet.
    Pending,
    Running(Running<T, Q>),
    Finished,
}

struct Running<T, Q> {
    items: SourceItems<T>,
    graph: DependencyGraph,
    queue: Q,
    emitted: usize,
    /// Element yielded by the previous pull, whose dependents are not yet
    /// released.
    release: Option<usize>,
}

impl<'a, P> Iter<'a, P>
where
    P: SortProvider + 'a,
{
    pub(crate) fn new(provider: &'a P) -> Self {
        Self {
            provider,
            state: State::Pending,
        }
    }

    /// Returns the number of elements not yet yielded.
    ///
    /// Returns `None` before the first pull, since the source has not been
    /// materialized yet. Returns `Some(0)` once the iterator is exhausted,
    /// including after an error.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        match &self.state {
            State::Pending => None,
            State::Running(running) => Some(running.remaining()),
            State::Finished => Some(0),
        }
    }
}

impl<T, Q> Running<T, Q>
where
    Q: ReadyQueue<T>,
{
    fn start<P>(provider: &P, queue: impl FnOnce(usize) -> Q) -> Result<Self, SortError>
    where
        P: SortProvider<Item = T>,
    {
        let items: Vec<T> = provider.source().into_iter().collect();
        let mut graph =
            DependencyGraph::build(&items, provider.dependencies(), provider.equality())?;
        debug_assert_eq!(graph.len(), items.len(), "graph covers every element");

        let items = SourceItems::new(items);
        let mut queue = queue(items.len());
        graph.seed(|index| queue.push(&items, index));

        Ok(Self {
            items,
            graph,
            queue,
            emitted: 0,
            release: None,
        })
    }

    fn remaining(&self) -> usize {
        self.items.len() - self.emitted
    }

    fn advance(&mut self) -> Option<Result<T, SortError>> {
        if let Some(index) = self.release.take() {
            let Self {
                items,
                graph,
                queue,
                ..
            } = self;
            graph.release(index, |ready| queue.push(items, ready));
        }

        if self.emitted == self.items.len() {
            debug!(emitted = self.emitted, "topological sort complete");
            return None;
        }

        let Some(index) = self.queue.pop(&self.items) else {
            let remaining = self.remaining();
            debug!(remaining, "dependency cycle detected");
            return Some(Err(SortError::CycleDetected { remaining }));
        };
        let item = self
            .items
            .take(index)
            .expect("a queued element is emitted exactly once");
        self.emitted += 1;
        self.release = Some(index);
        Some(Ok(item))
    }
}

impl<'a, P> Iterator for Iter<'a, P>
where
    P: SortProvider + 'a,
{
    type Item = Result<P::Item, SortError>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, State::Pending) {
            let provider = self.provider;
            match Running::start(provider, |len| provider.create_queue(len)) {
                Ok(running) => self.state = State::Running(running),
                Err(err) => {
                    self.state = State::Finished;
                    return Some(Err(err));
                }
            }
        }

        let State::Running(running) = &mut self.state else {
            return None;
        };
        let next = running.advance();
        if !matches!(next, Some(Ok(_))) {
            self.state = State::Finished;
        }
        next
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            State::Pending => (0, None),
            State::Running(running) => (0, Some(running.remaining())),
            State::Finished => (0, Some(0)),
        }
    }
}

impl<'a, P> FusedIterator for Iter<'a, P> where P: SortProvider + 'a {}

impl<'a, P> fmt::Debug for Iter<'a, P>
where
    P: SortProvider + 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Pending => "pending",
            State::Running(_) => "running",
            State::Finished => "finished",
        };
        f.debug_struct("Iter")
            .field("state", &state)
            .field("remaining", &self.remaining())
            .finish_non_exhaustive()
    }
}
