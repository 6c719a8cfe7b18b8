// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Toposort: lazy, dependency-respecting orderings.
//!
//! This crate reorders a sequence so that every element comes after the
//! elements it depends on. Dependencies are given as a function from an
//! element to the elements it needs; the result is computed lazily, one
//! element per pull.
//!
//! - **Plain orderings** ([`order_topologically`]): any valid order, with
//!   elements that become eligible earlier emitted earlier.
//! - **Stable orderings** ([`stable_order_topologically`]): among eligible
//!   elements, the one that came first in the source goes first, so a source
//!   that already respects its dependencies comes out unchanged.
//! - **Tie-breakers** ([`TopologicalOrder::then_by`],
//!   [`TopologicalOrder::then_by_desc`], [`TopologicalOrder::then_by_with`]):
//!   order eligible elements by one or more keys, without ever violating a
//!   dependency.
//! - **Equality relations** ([`DefaultEquality`], [`KeyEquality`]): decide
//!   which elements are the same graph node. Duplicates share their first
//!   occurrence's dependencies and are all emitted.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_toposort::{order_topologically, stable_order_topologically};
//!
//! // Each number depends on its successor.
//! let sorted = order_topologically(0..5, |i: &u32| if *i < 4 { vec![i + 1] } else { vec![] })
//!     .to_vec()
//!     .unwrap();
//! assert_eq!(sorted, [4, 3, 2, 1, 0]);
//!
//! // "a" needs "d" and "c" needs "e"; everything else keeps its place.
//! let sorted = stable_order_topologically(["a", "b", "c", "d", "e"], |s: &&str| match *s {
//!     "a" => vec!["d"],
//!     "c" => vec!["e"],
//!     _ => vec![],
//! })
//! .to_vec()
//! .unwrap();
//! assert_eq!(sorted, ["b", "d", "a", "e", "c"]);
//! ```
//!
//! ## Laziness and errors
//!
//! Orderings are descriptions: building one never calls the dependency
//! function. Each enumeration materializes the source and builds its graph
//! on the first pull, then yields `Result<T, SortError>` items. A failure is
//! yielded once and ends the enumeration; see [`SortError`] for the cases.
//!
//! ```rust
//! use understory_toposort::{order_topologically, SortError};
//!
//! let order = order_topologically(["a", "aa", "aaa"], |s: &&str| {
//!     let s = *s;
//!     [&s[1..]]
//! });
//! assert_eq!(order.to_vec(), Err(SortError::DependencyNotInSource { index: 0 }));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit structured `tracing` debug events when a graph is built,
//!   when an enumeration completes and when it fails.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[macro_use]
mod log;

mod dependencies;
mod equality;
mod error;
mod graph;
mod heap;
mod intern;
mod items;
mod iter;
mod ordered;
mod provider;
mod queue;
mod then_by;

use core::hash::Hash;

pub use dependencies::{DependencyFn, Fallible};
pub use equality::{DefaultEquality, ItemEquality, KeyEquality};
pub use error::SortError;
pub use heap::{IndexHeap, IndexLess, IndexOrder, SourceOrder};
pub use items::SourceItems;
pub use iter::Iter;
pub use ordered::{StableTopologicalOrder, TopologicalOrder};
pub use provider::{Plain, SortProvider, Stable, ThenByProvider};
pub use queue::{FifoQueue, ReadyQueue};
pub use then_by::{NaturalOrder, ThenBy};

/// Orders `source` so that every element follows its dependencies.
///
/// `dependencies` maps an element to the elements that must come before it;
/// each returned value must be equal to some element of `source`. Elements
/// are compared with their own [`Eq`] and [`Hash`].
///
/// The result can be refined with [`then_by`](TopologicalOrder::then_by) and
/// friends. Nothing runs until the ordering is enumerated.
pub fn order_topologically<S, D, I>(
    source: S,
    dependencies: D,
) -> TopologicalOrder<Plain<S, D, DefaultEquality>>
where
    S: IntoIterator + Clone,
    S::Item: Eq + Hash,
    D: Fn(&S::Item) -> I,
    I: IntoIterator<Item = S::Item>,
{
    TopologicalOrder::new(source, dependencies, DefaultEquality)
}

/// Like [`order_topologically`], comparing elements with `equality`.
pub fn order_topologically_with<S, D, I, E>(
    source: S,
    dependencies: D,
    equality: E,
) -> TopologicalOrder<Plain<S, D, E>>
where
    S: IntoIterator + Clone,
    D: Fn(&S::Item) -> I,
    I: IntoIterator<Item = S::Item>,
    E: ItemEquality<S::Item>,
{
    TopologicalOrder::new(source, dependencies, equality)
}

/// Orders `source` so that every element follows its dependencies, moving
/// elements as little as the dependencies allow.
///
/// Whenever several elements are eligible, the one that appears first in
/// `source` is emitted. Elements are compared with their own [`Eq`] and
/// [`Hash`].
pub fn stable_order_topologically<S, D, I>(
    source: S,
    dependencies: D,
) -> StableTopologicalOrder<S, D, DefaultEquality>
where
    S: IntoIterator + Clone,
    S::Item: Eq + Hash,
    D: Fn(&S::Item) -> I,
    I: IntoIterator<Item = S::Item>,
{
    StableTopologicalOrder::new(source, dependencies, DefaultEquality)
}

/// Like [`stable_order_topologically`], comparing elements with `equality`.
pub fn stable_order_topologically_with<S, D, I, E>(
    source: S,
    dependencies: D,
    equality: E,
) -> StableTopologicalOrder<S, D, E>
where
    S: IntoIterator + Clone,
    D: Fn(&S::Item) -> I,
    I: IntoIterator<Item = S::Item>,
    E: ItemEquality<S::Item>,
{
    StableTopologicalOrder::new(source, dependencies, equality)
}
