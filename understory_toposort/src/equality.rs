// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Equality relations used to match dependencies against source elements.

use core::fmt;
use core::hash::{Hash, Hasher};

/// An equality relation over elements, with a consistent hash.
///
/// The ordering uses this relation for two things: grouping duplicate
/// elements behind one representative, and resolving the values returned by
/// the dependency function back to source elements.
///
/// Implementations must uphold the usual `Eq`/`Hash` contract: elements that
/// are [`equivalent`](Self::equivalent) must feed the same data to the hasher.
pub trait ItemEquality<T: ?Sized> {
    /// Returns `true` if `a` and `b` denote the same graph node.
    fn equivalent(&self, a: &T, b: &T) -> bool;

    /// Feeds the hash of `item` into `state`.
    fn hash_item<H: Hasher>(&self, item: &T, state: &mut H);
}

/// Equality through the element's own [`Eq`] and [`Hash`] implementations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultEquality;

impl<T> ItemEquality<T> for DefaultEquality
where
    T: Eq + Hash + ?Sized,
{
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn hash_item<H: Hasher>(&self, item: &T, state: &mut H) {
        item.hash(state);
    }
}

/// Equality on a key projected from each element.
///
/// Two elements are equivalent when their keys are equal.
///
/// # Example
///
/// ```
/// use understory_toposort::{KeyEquality, stable_order_topologically_with};
///
/// let items = ["B", "a", "b"];
/// // "B" and "b" are the same node, so "a" must precede both of them.
/// let sorted = stable_order_topologically_with(
///     items,
///     |s: &&str| if s.eq_ignore_ascii_case("b") { vec!["A"] } else { vec![] },
///     KeyEquality::new(|s: &&str| s.to_ascii_lowercase()),
/// )
/// .to_vec()
/// .unwrap();
/// assert_eq!(sorted, ["a", "B", "b"]);
/// ```
#[derive(Copy, Clone, Default)]
pub struct KeyEquality<F> {
    key: F,
}

impl<F> KeyEquality<F> {
    /// Creates an equality relation comparing the keys produced by `key`.
    pub fn new(key: F) -> Self {
        Self { key }
    }
}

impl<F> fmt::Debug for KeyEquality<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEquality").finish_non_exhaustive()
    }
}

impl<T, K, F> ItemEquality<T> for KeyEquality<F>
where
    T: ?Sized,
    F: Fn(&T) -> K,
    K: Eq + Hash,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    fn hash_item<H: Hasher>(&self, item: &T, state: &mut H) {
        (self.key)(item).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::BuildHasher;
    use hashbrown::DefaultHashBuilder;

    #[test]
    fn default_equality_follows_eq() {
        assert!(DefaultEquality.equivalent(&1_u32, &1));
        assert!(!DefaultEquality.equivalent(&1_u32, &2));
        assert!(DefaultEquality.equivalent(&None::<u8>, &None));
    }

    #[test]
    fn key_equality_hashes_consistently() {
        let eq = KeyEquality::new(|v: &i32| v.rem_euclid(10));
        assert!(eq.equivalent(&3, &13));
        assert!(!eq.equivalent(&3, &4));

        let builder = DefaultHashBuilder::default();
        let mut a = builder.build_hasher();
        let mut b = builder.build_hasher();
        eq.hash_item(&3, &mut a);
        eq.hash_item(&-7, &mut b);
        assert_eq!(a.finish(), b.finish(), "equivalent items must hash alike");
    }
}
