// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Representative indices for materialized source elements.
//!
//! Every source element gets its own index, but the dependency graph only has
//! one node per *distinct* element under the ordering's equality relation.
//! The first occurrence of a value is its representative; later occurrences
//! are recorded as duplicates of that representative and share its edges.
//!
//! The equality relation is injected, so lookups hash through
//! [`ItemEquality::hash_item`] into buckets of candidate indices and confirm
//! with [`ItemEquality::equivalent`], rather than storing keys in a map.

use alloc::vec::Vec;
use core::hash::{BuildHasher, Hasher};

use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;

use crate::equality::ItemEquality;

/// Groups source indices behind one representative index per distinct value.
#[derive(Debug)]
pub(crate) struct Representatives {
    /// Representative indices, in first-seen order.
    order: Vec<usize>,
    /// Later occurrences of each representative, in source order.
    duplicates: HashMap<usize, Vec<usize>>,
    buckets: HashMap<u64, Vec<usize>>,
    build_hasher: DefaultHashBuilder,
}

impl Representatives {
    /// Assigns every element of `items` to a representative.
    pub(crate) fn new<T, E>(items: &[T], equality: &E) -> Self
    where
        E: ItemEquality<T>,
    {
        let mut reps = Self {
            order: Vec::with_capacity(items.len()),
            duplicates: HashMap::new(),
            buckets: HashMap::with_capacity(items.len()),
            build_hasher: DefaultHashBuilder::default(),
        };

        for (index, item) in items.iter().enumerate() {
            let hash = reps.hash_of(equality, item);
            match reps.find_hashed(hash, items, equality, item) {
                Some(representative) => {
                    reps.duplicates.entry(representative).or_default().push(index);
                }
                None => {
                    reps.order.push(index);
                    reps.buckets.entry(hash).or_default().push(index);
                }
            }
        }

        reps
    }

    /// Returns the representative of `value`, if any element of `items`
    /// is equivalent to it.
    pub(crate) fn find<T, E>(&self, items: &[T], equality: &E, value: &T) -> Option<usize>
    where
        E: ItemEquality<T>,
    {
        self.find_hashed(self.hash_of(equality, value), items, equality, value)
    }

    /// Representative indices in first-seen order.
    pub(crate) fn representatives(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the table, keeping only the duplicate lists.
    pub(crate) fn into_duplicates(self) -> HashMap<usize, Vec<usize>> {
        self.duplicates
    }

    fn find_hashed<T, E>(&self, hash: u64, items: &[T], equality: &E, value: &T) -> Option<usize>
    where
        E: ItemEquality<T>,
    {
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|&candidate| equality.equivalent(&items[candidate], value))
    }

    fn hash_of<T, E>(&self, equality: &E, item: &T) -> u64
    where
        E: ItemEquality<T>,
    {
        let mut state = self.build_hasher.build_hasher();
        equality.hash_item(item, &mut state);
        state.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::{DefaultEquality, KeyEquality};

    #[test]
    fn duplicates_share_the_first_index() {
        let items = ['a', 'b', 'a', 'c', 'a', 'b'];
        let reps = Representatives::new(&items, &DefaultEquality);

        assert_eq!(reps.representatives(), &[0, 1, 3]);
        assert_eq!(reps.find(&items, &DefaultEquality, &'a'), Some(0));
        assert_eq!(reps.find(&items, &DefaultEquality, &'c'), Some(3));
        assert_eq!(reps.find(&items, &DefaultEquality, &'z'), None);

        let duplicates = reps.into_duplicates();
        assert_eq!(duplicates.get(&0).map(Vec::as_slice), Some(&[2, 4][..]));
        assert_eq!(duplicates.get(&1).map(Vec::as_slice), Some(&[5][..]));
        assert!(!duplicates.contains_key(&3));
    }

    #[test]
    fn injected_equality_decides_identity() {
        let items = [10, 21, 30, 41];
        let eq = KeyEquality::new(|v: &i32| v % 10);
        let reps = Representatives::new(&items, &eq);

        assert_eq!(reps.representatives(), &[0, 1]);
        assert_eq!(reps.find(&items, &eq, &50), Some(0));
        assert_eq!(reps.find(&items, &eq, &1), Some(1));
        assert_eq!(reps.find(&items, &eq, &7), None);
    }
}
