// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index-based dependency graph built from a materialized source.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::dependencies::DependencyFn;
use crate::equality::ItemEquality;
use crate::error::SortError;
use crate::intern::Representatives;

/// One entry in a dependents list.
#[derive(Copy, Clone, Debug)]
struct Edge {
    /// The element waiting on the list's owner.
    dependent: usize,
    /// Next entry of the same list.
    next: Option<usize>,
}

#[derive(Copy, Clone, Debug, Default)]
struct Node {
    /// Dependencies not yet emitted.
    in_degree: usize,
    /// Head of the list of elements that depend on this one.
    dependents: Option<usize>,
}

/// Dependency graph over source indices.
///
/// Only representatives carry edges. Each edge record is threaded onto the
/// dependents list of the element it depends on, so releasing an element
/// walks exactly its own edges. Edges are not deduplicated: an element that
/// names the same dependency twice gets two records and an in-degree of two,
/// and both are released together.
///
/// Counts are consumed as elements are released; a graph serves one
/// enumeration.
#[derive(Debug)]
pub(crate) struct DependencyGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    duplicates: HashMap<usize, Vec<usize>>,
    /// Representatives without dependencies, in first-seen order.
    roots: Vec<usize>,
}

impl DependencyGraph {
    /// Builds the graph for `items`.
    ///
    /// `dependencies` is invoked once per representative, in first-seen
    /// order. A representative's in-degree is final once its own edges are
    /// processed, so it is recorded as a root right then.
    pub(crate) fn build<T, D, E>(
        items: &[T],
        dependencies: &D,
        equality: &E,
    ) -> Result<Self, SortError>
    where
        D: DependencyFn<T>,
        E: ItemEquality<T>,
    {
        let reps = Representatives::new(items, equality);
        let mut nodes = Vec::new();
        nodes.resize(items.len(), Node::default());
        let mut edges = Vec::new();
        let mut roots = Vec::new();

        for &index in reps.representatives() {
            let Some(deps) = dependencies.dependencies(&items[index]) else {
                debug!(index, "dependency function returned no dependencies");
                return Err(SortError::NullDependencies { index });
            };
            for dep in deps {
                let Some(dependency) = reps.find(items, equality, &dep) else {
                    debug!(index, "dependency is not in source");
                    return Err(SortError::DependencyNotInSource { index });
                };
                edges.push(Edge {
                    dependent: index,
                    next: nodes[dependency].dependents,
                });
                nodes[dependency].dependents = Some(edges.len() - 1);
                nodes[index].in_degree += 1;
            }
            if nodes[index].in_degree == 0 {
                roots.push(index);
            }
        }

        debug!(
            items = items.len(),
            distinct = reps.representatives().len(),
            edges = edges.len(),
            roots = roots.len(),
            "built dependency graph"
        );

        Ok(Self {
            nodes,
            edges,
            duplicates: reps.into_duplicates(),
            roots,
        })
    }

    /// Passes every initially ready index to `ready`: each root in
    /// first-seen order, followed by its duplicates.
    pub(crate) fn seed(&mut self, mut ready: impl FnMut(usize)) {
        let roots = core::mem::take(&mut self.roots);
        for index in roots {
            self.with_duplicates(index, &mut ready);
        }
    }

    /// Releases the edges of an emitted element.
    ///
    /// Every dependent whose in-degree drops to zero is passed to `ready`,
    /// followed by its duplicates.
    pub(crate) fn release(&mut self, index: usize, mut ready: impl FnMut(usize)) {
        let mut current = self.nodes[index].dependents.take();
        while let Some(edge) = current {
            let Edge { dependent, next } = self.edges[edge];
            let remaining = {
                let node = &mut self.nodes[dependent];
                node.in_degree -= 1;
                node.in_degree
            };
            if remaining == 0 {
                self.with_duplicates(dependent, &mut ready);
            }
            current = next;
        }
    }

    /// Number of source elements, duplicates included.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    fn with_duplicates(&self, index: usize, ready: &mut impl FnMut(usize)) {
        ready(index);
        if let Some(duplicates) = self.duplicates.get(&index) {
            duplicates.iter().copied().for_each(ready);
        }
    }
}
