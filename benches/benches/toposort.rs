// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use understory_toposort::{order_topologically, stable_order_topologically};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

/// Dependency lists for `0..n`, acyclic because every edge points to a
/// smaller value.
fn build_dag(n: u32, edges_per_node: u32, seed: u64) -> Vec<Vec<u32>> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|from| {
            let out = edges_per_node.min(from);
            (0..out)
                .map(|_| rng.gen_range_usize(from as usize) as u32)
                .collect()
        })
        .collect()
}

/// `0..n` in a scrambled order, so the sort has real work to do.
fn shuffled(n: u32, seed: u64) -> Vec<u32> {
    let mut rng = Lcg::new(seed);
    let mut items: Vec<u32> = (0..n).collect();
    for i in (1..items.len()).rev() {
        let j = rng.gen_range_usize(i + 1);
        items.swap(i, j);
    }
    items
}

fn bench_toposort(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_toposort");
    group.sample_size(50);

    for &(n, edges_per_node) in &[
        (256_u32, 1_u32),
        (256_u32, 4_u32),
        (4_096_u32, 1_u32),
        (4_096_u32, 4_u32),
    ] {
        let deps = build_dag(n, edges_per_node, 0x7090_0000_0000_0001);
        let items = shuffled(n, 0x7090_0000_0000_0002);
        let lookup = |i: &u32| deps[*i as usize].iter().copied();

        group.bench_function(format!("plain(n={n},e={edges_per_node})"), |b| {
            let order = order_topologically(items.clone(), lookup);
            b.iter(|| {
                let sum: u64 = order
                    .iter()
                    .map(|item| u64::from(item.expect("acyclic")))
                    .sum();
                black_box(sum);
            });
        });

        group.bench_function(format!("stable(n={n},e={edges_per_node})"), |b| {
            let order = stable_order_topologically(items.clone(), lookup);
            b.iter(|| black_box(order.to_vec().expect("acyclic")));
        });

        group.bench_function(format!("then_by_desc(n={n},e={edges_per_node})"), |b| {
            let order = order_topologically(items.clone(), lookup).then_by_desc(|i| *i);
            b.iter(|| black_box(order.to_vec().expect("acyclic")));
        });

        group.bench_function(
            format!("nested_then_by(n={n},e={edges_per_node})"),
            |b| {
                let order = order_topologically(items.clone(), lookup)
                    .then_by(|i| i % 7)
                    .then_by_desc(|i| *i);
                b.iter(|| black_box(order.to_vec().expect("acyclic")));
            },
        );

        // Only the first element: graph construction plus one pop.
        group.bench_function(format!("first_only(n={n},e={edges_per_node})"), |b| {
            let order = stable_order_topologically(items.clone(), lookup);
            b.iter(|| black_box(order.iter().next()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_toposort);
criterion_main!(benches);
