// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_quadtree::{QuadTree, Range, Square, TreeConfig};

use rstar::{AABB, RTree};

fn gen_grid_points(n: usize, cell: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point::new(x as f64 * cell + 0.5, y as f64 * cell + 0.5));
        }
    }
    out
}

fn bench_point_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_external_compare");
    for &n in &[64usize, 128] {
        let points = gen_grid_points(n, 10.0);
        let half = n as f64 * 5.0;
        let boundary = Square::new(Point::new(half, half), half).unwrap();
        let query = Range::square(Point::new(300.0, 300.0), 200.0).unwrap();
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree =
                        QuadTree::from_entities(boundary, TreeConfig::default(), points).unwrap();
                    black_box(tree.query_range(&query).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    let aabb = AABB::from_corners([100.0, 100.0], [500.0, 500.0]);
                    black_box(tree.locate_in_envelope(&aabb).count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_point_external_compare);
criterion_main!(benches);
