// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Circle, Point, Rect};
use understory_quadtree::{Entity, QuadTree, Range, Square, TreeConfig};

const SIDE: f64 = 2048.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn domain() -> Square {
    Square::new(Point::new(SIDE / 2.0, SIDE / 2.0), SIDE / 2.0).unwrap()
}

fn gen_uniform_points(count: usize) -> Vec<Entity<u32>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|i| {
            let p = Point::new(rng.next_f64() * SIDE, rng.next_f64() * SIDE);
            Entity::new(p, i as u32)
        })
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Entity<u32>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((
            spread + rng.next_f64() * (SIDE - 2.0 * spread),
            spread + rng.next_f64() * (SIDE - 2.0 * spread),
        ));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            let id = out.len() as u32;
            out.push(Entity::new(Point::new(cx + dx, cy + dy), id));
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let points = gen_uniform_points(n);
        group.throughput(Throughput::Elements(n as u64));
        for &capacity in &[4usize, 8, 32] {
            group.bench_function(format!("uniform_n{}_cap{}", n, capacity), |b| {
                b.iter_batched(
                    || points.clone(),
                    |points| {
                        let tree = QuadTree::from_entities(
                            domain(),
                            TreeConfig::new(capacity),
                            points,
                        )
                        .unwrap();
                        black_box(tree.len());
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    let clustered = gen_clustered_points(16, 2_000, 24.0);
    group.throughput(Throughput::Elements(clustered.len() as u64));
    group.bench_function("clustered_16x2000", |b| {
        b.iter_batched(
            || clustered.clone(),
            |points| {
                let tree =
                    QuadTree::from_entities(domain(), TreeConfig::default(), points).unwrap();
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    let points = gen_uniform_points(100_000);
    let tree = QuadTree::from_entities(domain(), TreeConfig::default(), points).unwrap();
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let centers: Vec<Point> = (0..256)
        .map(|_| Point::new(rng.next_f64() * SIDE, rng.next_f64() * SIDE))
        .collect();

    for &extent in &[8.0_f64, 64.0, 256.0] {
        group.bench_function(format!("square_e{}", extent), |b| {
            let ranges: Vec<Range> = centers
                .iter()
                .map(|&c| Range::square(c, extent).unwrap())
                .collect();
            let mut out = Vec::new();
            b.iter(|| {
                let mut total = 0;
                for r in &ranges {
                    out.clear();
                    tree.query_range_into(r, &mut out);
                    total += out.len();
                }
                black_box(total);
            })
        });
        group.bench_function(format!("circle_e{}", extent), |b| {
            let circles: Vec<Circle> = centers.iter().map(|&c| Circle::new(c, extent)).collect();
            b.iter(|| {
                let total: usize = circles.iter().map(|c| tree.query_range(c).len()).sum();
                black_box(total);
            })
        });
    }
    group.bench_function("viewport_rect", |b| {
        let viewport = Rect::new(512.0, 512.0, 1536.0, 1280.0);
        b.iter(|| black_box(tree.query_range(&viewport).len()))
    });
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_update");
    let mut points = gen_uniform_points(10_000);
    let mut tree =
        QuadTree::from_entities(domain(), TreeConfig::default(), points.clone()).unwrap();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("drift_and_rebuild_n10000", |b| {
        let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
        b.iter(|| {
            for e in points.iter_mut() {
                let x = (e.point.x + (rng.next_f64() - 0.5) * 4.0).clamp(0.0, SIDE - 1.0);
                let y = (e.point.y + (rng.next_f64() - 0.5) * 4.0).clamp(0.0, SIDE - 1.0);
                e.point = Point::new(x, y);
            }
            tree.update(points.iter().copied());
            black_box(tree.len());
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_update);
criterion_main!(benches);
