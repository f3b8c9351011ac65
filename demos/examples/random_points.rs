// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random points.
//!
//! Scatter integer points over a 400×400 domain, insert them, and run one
//! square query that pokes out past the domain's top-left corner.
//!
//! Run:
//! - `cargo run -p understory_demos --example random_points`
//! - `RUST_LOG=trace cargo run -p understory_demos --example random_points` to see splits

use kurbo::Point;
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Entity, QuadTree, Range, Square};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let boundary = Square::new(Point::new(200.0, 200.0), 200.0).unwrap();
    let mut tree = QuadTree::new(boundary, 8).unwrap();

    let mut rng = rand::rng();
    for id in 0..20_u32 {
        let x = f64::from(rng.random_range(0_u32..400));
        let y = f64::from(rng.random_range(0_u32..400));
        let inserted = tree.insert(Entity::new(Point::new(x, y), id));
        assert!(inserted, "points are drawn inside the boundary");
    }
    info!(stats = ?tree.stats(), "tree built");

    let range = Range::square(Point::new(50.0, 50.0), 100.0).unwrap();
    let hits = tree.query_range(&range);
    info!(count = hits.len(), "query [-50, 150) × [-50, 150)");
    for e in hits {
        println!("#{:>2} at ({:>3}, {:>3})", e.payload, e.point.x, e.point.y);
    }
}
