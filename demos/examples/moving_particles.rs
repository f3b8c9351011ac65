// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving particles.
//!
//! A collision broad-phase loop: each frame the particles drift, the tree is
//! rebuilt with `update`, and every particle looks up neighbors within a
//! radius using a circular range.
//!
//! Run:
//! - `cargo run -p understory_demos --example moving_particles`

use kurbo::{Circle, Point, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_quadtree::{Entity, QuadTree, Square, TreeConfig};

const SIDE: f64 = 1000.0;
const RADIUS: f64 = 12.0;

#[derive(Copy, Clone, Debug)]
struct Particle {
    id: usize,
    velocity: Vec2,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut particles: Vec<Entity<Particle>> = (0..2_000)
        .map(|id| {
            let p = Point::new(rng.random_range(0.0..SIDE), rng.random_range(0.0..SIDE));
            let v = Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0));
            Entity::new(p, Particle { id, velocity: v })
        })
        .collect();

    let boundary = Square::new(Point::new(SIDE / 2.0, SIDE / 2.0), SIDE / 2.0).unwrap();
    let mut tree = QuadTree::with_config(boundary, TreeConfig::new(16)).unwrap();

    for frame in 0..10 {
        for e in &mut particles {
            let mut next = e.point + e.payload.velocity;
            // Bounce off the walls; the upper edge is exclusive.
            if !(0.0..SIDE).contains(&next.x) {
                e.payload.velocity.x = -e.payload.velocity.x;
                next.x = e.point.x;
            }
            if !(0.0..SIDE).contains(&next.y) {
                e.payload.velocity.y = -e.payload.velocity.y;
                next.y = e.point.y;
            }
            e.point = next;
        }

        tree.update(particles.iter().copied());

        let mut pairs = 0;
        for e in &particles {
            let near = tree.query_range(&Circle::new(e.point, RADIUS));
            pairs += near.iter().filter(|o| o.payload.id > e.payload.id).count();
        }
        info!(frame, pairs, stats = ?tree.stats(), "broad-phase");
    }
}
