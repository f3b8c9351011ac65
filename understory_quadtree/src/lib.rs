// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Quadtree: a point quadtree for 2D range queries.
//!
//! Understory Quadtree is a reusable building block for proximity lookups,
//! collision broad-phase, and viewport culling.
//!
//! - Insert point-located entities into a fixed square domain.
//! - Query with a square, a circle, a [`kurbo::Rect`], or any type implementing [`Region`].
//! - Rebuild wholesale with [`QuadTree::update`] or [`QuadTree::from_entities`].
//!
//! Cells split into four quadrants (NW, NE, SW, SE) once they hold
//! [`TreeConfig::capacity`] entities and another one arrives. Entities already in
//! a cell stay there when it splits, so queries collect matches at every level.
//! Square cells are half-open on their upper edges: a point on a shared edge
//! belongs to the east or south neighbor, never to both.
//!
//! Subdivision is bounded by [`TreeConfig::max_depth`] and by `f64` resolution,
//! so clusters of coincident points cannot recurse without limit. See
//! [`DepthPolicy`] for what happens at the floor.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_quadtree::{Entity, QuadTree, Range, Square};
//!
//! // Cover [0, 400) × [0, 400) with cells of up to 8 entities.
//! let boundary = Square::new(Point::new(200.0, 200.0), 200.0).unwrap();
//! let mut tree = QuadTree::new(boundary, 8).unwrap();
//!
//! assert!(tree.insert(Entity::new(Point::new(20.0, 30.0), "a")));
//! assert!(tree.insert(Entity::new(Point::new(120.0, 140.0), "b")));
//! assert!(tree.insert(Entity::new(Point::new(300.0, 10.0), "c")));
//! // Outside the boundary: the upper edge is exclusive.
//! assert!(!tree.insert(Entity::new(Point::new(400.0, 10.0), "d")));
//!
//! let near_origin = Range::square(Point::new(50.0, 50.0), 100.0).unwrap();
//! let hits: Vec<_> = tree.query_range(&near_origin).iter().map(|e| e.payload).collect();
//! assert_eq!(hits, ["a", "b"]);
//!
//! let around_b = Range::circle(Point::new(120.0, 150.0), 10.0).unwrap();
//! assert_eq!(tree.query_range(&around_b).len(), 1);
//! ```
//!
//! Bare points work too, and the tree can be rebuilt from a fresh set:
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_quadtree::{QuadTree, Square, TreeConfig};
//!
//! let boundary = Square::new(Point::new(0.0, 0.0), 100.0).unwrap();
//! let points = (0..50).map(|i| Point::new(i as f64 - 25.0, 0.0));
//! let mut tree = QuadTree::from_entities(boundary, TreeConfig::new(4), points).unwrap();
//! assert_eq!(tree.len(), 50);
//!
//! tree.update([Point::new(1.0, 1.0), Point::new(-1.0, -1.0)]);
//! assert_eq!(tree.query_range(&Rect::new(0.0, 0.0, 10.0, 10.0)).len(), 1);
//! ```
//!
//! ## Ranges and pruning
//!
//! Subtrees are skipped when their cell's box does not overlap the query's
//! [`Region::bounding_box`]. For circles that box is larger than the disk, so a
//! few extra cells may be visited; every candidate is still tested with
//! [`Region::contains_point`].
//!
//! Disks are closed: a point on the rim matches. Their boxes report
//! [`Region::closed_upper_edges`], so a box that only touches a cell's lower
//! edge still counts as overlapping. Custom regions with closed containment
//! should do the same. A raw [`kurbo::Circle`] with a zero, negative, or NaN
//! radius matches nothing.
//!
//! ## Concurrency
//!
//! The tree is a plain owned value. Sharing it across threads follows the usual
//! borrow rules: many concurrent readers or one writer.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod entity;
pub mod error;
pub mod tree;
pub mod types;

pub use config::{DepthPolicy, TreeConfig};
pub use entity::{Entity, Located};
pub use error::{ConfigError, GeometryError, InsertError};
pub use tree::{Iter, QuadTree, TreeStats};
pub use types::{Range, Region, Square};
