// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entities stored in the tree.

use kurbo::Point;

/// Anything with a 2D position the tree can place and query.
///
/// Only the position is consulted; the rest of the value is opaque payload.
pub trait Located {
    /// Position used for placement and range tests.
    fn position(&self) -> Point;
}

/// A point with an attached payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entity<P> {
    /// Position of the entity.
    pub point: Point,
    /// User data carried alongside the point.
    pub payload: P,
}

impl<P> Entity<P> {
    /// Create an entity at `point` carrying `payload`.
    pub const fn new(point: Point, payload: P) -> Self {
        Self { point, payload }
    }
}

impl<P> Located for Entity<P> {
    #[inline]
    fn position(&self) -> Point {
        self.point
    }
}

/// Bare points: the payload-free variant.
impl Located for Point {
    #[inline]
    fn position(&self) -> Point {
        *self
    }
}

impl<P> Located for (Point, P) {
    #[inline]
    fn position(&self) -> Point {
        self.0
    }
}

impl<L: Located + ?Sized> Located for &L {
    #[inline]
    fn position(&self) -> Point {
        (**self).position()
    }
}
