// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region predicates: node boundaries, query ranges, and the [`Region`] trait.

use kurbo::{Circle, Point, Rect};

use crate::error::GeometryError;

/// A region that can answer point containment and report a bounding box.
///
/// Anything implementing this trait can be used as a query range; the tree uses
/// [`Region::intersects`] to prune subtrees and [`Region::contains_point`] to
/// filter individual entities.
pub trait Region {
    /// Whether the point lies inside the region.
    fn contains_point(&self, point: Point) -> bool;

    /// An axis-aligned box enclosing the region.
    ///
    /// May be conservative (larger than the region), never smaller.
    fn bounding_box(&self) -> Rect;

    /// Whether points on the upper edges of [`Region::bounding_box`] can be
    /// inside the region.
    ///
    /// `false` for half-open shapes (squares, rectangles), `true` for closed
    /// ones such as disks, whose rim touches the box.
    fn closed_upper_edges(&self) -> bool {
        false
    }

    /// Whether the bounding boxes of `self` and `other` overlap.
    ///
    /// A lower edge must be strictly less than the other box's upper edge, or
    /// equal to it when that upper edge is closed. Two half-open squares that
    /// merely touch do not overlap; a disk whose box touches a cell's lower
    /// edge does. For circles this over-approximates, which is fine for
    /// pruning since entities are still checked with [`Region::contains_point`].
    fn intersects<R: Region + ?Sized>(&self, other: &R) -> bool
    where
        Self: Sized,
    {
        overlaps(
            self.bounding_box(),
            self.closed_upper_edges(),
            other.bounding_box(),
            other.closed_upper_edges(),
        )
    }
}

fn overlaps(a: Rect, a_closed: bool, b: Rect, b_closed: bool) -> bool {
    let below = |lo: f64, hi: f64, closed: bool| if closed { lo <= hi } else { lo < hi };
    below(a.x0, b.x1, b_closed)
        && below(b.x0, a.x1, a_closed)
        && below(a.y0, b.y1, b_closed)
        && below(b.y0, a.y1, a_closed)
}

/// Axis-aligned square, half-open on its upper edges.
///
/// Covers `[center.x - e, center.x + e)` × `[center.y - e, center.y + e)`.
/// Edges are stored directly so that [`Square::quadrants`] shares them exactly
/// with the parent and siblings, which keeps the partition gap-free under
/// floating point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Square {
    min: Point,
    max: Point,
}

impl Square {
    /// Create a square from its center and half side length.
    ///
    /// Fails if `half_extent` is not strictly positive or if any coordinate is
    /// not finite.
    pub fn new(center: Point, half_extent: f64) -> Result<Self, GeometryError> {
        check_center(center)?;
        check_extent(half_extent)?;
        let min = Point::new(center.x - half_extent, center.y - half_extent);
        let max = Point::new(center.x + half_extent, center.y + half_extent);
        if min.x < max.x && min.y < max.y {
            Ok(Self { min, max })
        } else {
            Err(GeometryError::CollapsedExtent(half_extent))
        }
    }

    /// Lower (inclusive) corner.
    pub fn min(&self) -> Point {
        self.min
    }

    /// Upper (exclusive) corner.
    pub fn max(&self) -> Point {
        self.max
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
        )
    }

    /// Half side length.
    pub fn half_extent(&self) -> f64 {
        0.5 * (self.max.x - self.min.x)
    }

    /// The four quadrants in NW, NE, SW, SE order (y grows downward).
    ///
    /// Returns `None` when the square is too small to split in floating point,
    /// i.e. the midpoint coincides with an edge on either axis.
    pub fn quadrants(&self) -> Option<[Self; 4]> {
        let mid = self.center();
        let splittable = self.min.x < mid.x
            && mid.x < self.max.x
            && self.min.y < mid.y
            && mid.y < self.max.y;
        if !splittable {
            return None;
        }
        let (x0, y0, x1, y1) = (self.min.x, self.min.y, self.max.x, self.max.y);
        let cell = |ax: f64, ay: f64, bx: f64, by: f64| Self {
            min: Point::new(ax, ay),
            max: Point::new(bx, by),
        };
        Some([
            cell(x0, y0, mid.x, mid.y),
            cell(mid.x, y0, x1, mid.y),
            cell(x0, mid.y, mid.x, y1),
            cell(mid.x, mid.y, x1, y1),
        ])
    }
}

impl Region for Square {
    fn contains_point(&self, point: Point) -> bool {
        self.min.x <= point.x
            && point.x < self.max.x
            && self.min.y <= point.y
            && point.y < self.max.y
    }

    fn bounding_box(&self) -> Rect {
        Rect::from_points(self.min, self.max)
    }
}

/// Closed disk: distance to the center `<= radius` is inside.
///
/// A radius that is zero, negative, or NaN describes an empty region, the
/// same extents [`Range::circle`] refuses.
impl Region for Circle {
    fn contains_point(&self, point: Point) -> bool {
        self.radius > 0.0 && (point - self.center).hypot2() <= self.radius * self.radius
    }

    fn bounding_box(&self) -> Rect {
        let r = if self.radius > 0.0 { self.radius } else { 0.0 };
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    fn closed_upper_edges(&self) -> bool {
        true
    }
}

/// Half-open rectangle, consistent with [`Rect::contains`].
impl Region for Rect {
    fn contains_point(&self, point: Point) -> bool {
        self.abs().contains(point)
    }

    fn bounding_box(&self) -> Rect {
        self.abs()
    }
}

/// A query range: a square or a circle sharing a center and an extent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Range {
    /// Half-open square; extent is the half side length.
    Square(Square),
    /// Closed disk; extent is the radius.
    Circle(Circle),
}

impl Range {
    /// Square range centered at `center` with half side `extent`.
    pub fn square(center: Point, extent: f64) -> Result<Self, GeometryError> {
        Square::new(center, extent).map(Self::Square)
    }

    /// Circular range centered at `center` with radius `extent`.
    pub fn circle(center: Point, extent: f64) -> Result<Self, GeometryError> {
        check_center(center)?;
        check_extent(extent)?;
        Ok(Self::Circle(Circle::new(center, extent)))
    }

    /// Center of the range.
    pub fn center(&self) -> Point {
        match self {
            Self::Square(s) => s.center(),
            Self::Circle(c) => c.center,
        }
    }

    /// Half side length for squares, radius for circles.
    pub fn extent(&self) -> f64 {
        match self {
            Self::Square(s) => s.half_extent(),
            Self::Circle(c) => c.radius,
        }
    }
}

impl Region for Range {
    fn contains_point(&self, point: Point) -> bool {
        match self {
            Self::Square(s) => s.contains_point(point),
            Self::Circle(c) => c.contains_point(point),
        }
    }

    fn bounding_box(&self) -> Rect {
        match self {
            Self::Square(s) => s.bounding_box(),
            Self::Circle(c) => c.bounding_box(),
        }
    }

    fn closed_upper_edges(&self) -> bool {
        match self {
            Self::Square(s) => s.closed_upper_edges(),
            Self::Circle(c) => c.closed_upper_edges(),
        }
    }
}

impl From<Square> for Range {
    fn from(square: Square) -> Self {
        Self::Square(square)
    }
}

fn check_center(center: Point) -> Result<(), GeometryError> {
    if center.x.is_finite() && center.y.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFiniteCenter { x: center.x, y: center.y })
    }
}

fn check_extent(extent: f64) -> Result<(), GeometryError> {
    // Also rejects NaN.
    if extent > 0.0 && extent.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonPositiveExtent(extent))
    }
}
