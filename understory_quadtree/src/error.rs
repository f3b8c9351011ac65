// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for construction and insertion.

use core::fmt;

use thiserror::Error;

/// Invalid region geometry.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Extent (half side or radius) is zero, negative, NaN or infinite.
    #[error("extent must be positive and finite, got {0}")]
    NonPositiveExtent(f64),

    /// Extent is positive but vanishes next to the center's magnitude.
    #[error("extent {0} is too small to be represented at this center")]
    CollapsedExtent(f64),

    /// Center has a NaN or infinite coordinate.
    #[error("center must be finite, got ({x}, {y})")]
    NonFiniteCenter {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },
}

/// Invalid tree configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Node capacity must be at least one.
    #[error("node capacity must be at least 1")]
    ZeroCapacity,
}

/// Insertion failure. The rejected entity is handed back.
///
/// `Error` is implemented when `E: Debug`.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertError<E> {
    /// The entity's position lies outside the root boundary.
    OutOfBounds(E),

    /// The target cell is full, cannot subdivide further, and the tree is
    /// configured with [`DepthPolicy::Reject`](crate::DepthPolicy::Reject).
    DepthExceeded {
        /// Depth of the full cell.
        depth: u32,
        /// The entity that could not be placed.
        entity: E,
    },
}

impl<E> InsertError<E> {
    /// Recover the rejected entity.
    pub fn into_entity(self) -> E {
        match self {
            Self::OutOfBounds(entity) | Self::DepthExceeded { entity, .. } => entity,
        }
    }
}

impl<E> fmt::Display for InsertError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(_) => f.write_str("entity position is outside the tree boundary"),
            Self::DepthExceeded { depth, .. } => {
                write!(f, "cell at depth {depth} is full and cannot subdivide")
            }
        }
    }
}

impl<E: fmt::Debug> core::error::Error for InsertError<E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(
            GeometryError::NonPositiveExtent(-1.0).to_string(),
            "extent must be positive and finite, got -1"
        );
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "node capacity must be at least 1"
        );
        let err = InsertError::DepthExceeded {
            depth: 7,
            entity: (),
        };
        assert_eq!(
            err.to_string(),
            "cell at depth 7 is full and cannot subdivide"
        );
    }

    #[test]
    fn into_entity_returns_the_payload() {
        assert_eq!(InsertError::OutOfBounds(3).into_entity(), 3);
        let err = InsertError::DepthExceeded {
            depth: 1,
            entity: "x",
        };
        assert_eq!(err.into_entity(), "x");
    }
}
