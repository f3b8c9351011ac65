// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subdivision parameters.

use crate::error::ConfigError;

/// What a full cell does when it may not subdivide any further.
///
/// A cell stops subdividing when it sits at [`TreeConfig::max_depth`] or when
/// its extent can no longer be halved in `f64`. Without such a floor, many
/// coincident points would split forever.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DepthPolicy {
    /// Keep the entity in the bottom cell, exceeding its capacity.
    #[default]
    Overflow,
    /// Refuse the entity with [`InsertError::DepthExceeded`](crate::InsertError::DepthExceeded).
    Reject,
}

/// Per-tree configuration, fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreeConfig {
    /// Residents a cell holds before the next insertion splits it.
    pub capacity: usize,
    /// Deepest level a cell may be created at. The root is depth 0.
    pub max_depth: u32,
    /// Behavior for full cells that cannot split.
    pub depth_policy: DepthPolicy,
}

impl TreeConfig {
    /// Default cell capacity.
    pub const DEFAULT_CAPACITY: usize = 8;

    /// Default depth limit.
    ///
    /// At depth 32 a cell spans 2^-32 of the root's side, well past what
    /// typical inputs need and far from exhausting the stack.
    pub const DEFAULT_MAX_DEPTH: u32 = 32;

    /// Configuration with the given capacity and default depth handling.
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            depth_policy: DepthPolicy::Overflow,
        }
    }

    /// Replace the depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the depth policy.
    #[must_use]
    pub const fn with_depth_policy(mut self, depth_policy: DepthPolicy) -> Self {
        self.depth_policy = depth_policy;
        self
    }

    /// Check the configuration; capacity must be nonzero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
