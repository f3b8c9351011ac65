// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The quadtree: nodes, insertion with subdivision, range queries, and rebuild.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use tracing::{debug, trace, warn};

use crate::config::{DepthPolicy, TreeConfig};
use crate::entity::Located;
use crate::error::{ConfigError, InsertError};
use crate::types::{Region, Square};

#[derive(Clone)]
struct Node<E> {
    boundary: Square,
    depth: u32,
    kind: NodeKind<E>,
}

#[derive(Clone)]
enum NodeKind<E> {
    Leaf {
        residents: Vec<E>,
    },
    /// `frozen` holds whatever the node stored when it split and never grows.
    Internal {
        frozen: Vec<E>,
        children: Box<[Node<E>; 4]>,
    },
}

impl<E: Located> Node<E> {
    const fn leaf(boundary: Square, depth: u32) -> Self {
        Self {
            boundary,
            depth,
            kind: NodeKind::Leaf {
                residents: Vec::new(),
            },
        }
    }

    /// Place `entity`, whose position must lie inside `self.boundary`.
    fn insert(&mut self, entity: E, config: &TreeConfig) -> Result<(), InsertError<E>> {
        if let NodeKind::Leaf { residents } = &mut self.kind {
            if residents.len() < config.capacity {
                residents.push(entity);
                return Ok(());
            }
            let quadrants = if self.depth < config.max_depth {
                self.boundary.quadrants()
            } else {
                None
            };
            let Some(quadrants) = quadrants else {
                return match config.depth_policy {
                    DepthPolicy::Overflow => {
                        if residents.len() == config.capacity {
                            warn!(
                                depth = self.depth,
                                capacity = config.capacity,
                                "cell cannot subdivide; storing beyond capacity"
                            );
                        }
                        residents.push(entity);
                        Ok(())
                    }
                    DepthPolicy::Reject => Err(InsertError::DepthExceeded {
                        depth: self.depth,
                        entity,
                    }),
                };
            };
            trace!(
                depth = self.depth,
                residents = residents.len(),
                "subdividing cell"
            );
            let frozen = core::mem::take(residents);
            let depth = self.depth + 1;
            self.kind = NodeKind::Internal {
                frozen,
                children: Box::new(quadrants.map(|q| Self::leaf(q, depth))),
            };
        }

        let NodeKind::Internal { children, .. } = &mut self.kind else {
            unreachable!("full leaf was subdivided above");
        };
        let position = entity.position();
        // NW, NE, SW, SE; the quadrants share edges exactly so one matches.
        for child in children.iter_mut() {
            if child.boundary.contains_point(position) {
                return child.insert(entity, config);
            }
        }
        unreachable!("no quadrant accepted a point inside its parent cell");
    }

    fn query<'a, R: Region + ?Sized>(&'a self, range: &R, out: &mut Vec<&'a E>) {
        if !self.boundary.intersects(range) {
            return;
        }
        let (residents, children) = match &self.kind {
            NodeKind::Leaf { residents } => (residents, None),
            NodeKind::Internal { frozen, children } => (frozen, Some(children)),
        };
        out.extend(
            residents
                .iter()
                .filter(|e| range.contains_point(e.position())),
        );
        if let Some(children) = children {
            for child in children.iter() {
                child.query(range, out);
            }
        }
    }

    fn residents(&self) -> &[E] {
        match &self.kind {
            NodeKind::Leaf { residents } => residents,
            NodeKind::Internal { frozen, .. } => frozen,
        }
    }

    fn children(&self) -> Option<&[Self; 4]> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { children, .. } => Some(&**children),
        }
    }

    fn into_residents(self, out: &mut Vec<E>) {
        match self.kind {
            NodeKind::Leaf { residents } => out.extend(residents),
            NodeKind::Internal { frozen, children } => {
                out.extend(frozen);
                for child in *children {
                    child.into_residents(out);
                }
            }
        }
    }
}

/// Shape summary of a tree, see [`QuadTree::stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes, the root included.
    pub nodes: usize,
    /// Nodes without children.
    pub leaves: usize,
    /// Depth of the deepest node; the root is depth 0.
    pub max_depth: u32,
    /// Entities stored anywhere in the tree.
    pub entities: usize,
}

/// A point quadtree over a fixed square boundary.
///
/// Cells hold up to [`TreeConfig::capacity`] entities. The insertion that
/// finds a cell full splits it into four quadrants (NW, NE, SW, SE); the
/// entities already in the cell stay there and later ones go to the children.
/// Queries therefore collect matches from every visited cell, not only leaves.
///
/// Result order is deterministic for a given tree: a cell's own entities in
/// insertion order, then its children in NW, NE, SW, SE order.
#[derive(Clone)]
pub struct QuadTree<E> {
    root: Node<E>,
    config: TreeConfig,
    len: usize,
}

impl<E: Located> QuadTree<E> {
    /// Create an empty tree covering `boundary` with the given cell capacity.
    pub fn new(boundary: Square, capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(boundary, TreeConfig::new(capacity))
    }

    /// Create an empty tree covering `boundary`.
    pub fn with_config(boundary: Square, config: TreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::empty(boundary, config))
    }

    /// Build a tree from scratch, inserting `entities` in order.
    ///
    /// Entities that cannot be placed (outside `boundary`, or refused by
    /// [`DepthPolicy::Reject`]) are dropped; compare [`QuadTree::len`] with the
    /// input length to detect them.
    pub fn from_entities<I>(
        boundary: Square,
        config: TreeConfig,
        entities: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = E>,
    {
        config.validate()?;
        Ok(Self::build(boundary, config, entities))
    }

    const fn empty(boundary: Square, config: TreeConfig) -> Self {
        Self {
            root: Node::leaf(boundary, 0),
            config,
            len: 0,
        }
    }

    fn build<I>(boundary: Square, config: TreeConfig, entities: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut tree = Self::empty(boundary, config);
        let mut dropped = 0_usize;
        for entity in entities {
            if tree.try_insert(entity).is_err() {
                dropped += 1;
            }
        }
        debug!(inserted = tree.len, dropped, "built quadtree");
        tree
    }

    /// The root boundary.
    pub fn boundary(&self) -> Square {
        self.root.boundary
    }

    /// The configuration the tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Cell capacity.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no entities are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an entity. Returns `false` if it could not be placed, which
    /// under the default [`DepthPolicy::Overflow`] means its position lies
    /// outside the boundary.
    pub fn insert(&mut self, entity: E) -> bool {
        self.try_insert(entity).is_ok()
    }

    /// Insert an entity, handing it back on failure.
    pub fn try_insert(&mut self, entity: E) -> Result<(), InsertError<E>> {
        if !self.root.boundary.contains_point(entity.position()) {
            return Err(InsertError::OutOfBounds(entity));
        }
        self.root.insert(entity, &self.config)?;
        self.len += 1;
        Ok(())
    }

    /// All entities whose position lies inside `range`.
    ///
    /// Subtrees are pruned with [`Region::intersects`] and each candidate is
    /// checked with [`Region::contains_point`]. Conservative bounding boxes
    /// (circles) cost extra visits. A custom region whose containment reaches
    /// the upper edges of its box must report [`Region::closed_upper_edges`],
    /// or points on a cell's lower edge may be pruned.
    pub fn query_range<R: Region + ?Sized>(&self, range: &R) -> Vec<&E> {
        let mut out = Vec::new();
        self.root.query(range, &mut out);
        out
    }

    /// Like [`QuadTree::query_range`] but appends to `out`, reusing its allocation.
    pub fn query_range_into<'a, R: Region + ?Sized>(&'a self, range: &R, out: &mut Vec<&'a E>) {
        self.root.query(range, out);
    }

    /// Discard all contents and rebuild from `entities`, keeping the boundary
    /// and configuration. Nothing of the previous shape survives.
    pub fn update<I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = E>,
    {
        *self = Self::build(self.root.boundary, self.config, entities);
    }

    /// Remove everything, leaving a single empty leaf.
    pub fn clear(&mut self) {
        *self = Self::empty(self.root.boundary, self.config);
    }

    /// Iterate over all entities in query order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            stack: alloc::vec![&self.root],
            current: core::slice::Iter::default(),
        }
    }

    /// Take all entities out of the tree, in query order.
    pub fn into_vec(self) -> Vec<E> {
        let mut out = Vec::with_capacity(self.len);
        self.root.into_residents(&mut out);
        out
    }

    /// Count nodes, leaves, and the deepest level.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            entities: self.len,
            ..TreeStats::default()
        };
        let mut stack = alloc::vec![&self.root];
        while let Some(node) = stack.pop() {
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(node.depth);
            match node.children() {
                Some(children) => stack.extend(children.iter().rev()),
                None => stats.leaves += 1,
            }
        }
        stats
    }
}

impl<E> Debug for QuadTree<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("boundary", &self.root.boundary)
            .field("config", &self.config)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Iterator over every entity in a [`QuadTree`], see [`QuadTree::iter`].
pub struct Iter<'a, E> {
    stack: Vec<&'a Node<E>>,
    current: core::slice::Iter<'a, E>,
}

impl<'a, E: Located> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.next() {
                return Some(e);
            }
            let node = self.stack.pop()?;
            if let Some(children) = node.children() {
                self.stack.extend(children.iter().rev());
            }
            self.current = node.residents().iter();
        }
    }
}

impl<E> Debug for Iter<'_, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("pending_nodes", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<'a, E: Located> IntoIterator for &'a QuadTree<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
