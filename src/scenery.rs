//! Static scenery: a spatial hierarchy of collision nodes.
//!
//! Scenery geometry is immutable during simulation. The only thing that
//! changes is which top-level nodes participate, which lets scripts open
//! doors or drop destructible walls by toggling their registration.

use glam::Vec3;
use hashbrown::HashMap;
use log::debug;
use thiserror::Error;

use crate::geometry::{Aabb, Triangle};
use crate::trace::Trace;

/// Failure raised when toggling scenery by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneryError {
    /// No collision node is registered under this name.
    #[error("no collision node named `{0}` is registered")]
    UnknownNode(String),
}

/// A node of the static scenery hierarchy.
///
/// Children are expected to partition their parent's space: a segment fully
/// contained by one child is resolved by that child alone.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionNode {
    name: String,
    bounds: Aabb,
    triangles: Vec<Triangle>,
    children: Vec<CollisionNode>,
    in_game: bool,
}

impl CollisionNode {
    /// Builds a leaf node from its triangles.
    #[must_use]
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        let corners: Vec<Vec3> = triangles.iter().flat_map(|t| [t.a, t.b, t.c]).collect();
        let bounds = Aabb::enclosing(&corners).unwrap_or(Aabb::new(Vec3::ZERO, Vec3::ZERO));
        Self {
            name: name.into(),
            bounds,
            triangles,
            children: Vec::new(),
            in_game: false,
        }
    }

    /// Attaches child nodes, growing the bounds to enclose them.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        for child in children {
            self.bounds = if self.triangles.is_empty() && self.children.is_empty() {
                child.bounds
            } else {
                self.bounds.union(&child.bounds)
            };
            self.children.push(child);
        }
        self
    }

    /// Unique node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounds covering the node's triangles and children.
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Whether the node currently takes part in queries.
    #[must_use]
    pub const fn is_in_game(&self) -> bool {
        self.in_game
    }

    /// Marks the node as taking part in queries or not.
    pub const fn set_in_game(&mut self, in_game: bool) {
        self.in_game = in_game;
    }

    /// Child nodes partitioning this node's space.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Whether the node's bounds contain the whole swept segment.
    #[must_use]
    pub fn is_in(&self, trace: &Trace) -> bool {
        self.bounds
            .contains(&Aabb::of_segment(trace.start, trace.segment, trace.extent))
    }

    /// Tests the node's own triangles, then descends into the containing
    /// child, or into every overlapping child when none contains the segment.
    pub fn collide_recursive(&self, trace: &mut Trace) -> bool {
        let mut impact = collide_triangles(&self.triangles, trace);
        let swept = Aabb::of_segment(trace.start, trace.segment, trace.extent);
        if let Some(child) = self.children.iter().find(|c| c.bounds.contains(&swept)) {
            impact |= child.collide_recursive(trace);
        } else {
            for child in self.children.iter().filter(|c| c.bounds.overlaps(&swept)) {
                impact |= child.collide_recursive(trace);
            }
        }
        impact
    }

    /// Tests every triangle of the subtree without any bounds pruning.
    pub fn collide_simple(&self, trace: &mut Trace) -> bool {
        let mut impact = false;
        let mut pending: Vec<&Self> = vec![self];
        while let Some(node) = pending.pop() {
            impact |= collide_triangles(&node.triangles, trace);
            pending.extend(node.children.iter());
        }
        impact
    }

    /// Whether the segment `from → to` crosses any geometry of the subtree.
    #[must_use]
    pub fn intersect(&self, from: Vec3, to: Vec3) -> bool {
        let mut trace = Trace::ray(from, to - from);
        self.collide_recursive(&mut trace)
    }
}

fn collide_triangles(triangles: &[Triangle], trace: &mut Trace) -> bool {
    let mut impact = false;
    for triangle in triangles {
        if let Some((fraction, normal)) = triangle.sweep(trace.start, trace.segment, trace.extent)
        {
            impact |= trace.offer(fraction, normal);
        }
    }
    impact
}

/// Registry of known collision nodes and the ordered set of active ones.
#[derive(Debug, Clone, Default)]
pub struct Scenery {
    nodes: Vec<CollisionNode>,
    by_name: HashMap<String, usize>,
    active: Vec<usize>,
}

impl Scenery {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node and activates it.
    ///
    /// A node whose name is already known is not stored twice; the known node
    /// is re-activated instead. Returns whether the node was newly stored.
    pub fn add(&mut self, mut node: CollisionNode) -> bool {
        if let Some(&index) = self.by_name.get(node.name()) {
            self.activate(index);
            return false;
        }
        let index = self.nodes.len();
        node.set_in_game(false);
        self.by_name.insert(node.name().to_owned(), index);
        self.nodes.push(node);
        self.activate(index);
        true
    }

    /// Re-activates a known node.
    ///
    /// # Errors
    /// Returns [`SceneryError::UnknownNode`] when no node has this name.
    pub fn enable(&mut self, name: &str) -> Result<(), SceneryError> {
        let index = self.lookup(name)?;
        self.activate(index);
        Ok(())
    }

    /// Withdraws a node from collision queries; it stays known.
    ///
    /// # Errors
    /// Returns [`SceneryError::UnknownNode`] when no node has this name.
    pub fn disable(&mut self, name: &str) -> Result<(), SceneryError> {
        let index = self.lookup(name)?;
        if let Some(position) = self.active.iter().position(|&i| i == index) {
            self.active.remove(position);
            if let Some(node) = self.nodes.get_mut(index) {
                node.set_in_game(false);
            }
            debug!("collision node `{name}` withdrawn");
        }
        Ok(())
    }

    /// Forgets a node entirely. Returns it when it was known.
    pub fn remove(&mut self, name: &str) -> Option<CollisionNode> {
        let index = self.by_name.remove(name)?;
        if index >= self.nodes.len() {
            return None;
        }
        let mut node = self.nodes.remove(index);
        node.set_in_game(false);
        self.active.retain(|&i| i != index);
        for i in self.active.iter_mut().chain(self.by_name.values_mut()) {
            if *i > index {
                *i -= 1;
            }
        }
        debug!("collision node `{name}` removed");
        Some(node)
    }

    /// Known node named `name`, active or not.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&CollisionNode> {
        self.by_name.get(name).and_then(|&i| self.nodes.get(i))
    }

    /// Active nodes in registration order.
    pub fn active(&self) -> impl Iterator<Item = &CollisionNode> {
        self.active.iter().filter_map(|&i| self.nodes.get(i))
    }

    /// Number of active nodes.
    #[must_use]
    pub const fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Static-geometry trace.
    ///
    /// Resolves the segment inside the first active node that contains it.
    /// When no node contains it, every active node is tested flat.
    pub fn trace(&self, trace: &mut Trace) -> bool {
        if let Some(node) = self.active().find(|node| node.is_in(trace)) {
            return node.collide_recursive(trace);
        }
        let mut impact = false;
        for node in self.active() {
            impact |= node.collide_simple(trace);
        }
        impact
    }

    /// Line-of-sight test against active scenery only.
    #[must_use]
    pub fn intersect(&self, from: Vec3, to: Vec3) -> bool {
        self.active().any(|node| node.intersect(from, to))
    }

    /// Forgets every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_name.clear();
        self.active.clear();
    }

    fn lookup(&self, name: &str) -> Result<usize, SceneryError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SceneryError::UnknownNode(name.to_owned()))
    }

    fn activate(&mut self, index: usize) {
        if self.active.contains(&index) {
            return;
        }
        self.active.push(index);
        if let Some(node) = self.nodes.get_mut(index) {
            node.set_in_game(true);
            debug!("collision node `{}` registered", node.name());
        }
    }
}
