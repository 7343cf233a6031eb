//! Barnes-Hut tree for the repulsion step of a force-directed layout.
//!
//! The tree is rebuilt from scratch every simulation step. Space is split into `2^D` orthants
//! per level (a quad tree in 2D, an octree in 3D) and every internal node keeps the total mass
//! and mass-weighted position of the bodies below it. A force query then walks the tree and
//! treats any node whose width-to-distance ratio is below `theta` as a single body at its
//! center of mass.
//!
//! # Example
//!
//! ```
//! use rs_quadtree::models::{Body3, Vector3};
//! use rs_quadtree::quadtree::Octree;
//!
//! let mut bodies = vec![
//!     Body3::new(Vector3::new([1.0, 0.0, 0.0])),
//!     Body3::new(Vector3::new([2.0, 0.0, 0.0])),
//! ];
//!
//! let mut tree = Octree::new();
//! tree.insert_bodies(&mut bodies).expect("bodies are apart");
//! tree.update_body_force(&mut bodies, 0).unwrap();
//! tree.update_body_force(&mut bodies, 1).unwrap();
//!
//! // Negative gravity pushes the bodies apart along x only.
//! assert!(bodies[0].force[0] < 0.0);
//! assert_eq!(bodies[0].force[0] + bodies[1].force[0], 0.0);
//! assert_eq!(bodies[0].force[1], 0.0);
//! ```
use log::{debug, error, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::models::{Body, Vector};
use crate::quadtree::{traverse, traverse_with_depth, NodeId, NodeIndex, NodePool, QuadTreeNode};
use crate::utils::{
    seeded_random, DefaultRandom, QuadTreeError, QuadTreeSettings, RandomSource,
    DEGENERATE_EXTENT_PER_BODY, MIN_DISTANCE, SAME_POSITION_EPSILON,
};

/// Result of placing one body, passed back up the insertion recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertOutcome {
    Inserted,
    /// Two bodies stayed on the same spot after every perturbation; the build must restart.
    Degenerate,
}

/// Axis-aligned box of one node, with its depth below the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBounds<const D: usize> {
    pub min: Vector<D>,
    pub max: Vector<D>,
    pub depth: usize,
}

/// Summary of the current tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats<const D: usize> {
    pub node_count: usize,
    pub leaf_count: usize,
    /// Bodies handed to the last `insert_bodies`. Larger than `leaf_count` after a failed build.
    pub body_count: usize,
    pub total_mass: f64,
    pub center_of_mass: Option<Vector<D>>,
    /// Builds run by the last `insert_bodies`, including the successful one.
    pub build_attempts: usize,
    pub pool_capacity: usize,
}

/// Barnes-Hut tree over `D`-dimensional bodies.
///
/// `R` is the random source used to pull apart bodies that share a position. It is seeded once
/// at construction and never reseeded, so the same inputs in the same order always give the
/// same tree and the same forces.
pub struct QuadTree<const D: usize, R = DefaultRandom> {
    settings: QuadTreeSettings,
    random: R,
    pool: NodePool<D>,
    root: NodeIndex,
    body_count: usize,
    build_attempts: usize,
}

pub type QuadTree2 = QuadTree<2>;
pub type Octree = QuadTree<3>;

impl<const D: usize> QuadTree<D, DefaultRandom> {
    /// Creates a tree with the default settings (gravity -1.2, theta 1.2, seed 1984).
    pub fn new() -> Self {
        let settings = QuadTreeSettings::default();
        Self::from_parts(settings, seeded_random(settings.seed))
    }

    /// Creates a tree whose random source is seeded from `settings.seed`.
    pub fn with_settings(settings: QuadTreeSettings) -> Result<Self, QuadTreeError> {
        Self::with_random(settings, seeded_random(settings.seed))
    }
}

impl<const D: usize> Default for QuadTree<D, DefaultRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize, R: RandomSource> QuadTree<D, R> {
    /// Creates a tree that draws tie-break offsets from `random`. `settings.seed` is ignored.
    pub fn with_random(settings: QuadTreeSettings, random: R) -> Result<Self, QuadTreeError> {
        settings.validate()?;
        Ok(Self::from_parts(settings, random))
    }

    fn from_parts(settings: QuadTreeSettings, random: R) -> Self {
        Self {
            settings,
            random,
            pool: NodePool::new(),
            root: NodeIndex::NONE,
            body_count: 0,
            build_attempts: 0,
        }
    }

    pub fn settings(&self) -> &QuadTreeSettings {
        &self.settings
    }

    pub fn gravity(&self) -> f64 {
        self.settings.gravity
    }

    pub fn theta(&self) -> f64 {
        self.settings.theta
    }

    pub fn pool(&self) -> &NodePool<D> {
        &self.pool
    }

    /// Rebuilds the tree from `bodies`.
    ///
    /// `bodies[0]` seeds the root and the rest are inserted in order. Bodies are referred to by
    /// their index in this slice, so force queries must use the same slice.
    ///
    /// When two bodies share a position (within `1e-8` per axis), the one inserted first is moved
    /// to a random point inside the node they collide in. This is the only place the tree writes
    /// to a position, and it means insertion order decides where coincident bodies end up.
    ///
    /// If a pair still cannot be separated, the whole build starts over, up to
    /// `max_build_attempts` times. When every attempt fails the tree is left as far as the last
    /// attempt got and [`QuadTreeError::DegeneratePlacement`] is returned; force queries on that
    /// tree still work but miss the bodies that were never placed.
    pub fn insert_bodies(&mut self, bodies: &mut [Body<D>]) -> Result<(), QuadTreeError> {
        let attempts = self.settings.max_build_attempts;
        self.body_count = bodies.len();
        for attempt in 1..=attempts {
            self.build_attempts = attempt;
            match self.build(bodies) {
                InsertOutcome::Inserted => {
                    debug!(
                        "Built tree over {} bodies with {} nodes (attempt {}/{})",
                        bodies.len(),
                        self.pool.len(),
                        attempt,
                        attempts
                    );
                    return Ok(());
                }
                InsertOutcome::Degenerate => {
                    warn!(
                        "Build attempt {}/{} ran out of tree precision, retrying",
                        attempt, attempts
                    );
                }
            }
        }
        error!("Could not insert bodies: not enough tree precision after {} attempts", attempts);
        Err(QuadTreeError::DegeneratePlacement { attempts })
    }

    fn build(&mut self, bodies: &mut [Body<D>]) -> InsertOutcome {
        self.pool.reset();
        self.root = self.create_root_node(bodies);

        let Some(first) = bodies.first() else {
            return InsertOutcome::Inserted;
        };
        let (position, mass) = (first.position, first.mass);
        self.pool.node_mut(self.root).set_body(0, &position, mass);

        for index in 1..bodies.len() {
            if self.insert(bodies, index, self.root) == InsertOutcome::Degenerate {
                return InsertOutcome::Degenerate;
            }
        }
        InsertOutcome::Inserted
    }

    /// Takes a node from the pool and gives it a hypercube enclosing every body.
    fn create_root_node(&mut self, bodies: &[Body<D>]) -> NodeIndex {
        let root = self.pool.get();
        if bodies.is_empty() {
            return root;
        }

        let mut min = Vector::splat(f64::INFINITY);
        let mut max = Vector::splat(f64::NEG_INFINITY);
        for body in bodies {
            for axis in 0..D {
                let v = body.position[axis];
                if v < min[axis] {
                    min[axis] = v;
                }
                if v > max[axis] {
                    max[axis] = v;
                }
            }
        }

        // Squarify: every axis gets the widest extent.
        let mut max_side = 0.0;
        for axis in 0..D {
            let side = max[axis] - min[axis];
            if side > max_side {
                max_side = side;
            }
        }

        if max_side == 0.0 {
            // Every body is on the same spot. Grow a box around it.
            max_side = bodies.len() as f64 * DEGENERATE_EXTENT_PER_BODY;
            for axis in 0..D {
                min[axis] -= max_side;
                max[axis] += max_side;
            }
        } else {
            for axis in 0..D {
                max[axis] = min[axis] + max_side;
            }
        }

        self.pool.node_mut(root).set_bounds(min, max);
        root
    }

    fn insert(&mut self, bodies: &mut [Body<D>], body: usize, node: NodeIndex) -> InsertOutcome {
        if let Some(old_body) = self.pool.node_mut(node).take_body() {
            // The leaf becomes internal and both bodies go one level down.
            if bodies[old_body].position.same_as(&bodies[body].position)
                && !self.separate(bodies, old_body, body, node)
            {
                return InsertOutcome::Degenerate;
            }
            if self.insert(bodies, old_body, node) == InsertOutcome::Degenerate {
                return InsertOutcome::Degenerate;
            }
            return self.insert(bodies, body, node);
        }

        let position = bodies[body].position;
        let mass = bodies[body].mass;

        let (quadrant, child_min, child_max) = {
            let internal = self.pool.node_mut(node);
            internal.mass += mass;
            internal.mass_sum.add_scaled(&position, mass);
            let (quadrant, child_min, child_max) =
                quadrant_of(&position, &internal.min_bounds, &internal.max_bounds);
            if !narrows(&internal.min_bounds, &internal.max_bounds, &child_min, &child_max) {
                // Out of float precision: halving no longer narrows the box.
                trace!("Box at {:?} can no longer be split for body {}", internal.min_bounds, body);
                return InsertOutcome::Degenerate;
            }
            (quadrant, child_min, child_max)
        };

        match self.pool.node(node).child(quadrant) {
            Some(child) => self.insert(bodies, body, child),
            None => {
                let child = self.pool.get();
                let leaf = self.pool.node_mut(child);
                leaf.set_bounds(child_min, child_max);
                leaf.set_body(body, &position, mass);
                self.pool.node_mut(node).children[quadrant] = child;
                InsertOutcome::Inserted
            }
        }
    }

    /// Moves `old_body` to a random point of `node`'s box until it no longer shares a position
    /// with `body`. Returns false when every retry failed.
    fn separate(&mut self, bodies: &mut [Body<D>], old_body: usize, body: usize, node: NodeIndex) -> bool {
        let (min, max) = {
            let n = self.pool.node(node);
            (n.min_bounds, n.max_bounds)
        };
        let diagonal = max - min;

        for retry in 0..self.settings.max_perturbation_retries {
            let offset = self.random.next_double();
            bodies[old_body].position = min + diagonal * offset;
            if !bodies[old_body].position.same_as(&bodies[body].position) {
                trace!("Moved body {} away from body {} after {} retries", old_body, body, retry + 1);
                return true;
            }
        }
        false
    }

    /// Adds the approximate net force of every other body onto `bodies[source].force`.
    ///
    /// The force is only ever added, so reset it first for a per-step total.
    pub fn update_body_force(&self, bodies: &mut [Body<D>], source: usize) -> Result<(), QuadTreeError> {
        let force = self.force_on(bodies, source)?;
        bodies[source].force += force;
        Ok(())
    }

    /// The force `update_body_force` would add, without touching the bodies.
    pub fn force_on(&self, bodies: &[Body<D>], source: usize) -> Result<Vector<D>, QuadTreeError> {
        if source >= bodies.len() {
            return Err(QuadTreeError::UnknownBody(source));
        }
        Ok(self.query().force_on(bodies, source))
    }

    /// Runs `update_body_force` for every body, in order.
    pub fn accumulate_forces(&self, bodies: &mut [Body<D>]) {
        let query = self.query();
        for source in 0..bodies.len() {
            let force = query.force_on(bodies, source);
            bodies[source].force += force;
        }
    }

    /// Parallel version of [`accumulate_forces`](Self::accumulate_forces).
    ///
    /// Forces are computed on the rayon pool against the read-only tree and added afterwards,
    /// so the result is identical to the sequential version.
    #[cfg(feature = "parallel")]
    pub fn par_accumulate_forces(&self, bodies: &mut [Body<D>]) {
        let query = self.query();
        let snapshot: &[Body<D>] = bodies;
        let forces: Vec<Vector<D>> = (0..snapshot.len())
            .into_par_iter()
            .map(|source| query.force_on(snapshot, source))
            .collect();
        for (body, force) in bodies.iter_mut().zip(forces) {
            body.force += force;
        }
    }

    fn query(&self) -> ForceQuery<'_, D> {
        ForceQuery {
            pool: &self.pool,
            root: self.root,
            gravity: self.settings.gravity,
            theta: self.settings.theta,
        }
    }

    /// Handle to the root node, `None` before the first build.
    ///
    /// The handle is only valid until the next `insert_bodies`.
    pub fn root(&self) -> Option<NodeId> {
        if self.root.is_none() {
            return None;
        }
        Some(self.pool.id(self.root))
    }

    pub fn root_node(&self) -> Option<&QuadTreeNode<D>> {
        if self.root.is_none() {
            return None;
        }
        Some(self.pool.node(self.root))
    }

    pub fn node(&self, id: NodeId) -> Result<&QuadTreeNode<D>, QuadTreeError> {
        self.pool.resolve(id)
    }

    /// Handles to the present children of `id`, in slot order.
    pub fn children(&self, id: NodeId) -> Result<impl Iterator<Item = NodeId> + '_, QuadTreeError> {
        let node = self.pool.resolve(id)?;
        Ok(node.children().map(move |child| self.pool.id(child)))
    }

    /// Pre-order walk from the root; `visitor` gets each node and its depth and returns whether
    /// to descend.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(&QuadTreeNode<D>, usize) -> bool,
    {
        traverse_with_depth(&self.pool, self.root, 0, &mut |_, node, depth| visitor(node, depth));
    }

    /// Boxes of every node down to `max_depth` (all of them for `None`), in pre-order.
    pub fn collect_bounds(&self, max_depth: Option<usize>) -> Vec<NodeBounds<D>> {
        let mut bounds = Vec::with_capacity(self.pool.len());
        self.visit(|node, depth| {
            if max_depth.is_some_and(|max_depth| depth > max_depth) {
                return false;
            }
            bounds.push(NodeBounds {
                min: node.min_bounds(),
                max: node.max_bounds(),
                depth,
            });
            true
        });
        bounds
    }

    pub fn stats(&self) -> TreeStats<D> {
        let mut leaf_count = 0;
        traverse(&self.pool, self.root, &mut |_, node| {
            if node.is_leaf() {
                leaf_count += 1;
            }
            true
        });
        let root = self.root_node();
        TreeStats {
            node_count: self.pool.len(),
            leaf_count,
            body_count: self.body_count,
            total_mass: root.map_or(0.0, |r| r.mass()),
            center_of_mass: root.and_then(|r| r.center_of_mass()),
            build_attempts: self.build_attempts,
            pool_capacity: self.pool.capacity(),
        }
    }
}

/// Which child of the box `[min, max]` holds `position`, and that child's box.
///
/// Bit `axis` of the index is set when the position is past the median on that axis. The upper
/// half is mirrored around the median so the child stays a hypercube.
fn quadrant_of<const D: usize>(
    position: &Vector<D>,
    min: &Vector<D>,
    max: &Vector<D>,
) -> (usize, Vector<D>, Vector<D>) {
    let mut quadrant = 0;
    let mut child_min = *min;
    let mut child_max = Vector::median(min, max);

    for axis in 0..D {
        if position[axis] > child_max[axis] {
            quadrant |= 1 << axis;
            let old_min = child_min[axis];
            child_min[axis] = child_max[axis];
            child_max[axis] += child_max[axis] - old_min;
        }
    }
    (quadrant, child_min, child_max)
}

/// Whether the child box is narrower than its parent on some axis still wide enough to tell two
/// positions apart.
fn narrows<const D: usize>(min: &Vector<D>, max: &Vector<D>, child_min: &Vector<D>, child_max: &Vector<D>) -> bool {
    (0..D).any(|axis| {
        let width = max[axis] - min[axis];
        width >= SAME_POSITION_EPSILON && child_max[axis] - child_min[axis] < width
    })
}

/// Read-only view used by the force queries, so they can run without the random source.
#[derive(Clone, Copy)]
struct ForceQuery<'a, const D: usize> {
    pool: &'a NodePool<D>,
    root: NodeIndex,
    gravity: f64,
    theta: f64,
}

impl<const D: usize> ForceQuery<'_, D> {
    fn force_on(&self, bodies: &[Body<D>], source: usize) -> Vector<D> {
        let source_body = &bodies[source];
        let mut force = Vector::zero();

        traverse(self.pool, self.root, &mut |_, node| {
            if let Some(index) = node.body() {
                if index == source {
                    return false;
                }
                // A slice other than the one the tree was built from has nothing here.
                let Some(other) = bodies.get(index) else {
                    return false;
                };
                let dt = other.position - source_body.position;
                let v = self.gravity * other.mass * source_body.mass / cube(distance(&dt));
                force.add_scaled(&dt, v);
                return false;
            }

            let Some(center_of_mass) = node.center_of_mass() else {
                return false;
            };
            let dt = center_of_mass - source_body.position;
            let r = distance(&dt);

            // Boxes are hypercubes, so the width on any axis is the region size.
            if node.width() / r < self.theta {
                let v = self.gravity * node.mass() * source_body.mass / cube(r);
                force.add_scaled(&dt, v);
                return false;
            }
            true
        });

        force
    }
}

#[inline]
fn distance<const D: usize>(dt: &Vector<D>) -> f64 {
    let r = dt.length();
    if r == 0.0 {
        MIN_DISTANCE
    } else {
        r
    }
}

#[inline]
fn cube(r: f64) -> f64 {
    r * r * r
}
