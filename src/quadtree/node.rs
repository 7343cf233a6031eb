use crate::models::Vector;

/// Index of a node inside a [`NodePool`](crate::quadtree::NodePool).
///
/// Child slots store `NodeIndex::NONE` when the quadrant is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// One cell of the tree.
///
/// A node is a leaf when it holds a body and internal otherwise. Leaves carry the mass and
/// mass-weighted position of their body; internal nodes carry the sums over every descendant.
/// The bounding box is always a hypercube.
#[derive(Debug, Clone)]
pub struct QuadTreeNode<const D: usize> {
    pub(crate) children: Vec<NodeIndex>,
    pub(crate) body: Option<usize>,
    pub(crate) mass: f64,
    pub(crate) mass_sum: Vector<D>,
    pub(crate) min_bounds: Vector<D>,
    pub(crate) max_bounds: Vector<D>,
}

impl<const D: usize> Default for QuadTreeNode<D> {
    fn default() -> Self {
        Self {
            children: vec![NodeIndex::NONE; Self::CHILD_COUNT],
            body: None,
            mass: 0.0,
            mass_sum: Vector::zero(),
            min_bounds: Vector::zero(),
            max_bounds: Vector::zero(),
        }
    }
}

impl<const D: usize> QuadTreeNode<D> {
    /// Number of child slots: one per orthant.
    pub const CHILD_COUNT: usize = 1 << D;

    /// Clears the node for reuse. The child slot storage is kept.
    pub fn reset(&mut self) {
        self.children.clear();
        self.children.resize(Self::CHILD_COUNT, NodeIndex::NONE);
        self.body = None;
        self.mass = 0.0;
        self.mass_sum.reset();
        self.min_bounds.reset();
        self.max_bounds.reset();
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.body.is_some()
    }

    /// Index of the body held by a leaf.
    #[inline]
    pub fn body(&self) -> Option<usize> {
        self.body
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Mass-weighted sum of positions below this node.
    #[inline]
    pub fn mass_sum(&self) -> Vector<D> {
        self.mass_sum
    }

    /// `mass_sum / mass`, or `None` for a node with no mass.
    pub fn center_of_mass(&self) -> Option<Vector<D>> {
        if self.mass == 0.0 {
            return None;
        }
        Some(self.mass_sum * (1.0 / self.mass))
    }

    #[inline]
    pub fn min_bounds(&self) -> Vector<D> {
        self.min_bounds
    }

    #[inline]
    pub fn max_bounds(&self) -> Vector<D> {
        self.max_bounds
    }

    /// Side length of the node's box. Boxes are hypercubes, so any axis will do.
    #[inline]
    pub fn width(&self) -> f64 {
        if D == 0 {
            return 0.0;
        }
        self.max_bounds[0] - self.min_bounds[0]
    }

    /// Child slot `quadrant`, `None` when empty.
    pub fn child(&self, quadrant: usize) -> Option<NodeIndex> {
        self.children.get(quadrant).copied().filter(|c| c.is_some())
    }

    /// Present children in slot order.
    pub fn children(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.children.iter().copied().filter(|c| c.is_some())
    }

    pub fn has_children(&self) -> bool {
        self.children.iter().any(|c| c.is_some())
    }

    pub(crate) fn set_bounds(&mut self, min: Vector<D>, max: Vector<D>) {
        self.min_bounds = min;
        self.max_bounds = max;
    }

    /// Turns the node into a leaf holding `body`.
    pub(crate) fn set_body(&mut self, body: usize, position: &Vector<D>, mass: f64) {
        self.body = Some(body);
        self.mass = mass;
        self.mass_sum = *position * mass;
    }

    /// Turns a leaf into an empty internal node, handing back the body it held.
    pub(crate) fn take_body(&mut self) -> Option<usize> {
        let body = self.body.take()?;
        self.mass = 0.0;
        self.mass_sum.reset();
        Some(body)
    }
}
