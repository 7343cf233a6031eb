use crate::quadtree::{NodeIndex, QuadTreeNode};
use crate::utils::QuadTreeError;

/// Handle to a node that stays checkable across rebuilds.
///
/// The epoch is the pool generation the node was handed out in. Once the pool is reset the
/// handle no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub index: NodeIndex,
    pub epoch: u64,
}

/// Arena of tree nodes, recycled between builds.
///
/// `reset` rewinds the active count without freeing anything; `get` hands out the next node,
/// allocating only when every node is already in use. Nodes are always cleared before reuse.
///
/// # Examples
///
/// ```
/// use rs_quadtree::quadtree::NodePool;
///
/// let mut pool: NodePool<2> = NodePool::new();
/// let first = pool.get();
/// pool.get();
/// assert_eq!(pool.len(), 2);
///
/// pool.reset();
/// assert_eq!(pool.len(), 0);
/// assert_eq!(pool.capacity(), 2);
/// assert_eq!(pool.get(), first);
/// assert_eq!(pool.capacity(), 2);
/// ```
#[derive(Debug, Default)]
pub struct NodePool<const D: usize> {
    nodes: Vec<QuadTreeNode<D>>,
    active: usize,
    epoch: u64,
}

impl<const D: usize> NodePool<D> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            active: 0,
            epoch: 0,
        }
    }

    /// Makes every node available again and starts a new epoch.
    pub fn reset(&mut self) {
        self.active = 0;
        self.epoch += 1;
    }

    /// Hands out a cleared node.
    pub fn get(&mut self) -> NodeIndex {
        let index = self.active;
        if index < self.nodes.len() {
            self.nodes[index].reset();
        } else {
            self.nodes.push(QuadTreeNode::default());
        }
        self.active += 1;
        NodeIndex(index as u32)
    }

    /// Number of nodes handed out since the last reset.
    pub fn len(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Number of nodes ever allocated.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Wraps `index` in a handle for the current epoch.
    pub fn id(&self, index: NodeIndex) -> NodeId {
        NodeId { index, epoch: self.epoch }
    }

    /// Looks up a handle, rejecting handles from earlier epochs.
    pub fn resolve(&self, id: NodeId) -> Result<&QuadTreeNode<D>, QuadTreeError> {
        if id.epoch != self.epoch {
            return Err(QuadTreeError::StaleNode {
                handle_epoch: id.epoch,
                pool_epoch: self.epoch,
            });
        }
        if id.index.is_none() || id.index.as_usize() >= self.active {
            return Err(QuadTreeError::InvalidNode(id.index.as_usize()));
        }
        Ok(&self.nodes[id.index.as_usize()])
    }

    /// Unchecked-by-epoch access used inside a single build or query.
    #[inline]
    pub(crate) fn node(&self, index: NodeIndex) -> &QuadTreeNode<D> {
        &self.nodes[index.as_usize()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut QuadTreeNode<D> {
        &mut self.nodes[index.as_usize()]
    }
}
