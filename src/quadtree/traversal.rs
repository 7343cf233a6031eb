use crate::quadtree::{NodeIndex, NodePool, QuadTreeNode};

/// Depth-first, pre-order walk starting at `start`.
///
/// `visitor` sees each node before its children and returns whether to descend into them.
/// Children are visited in slot order; empty slots are skipped.
pub fn traverse<const D: usize, F>(pool: &NodePool<D>, start: NodeIndex, visitor: &mut F)
where
    F: FnMut(NodeIndex, &QuadTreeNode<D>) -> bool,
{
    if start.is_none() {
        return;
    }
    let node = pool.node(start);
    if visitor(start, node) {
        for child in node.children() {
            traverse(pool, child, visitor);
        }
    }
}

/// Like [`traverse`], but also passes the depth of each node (the start node is at depth 0).
pub fn traverse_with_depth<const D: usize, F>(
    pool: &NodePool<D>,
    start: NodeIndex,
    depth: usize,
    visitor: &mut F,
) where
    F: FnMut(NodeIndex, &QuadTreeNode<D>, usize) -> bool,
{
    if start.is_none() {
        return;
    }
    let node = pool.node(start);
    if visitor(start, node, depth) {
        for child in node.children() {
            traverse_with_depth(pool, child, depth + 1, visitor);
        }
    }
}
