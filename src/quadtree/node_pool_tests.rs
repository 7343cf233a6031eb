use crate::models::Vector3;
use crate::quadtree::{NodeIndex, NodePool, QuadTreeNode};
use crate::utils::QuadTreeError;

#[test]
fn test_get_allocates_until_reset() {
    let mut pool: NodePool<3> = NodePool::new();
    assert!(pool.is_empty());

    let a = pool.get();
    let b = pool.get();
    assert_ne!(a, b);
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.capacity(), 2);
}

#[test]
fn test_reset_recycles_without_freeing() {
    let mut pool: NodePool<2> = NodePool::new();
    for _ in 0..5 {
        pool.get();
    }
    pool.reset();
    assert_eq!(pool.len(), 0);
    assert_eq!(pool.capacity(), 5);

    for _ in 0..3 {
        pool.get();
    }
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.capacity(), 5, "recycled nodes should not grow the pool");
}

#[test]
fn test_recycled_node_is_cleared() {
    let mut pool: NodePool<3> = NodePool::new();
    let index = pool.get();
    {
        let node = pool.node_mut(index);
        node.set_bounds(Vector3::splat(-1.0), Vector3::splat(1.0));
        node.set_body(4, &Vector3::splat(0.5), 2.0);
        node.children[3] = NodeIndex(9);
    }

    pool.reset();
    let reused = pool.get();
    assert_eq!(reused, index);

    let node = pool.node(reused);
    assert!(!node.is_leaf());
    assert_eq!(node.mass(), 0.0);
    assert!(node.mass_sum().is_zero());
    assert!(node.min_bounds().is_zero());
    assert!(!node.has_children());
    assert_eq!(node.children.len(), QuadTreeNode::<3>::CHILD_COUNT);
}

#[test]
fn test_stale_handle_is_rejected() {
    let mut pool: NodePool<2> = NodePool::new();
    let index = pool.get();
    let id = pool.id(index);
    assert!(pool.resolve(id).is_ok());

    pool.reset();
    pool.get();
    match pool.resolve(id) {
        Err(QuadTreeError::StaleNode { handle_epoch, pool_epoch }) => {
            assert_eq!(handle_epoch + 1, pool_epoch);
        }
        other => panic!("Expected a stale node error, got {:?}", other),
    }
}

#[test]
fn test_resolve_outside_active_range() {
    let mut pool: NodePool<2> = NodePool::new();
    pool.get();
    pool.get();
    pool.reset();
    pool.get();

    let beyond = pool.id(NodeIndex(1));
    assert_eq!(pool.resolve(beyond).unwrap_err(), QuadTreeError::InvalidNode(1));
    assert!(pool.resolve(pool.id(NodeIndex::NONE)).is_err());
}
