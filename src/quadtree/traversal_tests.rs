use crate::models::{Body2, Vector2};
use crate::quadtree::{traverse, traverse_with_depth, NodeIndex, NodePool, QuadTree2};

fn corner_bodies() -> Vec<Body2> {
    vec![
        Body2::new(Vector2::new([0.0, 0.0])),
        Body2::new(Vector2::new([4.0, 0.0])),
        Body2::new(Vector2::new([0.0, 4.0])),
        Body2::new(Vector2::new([4.0, 4.0])),
    ]
}

#[test]
fn test_traverse_visits_every_node_in_pre_order() {
    let mut bodies = corner_bodies();
    let mut tree = QuadTree2::new();
    tree.insert_bodies(&mut bodies).unwrap();

    let mut visited = Vec::new();
    traverse(tree.pool(), NodeIndex(0), &mut |index, _| {
        visited.push(index);
        true
    });

    // Root first, then one leaf per corner in slot order.
    assert_eq!(visited.len(), 5);
    assert_eq!(visited[0], NodeIndex(0));

    let mut leaf_bodies = Vec::new();
    traverse(tree.pool(), NodeIndex(0), &mut |_, node| {
        if let Some(body) = node.body() {
            leaf_bodies.push(body);
        }
        true
    });
    assert_eq!(leaf_bodies, vec![0, 1, 2, 3]);
}

#[test]
fn test_traverse_stops_when_visitor_declines() {
    let mut bodies = corner_bodies();
    let mut tree = QuadTree2::new();
    tree.insert_bodies(&mut bodies).unwrap();

    let mut count = 0;
    traverse(tree.pool(), NodeIndex(0), &mut |_, _| {
        count += 1;
        false
    });
    assert_eq!(count, 1);
}

#[test]
fn test_traverse_with_depth() {
    let mut bodies = corner_bodies();
    let mut tree = QuadTree2::new();
    tree.insert_bodies(&mut bodies).unwrap();

    let mut depths = Vec::new();
    traverse_with_depth(tree.pool(), NodeIndex(0), 0, &mut |_, _, depth| {
        depths.push(depth);
        true
    });
    assert_eq!(depths, vec![0, 1, 1, 1, 1]);
}

#[test]
fn test_traverse_from_sentinel_is_a_no_op() {
    let pool: NodePool<2> = NodePool::new();
    let mut count = 0;
    traverse(&pool, NodeIndex::NONE, &mut |_, _| {
        count += 1;
        true
    });
    assert_eq!(count, 0);
}
