use crate::models::{Body2, Body3, Vector2, Vector3};

#[test]
fn test_default_body() {
    let body = Body3::default();
    assert_eq!(body.mass, 1.0);
    assert!(body.position.is_zero());
    assert!(!body.is_position_initialized());
}

#[test]
fn test_set_position_updates_previous_position() {
    let mut body = Body2::default().with_mass(3.0);
    body.set_position(Vector2::new([1.0, -1.0]));
    assert_eq!(body.position, Vector2::new([1.0, -1.0]));
    assert_eq!(body.prev_position, body.position);
    assert!(body.is_position_initialized());
    assert_eq!(body.mass, 3.0);
}

#[test]
fn test_reset_force() {
    let mut body = Body3::new(Vector3::new([0.0, 0.0, 1.0]));
    body.force = Vector3::splat(2.5);
    body.reset_force();
    assert!(body.force.is_zero());
}
