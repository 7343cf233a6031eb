use approx::assert_relative_eq;
use crate::assert_float_eq;
use crate::models::{Vector, Vector2, Vector3};

#[test]
fn test_vector_arithmetic() {
    let a = Vector3::new([1.0, 2.0, 3.0]);
    let b = Vector3::new([0.5, -1.0, 2.0]);

    assert_eq!(a + b, Vector3::new([1.5, 1.0, 5.0]));
    assert_eq!(a - b, Vector3::new([0.5, 3.0, 1.0]));
    assert_eq!(a * 2.0, Vector3::new([2.0, 4.0, 6.0]));
    assert_eq!(-a, Vector3::new([-1.0, -2.0, -3.0]));
}

#[test]
fn test_add_scaled() {
    let mut a = Vector2::new([1.0, 1.0]);
    a.add_scaled(&Vector2::new([2.0, -4.0]), 0.5);
    assert_eq!(a, Vector2::new([2.0, -1.0]));
}

#[test]
fn test_length_and_normalize() {
    let v = Vector2::new([3.0, 4.0]);
    assert_float_eq(v.length(), 5.0, 1e-12, None);

    let n = v.normalize();
    assert_relative_eq!(n, Vector2::new([0.6, 0.8]), epsilon = 1e-12);
    assert_float_eq(n.length(), 1.0, 1e-12, Some("normalized length"));

    // A zero vector has no direction; normalizing it must not produce NaN.
    assert_eq!(Vector2::zero().normalize(), Vector2::zero());
}

#[test]
fn test_median() {
    let min = Vector3::new([0.0, -2.0, 10.0]);
    let max = Vector3::new([4.0, 2.0, 11.0]);
    assert_eq!(Vector::median(&min, &max), Vector3::new([2.0, 0.0, 10.5]));
}

#[test]
fn test_same_as_uses_tolerance() {
    let a = Vector3::new([1.0, 1.0, 1.0]);
    let close = Vector3::new([1.0 + 5e-9, 1.0, 1.0 - 5e-9]);
    let far = Vector3::new([1.0, 1.0 + 1e-7, 1.0]);

    assert!(a.same_as(&close));
    assert_ne!(a, close);
    assert!(!a.same_as(&far));
}

#[test]
fn test_reset_and_indexing() {
    let mut v = Vector3::splat(7.0);
    v[1] = 2.0;
    assert_eq!(v[1], 2.0);
    assert_eq!(v.max_component(), 7.0);
    v.reset();
    assert!(v.is_zero());
}
