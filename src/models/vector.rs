use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};

use crate::utils::SAME_POSITION_EPSILON;

/// A point or direction in `D`-dimensional space.
///
/// `==` compares coordinates exactly; [`Vector::same_as`] is the tolerant comparison the tree
/// uses to detect bodies sitting on top of each other.
///
/// # Examples
///
/// ```
/// use rs_quadtree::models::Vector3;
///
/// let a = Vector3::new([1.0, 2.0, 3.0]);
/// let b = Vector3::splat(1.0);
/// assert_eq!(a - b, Vector3::new([0.0, 1.0, 2.0]));
/// assert_eq!((a * 2.0)[2], 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const D: usize> {
    pub coord: [f64; D],
}

pub type Vector2 = Vector<2>;
pub type Vector3 = Vector<3>;

impl<const D: usize> Default for Vector<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const D: usize> Vector<D> {
    pub const fn new(coord: [f64; D]) -> Self {
        Self { coord }
    }

    pub const fn zero() -> Self {
        Self { coord: [0.0; D] }
    }

    pub const fn splat(value: f64) -> Self {
        Self { coord: [value; D] }
    }

    /// Sets every coordinate back to zero.
    pub fn reset(&mut self) {
        self.coord = [0.0; D];
    }

    /// `self += other * scale`, without a temporary.
    #[inline]
    pub fn add_scaled(&mut self, other: &Self, scale: f64) {
        for (c, o) in self.coord.iter_mut().zip(other.coord.iter()) {
            *c += o * scale;
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.coord.iter().zip(other.coord.iter()).map(|(a, b)| a * b).sum()
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns a unit vector pointing the same way, or the zero vector for a zero-length input.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::zero();
        }
        *self * (1.0 / length)
    }

    /// Componentwise midpoint of `a` and `b`.
    #[inline]
    pub fn median(a: &Self, b: &Self) -> Self {
        let mut coord = [0.0; D];
        for (i, c) in coord.iter_mut().enumerate() {
            *c = (a.coord[i] + b.coord[i]) * 0.5;
        }
        Self { coord }
    }

    /// True when every coordinate differs from `other` by less than `1e-8`.
    #[inline]
    pub fn same_as(&self, other: &Self) -> bool {
        self.coord
            .iter()
            .zip(other.coord.iter())
            .all(|(a, b)| (a - b).abs() < SAME_POSITION_EPSILON)
    }

    pub fn max_component(&self) -> f64 {
        self.coord.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn is_finite(&self) -> bool {
        self.coord.iter().all(|c| c.is_finite())
    }

    pub fn is_zero(&self) -> bool {
        self.coord.iter().all(|&c| c == 0.0)
    }
}

impl<const D: usize> From<[f64; D]> for Vector<D> {
    fn from(coord: [f64; D]) -> Self {
        Self { coord }
    }
}

impl<const D: usize> Index<usize> for Vector<D> {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.coord[axis]
    }
}

impl<const D: usize> IndexMut<usize> for Vector<D> {
    fn index_mut(&mut self, axis: usize) -> &mut f64 {
        &mut self.coord[axis]
    }
}

impl<const D: usize> Add for Vector<D> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const D: usize> AddAssign for Vector<D> {
    fn add_assign(&mut self, rhs: Self) {
        for (c, r) in self.coord.iter_mut().zip(rhs.coord.iter()) {
            *c += r;
        }
    }
}

impl<const D: usize> Sub for Vector<D> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<const D: usize> SubAssign for Vector<D> {
    fn sub_assign(&mut self, rhs: Self) {
        for (c, r) in self.coord.iter_mut().zip(rhs.coord.iter()) {
            *c -= r;
        }
    }
}

impl<const D: usize> Mul<f64> for Vector<D> {
    type Output = Self;

    fn mul(mut self, rhs: f64) -> Self {
        self *= rhs;
        self
    }
}

impl<const D: usize> MulAssign<f64> for Vector<D> {
    fn mul_assign(&mut self, rhs: f64) {
        for c in self.coord.iter_mut() {
            *c *= rhs;
        }
    }
}

impl<const D: usize> Neg for Vector<D> {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl<const D: usize> AbsDiffEq for Vector<D> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.coord
            .iter()
            .zip(other.coord.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const D: usize> RelativeEq for Vector<D> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.coord
            .iter()
            .zip(other.coord.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
