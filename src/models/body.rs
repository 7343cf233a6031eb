use crate::models::Vector;

/// A point mass in the layout.
///
/// Bodies are owned by the caller. The quad tree refers to them by their index in the slice
/// passed to [`QuadTree::insert_bodies`](crate::quadtree::QuadTree::insert_bodies), reads
/// `position` and `mass`, and only ever adds into `force`.
#[derive(Debug, Clone, PartialEq)]
pub struct Body<const D: usize> {
    pub position: Vector<D>,
    /// Position before the last integration step. Kept by the integrator.
    pub prev_position: Vector<D>,
    pub velocity: Vector<D>,
    /// Net force accumulator. Reset it before every force pass.
    pub force: Vector<D>,
    pub mass: f64,
}

pub type Body2 = Body<2>;
pub type Body3 = Body<3>;

impl<const D: usize> Default for Body<D> {
    fn default() -> Self {
        Self {
            position: Vector::zero(),
            prev_position: Vector::zero(),
            velocity: Vector::zero(),
            force: Vector::zero(),
            mass: 1.0,
        }
    }
}

impl<const D: usize> Body<D> {
    /// Creates a body of unit mass at `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::models::{Body3, Vector3};
    ///
    /// let body = Body3::new(Vector3::new([1.0, 2.0, 3.0]));
    /// assert_eq!(body.mass, 1.0);
    /// assert_eq!(body.prev_position, body.position);
    /// assert!(body.force.is_zero());
    /// ```
    pub fn new(position: Vector<D>) -> Self {
        Self {
            position,
            prev_position: position,
            ..Self::default()
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Moves the body, forgetting where it was.
    pub fn set_position(&mut self, position: Vector<D>) {
        self.position = position;
        self.prev_position = position;
    }

    /// False for bodies still sitting at the origin, which is where new bodies start.
    pub fn is_position_initialized(&self) -> bool {
        !self.position.is_zero()
    }

    pub fn reset_force(&mut self) {
        self.force.reset();
    }
}
