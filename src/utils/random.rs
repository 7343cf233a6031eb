//! Random numbers for the collision tie-break.
//!
//! The tree only ever needs uniform doubles in `[0, 1)`, drawn in a fixed order, so any
//! `rand` generator works. Builds are reproducible as long as the generator is seeded.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator used by [`QuadTree::new`](crate::quadtree::QuadTree::new).
pub type DefaultRandom = ChaCha8Rng;

/// A source of uniformly distributed doubles in `[0, 1)`.
pub trait RandomSource {
    fn next_double(&mut self) -> f64;
}

impl<T: RngCore> RandomSource for T {
    #[inline]
    fn next_double(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Creates the default generator for `seed`.
///
/// # Examples
///
/// ```
/// use rs_quadtree::utils::{seeded_random, RandomSource};
///
/// let mut a = seeded_random(7);
/// let mut b = seeded_random(7);
/// let x = a.next_double();
/// assert!((0.0..1.0).contains(&x));
/// assert_eq!(x, b.next_double());
/// ```
pub fn seeded_random(seed: u64) -> DefaultRandom {
    ChaCha8Rng::seed_from_u64(seed)
}
