use crate::utils;

/// Two coordinates closer than this are treated as the same position.
pub const SAME_POSITION_EPSILON: f64 = 1e-8;

/// Distance used in place of an exact zero distance in force queries.
pub const MIN_DISTANCE: f64 = 0.1;

/// Half-extent contributed by every body when all bodies share one position.
pub const DEGENERATE_EXTENT_PER_BODY: f64 = 500.0;

pub const DEFAULT_SEED: u64 = 1984;

pub const DEFAULT_QUADTREE_SETTINGS: utils::QuadTreeSettings = utils::QuadTreeSettings {
    gravity: -1.2,
    theta: 1.2,
    seed: DEFAULT_SEED,
    max_build_attempts: 3,
    max_perturbation_retries: 3,
};
