// src/utils/settings.rs
use crate::utils::{
    DEFAULT_QUADTREE_SETTINGS,
    errors::QuadTreeError
};

/// Parameters fixed for the lifetime of a [`QuadTree`](crate::quadtree::QuadTree).
///
/// `gravity` is the signed force-law constant (negative values push bodies apart, which is what
/// graph layouts want). `theta` is the Barnes-Hut size/distance threshold: smaller values are
/// more accurate and slower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTreeSettings {
    pub gravity: f64,
    pub theta: f64,
    pub seed: u64,
    pub max_build_attempts: usize,
    pub max_perturbation_retries: usize,
}

impl Default for QuadTreeSettings {
    fn default() -> Self {
        DEFAULT_QUADTREE_SETTINGS
    }
}

impl QuadTreeSettings {
    /// Creates settings, taking every unspecified value from the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::utils::QuadTreeSettings;
    ///
    /// let settings = QuadTreeSettings::new(Some(-2.0), None, None);
    /// assert_eq!(settings.gravity, -2.0);
    /// assert_eq!(settings.theta, 1.2);
    /// assert_eq!(settings.seed, 1984);
    /// ```
    pub fn new(
        gravity: Option<f64>,
        theta: Option<f64>,
        seed: Option<u64>,
    ) -> Self {
        let default = DEFAULT_QUADTREE_SETTINGS;
        Self {
            gravity: gravity.unwrap_or(default.gravity),
            theta: theta.unwrap_or(default.theta),
            seed: seed.unwrap_or(default.seed),
            ..default
        }
    }

    pub fn with_max_build_attempts(mut self, attempts: usize) -> Self {
        self.max_build_attempts = attempts;
        self
    }

    pub fn with_max_perturbation_retries(mut self, retries: usize) -> Self {
        self.max_perturbation_retries = retries;
        self
    }

    /// Checks that the settings can drive a build and a force query.
    pub fn validate(&self) -> Result<(), QuadTreeError> {
        if !self.gravity.is_finite() {
            return Err(QuadTreeError::InvalidSettings("gravity must be finite".to_string()));
        }
        if !self.theta.is_finite() || self.theta <= 0.0 {
            return Err(QuadTreeError::InvalidSettings("theta must be positive and finite".to_string()));
        }
        if self.max_build_attempts == 0 {
            return Err(QuadTreeError::InvalidSettings("at least one build attempt is required".to_string()));
        }
        if self.max_perturbation_retries == 0 {
            return Err(QuadTreeError::InvalidSettings("at least one perturbation retry is required".to_string()));
        }
        Ok(())
    }
}
