//! Tunables shared by tree construction and the query engine.

use crate::PLANE_EPSILON;

/// Default cap on correction steps taken by
/// [`BspTree::resolve_collision`](crate::bsp::BspTree::resolve_collision).
pub const DEFAULT_MAX_RESOLVE_ITERATIONS: usize = 8;

/// Numeric settings captured by a [`BspTree`](crate::bsp::BspTree) at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BspConfig {
    /// Vertex classification tolerance used while splitting triangles.
    pub epsilon: f32,
    /// Upper bound on point queries performed while resolving a collision.
    pub max_resolve_iterations: usize,
    /// Plane-crossing denominators at or below this are treated as parallel
    /// during line tracing.
    pub parallel_epsilon: f32,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self {
            epsilon: PLANE_EPSILON,
            max_resolve_iterations: DEFAULT_MAX_RESOLVE_ITERATIONS,
            parallel_epsilon: f32::EPSILON,
        }
    }
}

impl BspConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_resolve_iterations(mut self, iterations: usize) -> Self {
        self.max_resolve_iterations = iterations;
        self
    }

    pub fn with_parallel_epsilon(mut self, epsilon: f32) -> Self {
        self.parallel_epsilon = epsilon;
        self
    }
}
