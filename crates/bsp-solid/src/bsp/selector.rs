//! Pivot selection strategies for BSP tree construction.
//!
//! The pivot's plane partitions a node. The default strategy picks a pivot
//! uniformly at random, so tree shape depends on the random stream; pass a
//! seeded generator for reproducible builds.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::Triangle;

/// Strategy for selecting which triangle's plane to use for splitting.
///
/// Selectors may carry state (such as a random stream), so selection takes
/// `&mut self`. A single selector is driven sequentially for a whole build.
pub trait PivotSelector {
    /// Select the index of the pivot triangle.
    ///
    /// Returns `None` if the slice is empty.
    fn select(&mut self, triangles: &[Triangle]) -> Option<usize>;
}

/// Picks a pivot uniformly at random from an injected generator.
#[derive(Debug, Clone)]
pub struct RandomPivot<R> {
    rng: R,
}

impl<R: Rng> RandomPivot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPivot<StdRng> {
    /// A reproducible selector: equal seeds give equal trees.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl RandomPivot<ThreadRng> {
    pub fn from_thread_rng() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> PivotSelector for RandomPivot<R> {
    fn select(&mut self, triangles: &[Triangle]) -> Option<usize> {
        if triangles.is_empty() {
            None
        } else {
            Some(self.rng.random_range(0..triangles.len()))
        }
    }
}

/// Selects the first triangle in the list.
///
/// Deterministic and cheap, but tree shape follows input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTriangle;

impl PivotSelector for FirstTriangle {
    fn select(&mut self, triangles: &[Triangle]) -> Option<usize> {
        if triangles.is_empty() { None } else { Some(0) }
    }
}

impl<S: PivotSelector + ?Sized> PivotSelector for &mut S {
    fn select(&mut self, triangles: &[Triangle]) -> Option<usize> {
        (**self).select(triangles)
    }
}
