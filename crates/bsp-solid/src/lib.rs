//! Solid-leaf BSP tree for point, collision and segment queries.
//!
//! Input is a triangle soup with unit face normals (typically from an
//! external mesh importer). Output is an immutable [`BspTree`] that
//! classifies space into air and solid.

pub mod bsp;
mod config;
mod error;
mod plane;
mod polygon;
mod rectangle;
mod split;
mod triangle;

pub use bsp::{BspNode, BspTree, FirstTriangle, LeafState, PivotSelector, RandomPivot};
pub use config::{BspConfig, DEFAULT_MAX_RESOLVE_ITERATIONS};
pub use error::TriangleError;
pub use plane::{Plane3D, PlaneSide, PLANE_EPSILON};
pub use polygon::{HalfSpace, Polygon};
pub use rectangle::{axis_aligned_box, Rectangle};
pub use split::TriangleSplit;
pub use triangle::{Triangle, TriangleClassification};
