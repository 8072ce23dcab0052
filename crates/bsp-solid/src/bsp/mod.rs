//! Solid-leaf Binary Space Partitioning tree.
//!
//! The tree is built once from a triangle soup and then queried read-only:
//!
//! - Point classification (air or solid) with a push-out correction
//! - Iterative collision resolution for points
//! - Segment tracing to the first solid hit
//! - Sphere contact against the triangles along a point's path
//!
//! # Example
//!
//! ```ignore
//! use bsp_solid::{axis_aligned_box, BspTree, LeafState};
//! use nalgebra::Point3;
//!
//! let triangles = axis_aligned_box(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
//! let tree = BspTree::from_triangles_seeded(triangles, 7);
//!
//! assert_eq!(tree.point_state(Point3::new(0.5, 0.5, 0.5)), LeafState::Solid);
//! let hit = tree.trace_line(Point3::new(-1.0, 0.5, 0.5), Point3::new(2.0, 0.5, 0.5));
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: Container holding the root node and the query config
//! - [`BspNode`]: Either a terminal [`LeafState`] or an [`InternalNode`]
//! - [`PivotSelector`]: Strategy trait for choosing partition planes
//! - [`BspVisitor`]: Pre-order walk with sequential node ids, for exporters

mod node;
mod query;
mod selector;
mod tree;
mod visitor;

pub use node::{BspNode, InternalNode, LeafState};
pub use query::{PointClassification, SphereContact};
pub use selector::{FirstTriangle, PivotSelector, RandomPivot};
pub use tree::BspTree;
pub use visitor::{BspVisitor, FlatNode, FlatteningVisitor, FnVisitor, NodeId, NodeView};
