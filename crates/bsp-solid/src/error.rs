//! Errors reported by the opt-in triangle validation.
//!
//! Tree construction and queries never fail; these only come out of
//! [`Triangle::try_new`](crate::Triangle::try_new) and
//! [`Triangle::from_vertices`](crate::Triangle::from_vertices).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangleError {
    #[error("triangle has a non-finite coordinate")]
    NonFinite,

    #[error("triangle vertices are collinear (zero area)")]
    Degenerate,

    #[error("triangle normal must be unit length, got length {length}")]
    NonUnitNormal { length: f32 },
}
