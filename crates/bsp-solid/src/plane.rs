//! Plane representation and point classification.

use nalgebra::{Point3, Vector3};

use crate::Triangle;

/// Default epsilon for vertex classification.
/// Points within this distance of the plane are considered "on" the plane.
///
/// Too tight and near-coplanar triangles get split into slivers, too loose
/// and real splits are missed.
pub const PLANE_EPSILON: f32 = 1e-6;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// A plane in 3D space, represented as `normal · point + d = 0`.
///
/// The normal is stored as given. Planes derived from triangles inherit the
/// triangle's (unit) normal, so signed distances are metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    d: f32,
}

impl Plane3D {
    /// Creates a plane from a normal vector and the `d` coefficient.
    pub fn new(normal: Vector3<f32>, d: f32) -> Self {
        Self { normal, d }
    }

    /// Creates a plane through `point` with the given normal.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            normal,
            d: -normal.dot(&point.coords),
        }
    }

    /// Derives the partition plane of a pivot triangle:
    /// `normal = pivot.normal`, `d = -dot(pivot.normal, pivot.v1)`.
    pub fn from_triangle(pivot: &Triangle) -> Self {
        Self::from_point_and_normal(pivot.v1(), pivot.normal())
    }

    /// Returns the normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the `d` coefficient of the plane equation.
    #[inline]
    pub fn d(&self) -> f32 {
        self.d
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) + self.d
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ground() -> Plane3D {
        Plane3D::new(Vector3::new(0.0, 1.0, 0.0), 0.0)
    }

    #[test]
    fn signed_distance_sign_follows_normal() {
        let plane = ground();
        assert_relative_eq!(plane.signed_distance(Point3::new(3.0, 2.0, -1.0)), 2.0);
        assert_relative_eq!(plane.signed_distance(Point3::new(0.0, -0.5, 0.0)), -0.5);
        assert_eq!(plane.signed_distance(Point3::new(7.0, 0.0, 7.0)), 0.0);
    }

    #[test]
    fn d_is_negative_dot_of_point_on_plane() {
        let plane = Plane3D::from_point_and_normal(
            Point3::new(0.0, 0.0, 2.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        assert_relative_eq!(plane.d(), -2.0);
        assert_relative_eq!(plane.signed_distance(Point3::new(5.0, 5.0, 2.0)), 0.0);
        assert_relative_eq!(plane.signed_distance(Point3::new(0.0, 0.0, 3.0)), 1.0);
    }

    #[test]
    fn classify_respects_epsilon() {
        let plane = ground();
        assert_eq!(plane.classify_point(Point3::new(0.0, 1.0, 0.0)), PlaneSide::Front);
        assert_eq!(plane.classify_point(Point3::new(0.0, -1.0, 0.0)), PlaneSide::Back);
        assert_eq!(plane.classify_point(Point3::new(0.0, 5e-7, 0.0)), PlaneSide::OnPlane);
        assert_eq!(plane.classify_point(Point3::new(0.0, -5e-7, 0.0)), PlaneSide::OnPlane);

        assert_eq!(
            plane.classify_point_with_epsilon(Point3::new(0.0, 0.05, 0.0), 0.1),
            PlaneSide::OnPlane
        );
        assert_eq!(
            plane.classify_point_with_epsilon(Point3::new(0.0, 0.05, 0.0), 0.0),
            PlaneSide::Front
        );
    }

    #[test]
    fn from_triangle_uses_pivot_normal_and_first_vertex() {
        let tri = Triangle::new(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        let plane = Plane3D::from_triangle(&tri);
        assert_eq!(plane.normal(), Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(plane.d(), -1.0);
    }
}
