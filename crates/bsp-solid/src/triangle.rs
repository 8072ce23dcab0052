//! Triangle representation for BSP trees.

use nalgebra::{Point3, Vector3};

use crate::{Plane3D, PlaneSide, TriangleError};

/// Tolerance on `|normal| - 1` accepted by [`Triangle::try_new`].
const UNIT_NORMAL_TOLERANCE: f32 = 1e-3;

/// Classification of a triangle relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriangleClassification {
    /// No vertex is behind the plane, at least one is in front
    Front,
    /// No vertex is in front of the plane, at least one is behind
    Back,
    /// All vertices lie on the plane
    Coplanar,
    /// Vertices are on both sides (spans the plane)
    Spanning,
}

/// A triangle in 3D space: three vertices plus a unit face normal.
///
/// The normal is supplied by whoever produced the triangle (usually a mesh
/// importer) and is never recomputed. Fragments produced by splitting carry
/// their parent's normal, even when the fragment itself is a sliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
    normal: Vector3<f32>,
}

impl Triangle {
    /// Creates a triangle from three vertices and a face normal.
    ///
    /// No validation is performed. Callers must pass non-collinear vertices
    /// and a unit normal; a degenerate pivot gives an ill-defined plane.
    pub fn new(v1: Point3<f32>, v2: Point3<f32>, v3: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            vertices: [v1, v2, v3],
            normal,
        }
    }

    /// Creates a triangle, rejecting non-finite input, zero area and
    /// non-unit normals.
    pub fn try_new(
        v1: Point3<f32>,
        v2: Point3<f32>,
        v3: Point3<f32>,
        normal: Vector3<f32>,
    ) -> Result<Self, TriangleError> {
        let triangle = Self::new(v1, v2, v3, normal);
        triangle.validate()?;
        Ok(triangle)
    }

    /// Creates a triangle whose normal is derived from the winding:
    /// normal = normalize((v2 - v1) × (v3 - v1))
    pub fn from_vertices(
        v1: Point3<f32>,
        v2: Point3<f32>,
        v3: Point3<f32>,
    ) -> Result<Self, TriangleError> {
        if !all_finite(&[v1, v2, v3]) {
            return Err(TriangleError::NonFinite);
        }
        let normal = (v2 - v1)
            .cross(&(v3 - v1))
            .try_normalize(f32::EPSILON)
            .ok_or(TriangleError::Degenerate)?;
        Ok(Self::new(v1, v2, v3, normal))
    }

    /// Checks the preconditions that [`Triangle::new`] leaves to the caller.
    pub fn validate(&self) -> Result<(), TriangleError> {
        if !all_finite(&self.vertices) || !self.normal.iter().all(|c| c.is_finite()) {
            return Err(TriangleError::NonFinite);
        }
        if self.doubled_area_vector().norm() <= f32::EPSILON {
            return Err(TriangleError::Degenerate);
        }
        let length = self.normal.norm();
        if (length - 1.0).abs() > UNIT_NORMAL_TOLERANCE {
            return Err(TriangleError::NonUnitNormal { length });
        }
        Ok(())
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    #[inline]
    pub fn v1(&self) -> Point3<f32> {
        self.vertices[0]
    }

    #[inline]
    pub fn v2(&self) -> Point3<f32> {
        self.vertices[1]
    }

    #[inline]
    pub fn v3(&self) -> Point3<f32> {
        self.vertices[2]
    }

    /// Returns the supplied face normal.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the plane this triangle defines when chosen as a pivot.
    pub fn plane(&self) -> Plane3D {
        Plane3D::from_triangle(self)
    }

    fn doubled_area_vector(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Surface area, computed from the vertices.
    pub fn area(&self) -> f32 {
        self.doubled_area_vector().norm() * 0.5
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Classifies this triangle relative to a plane.
    ///
    /// Returns:
    /// - `Coplanar` if all vertices lie on the plane
    /// - `Front` if every vertex is in front of or on the plane
    /// - `Back` if every vertex is behind or on the plane
    /// - `Spanning` if vertices are on both sides
    pub fn classify(&self, plane: &Plane3D, epsilon: f32) -> TriangleClassification {
        let mut front = 0;
        let mut back = 0;
        let mut on_plane = 0;

        for vertex in &self.vertices {
            match plane.classify_point_with_epsilon(*vertex, epsilon) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => on_plane += 1,
            }
        }

        if on_plane == 3 {
            TriangleClassification::Coplanar
        } else if back == 0 {
            TriangleClassification::Front
        } else if front == 0 {
            TriangleClassification::Back
        } else {
            TriangleClassification::Spanning
        }
    }

    /// Returns the point on the triangle closest to `p`.
    ///
    /// Voronoi-region walk over vertices, edges and face.
    pub fn closest_point(&self, p: Point3<f32>) -> Point3<f32> {
        let [a, b, c] = self.vertices;
        let ab = b - a;
        let ac = c - a;

        let ap = p - a;
        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = p - b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return a + ab * v;
        }

        let cp = p - c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * w;
        }

        // Inside the face
        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        a + ab * v + ac * w
    }
}

fn all_finite(points: &[Point3<f32>]) -> bool {
    points.iter().all(|p| p.coords.iter().all(|c| c.is_finite()))
}

impl From<&Triangle> for Plane3D {
    fn from(triangle: &Triangle) -> Self {
        triangle.plane()
    }
}
