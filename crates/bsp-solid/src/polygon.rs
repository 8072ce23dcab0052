//! Convex polygon clipping and triangulation.

use nalgebra::{Point3, Vector3};

use crate::{Plane3D, Triangle};

/// One of the two closed half-spaces bounded by a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HalfSpace {
    /// Signed distance `>= 0`
    Front,
    /// Signed distance `<= 0`
    Back,
}

impl HalfSpace {
    /// Both half-spaces are closed, so a point exactly on the plane is
    /// inside either one.
    #[inline]
    pub fn contains(self, signed_distance: f32) -> bool {
        match self {
            HalfSpace::Front => signed_distance >= 0.0,
            HalfSpace::Back => signed_distance <= 0.0,
        }
    }
}

/// A convex polygon in 3D space, defined by an ordered vertex loop.
///
/// The loop is closed implicitly: the last vertex connects back to the first.
/// Clipping can leave fewer than three vertices, in which case the polygon
/// has no area and triangulates to nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point3<f32>>,
}

impl Polygon {
    /// Creates a new polygon from an ordered list of vertices.
    pub fn new(vertices: Vec<Point3<f32>>) -> Self {
        Self { vertices }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Clips the polygon against one half-space of `plane` (Sutherland-Hodgman).
    ///
    /// For every edge `A -> B`, `A` is kept if it is inside `keep`, and the
    /// exact crossing point `A + (B - A) * dA / (dA - dB)` is emitted when the
    /// endpoints lie strictly on opposite sides. On-plane vertices are kept by
    /// both the front and the back clip, so the two results of clipping the
    /// same polygon share their cut vertices bit for bit.
    pub fn clip(&self, plane: &Plane3D, keep: HalfSpace) -> Polygon {
        let n = self.vertices.len();
        let mut clipped = Vec::with_capacity(n + 1);

        let distances: Vec<f32> = self
            .vertices
            .iter()
            .map(|v| plane.signed_distance(*v))
            .collect();

        for i in 0..n {
            let j = (i + 1) % n;
            let (a, da) = (self.vertices[i], distances[i]);
            let (b, db) = (self.vertices[j], distances[j]);

            if keep.contains(da) {
                clipped.push(a);
            }

            // A crossing that touches the plane at an endpoint would only
            // duplicate that endpoint, so require strictly opposite signs.
            if (da > 0.0 && db < 0.0) || (da < 0.0 && db > 0.0) {
                let t = da / (da - db);
                clipped.push(a + (b - a) * t);
            }
        }

        Polygon::new(clipped)
    }

    /// Fan-triangulates the polygon from its first vertex.
    ///
    /// Produces `len - 2` triangles, each tagged with `normal` as given.
    pub fn triangulate(&self, normal: Vector3<f32>) -> Vec<Triangle> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }

        let anchor = self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(|edge| Triangle::new(anchor, edge[0], edge[1], normal))
            .collect()
    }
}

impl From<Triangle> for Polygon {
    fn from(triangle: Triangle) -> Self {
        Self {
            vertices: triangle.vertices().to_vec(),
        }
    }
}

impl From<&Triangle> for Polygon {
    fn from(triangle: &Triangle) -> Self {
        Self {
            vertices: triangle.vertices().to_vec(),
        }
    }
}
