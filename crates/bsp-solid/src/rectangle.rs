//! Rectangle (quad) helper for producing triangle soups.

use nalgebra::{Point3, Vector3};

use crate::Triangle;

/// A rectangle (quad) in 3D space, defined by a corner and two edge vectors.
///
/// The four vertices are:
/// - `origin`
/// - `origin + u`
/// - `origin + u + v`
/// - `origin + v`
///
/// The face normal is `normalize(u × v)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    origin: Point3<f32>,
    u: Vector3<f32>,
    v: Vector3<f32>,
}

impl Rectangle {
    /// Creates a new rectangle from an origin corner and two edge vectors.
    pub fn new(origin: Point3<f32>, u: Vector3<f32>, v: Vector3<f32>) -> Self {
        Self { origin, u, v }
    }

    /// Returns the four corners in winding order.
    pub fn vertices(&self) -> [Point3<f32>; 4] {
        [
            self.origin,
            self.origin + self.u,
            self.origin + self.u + self.v,
            self.origin + self.v,
        ]
    }

    /// Unit face normal. Zero if the edges are parallel.
    pub fn normal(&self) -> Vector3<f32> {
        self.u
            .cross(&self.v)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Splits the quad along its `origin -> origin + u + v` diagonal.
    pub fn triangles(&self) -> [Triangle; 2] {
        let [a, b, c, d] = self.vertices();
        let normal = self.normal();
        [Triangle::new(a, b, c, normal), Triangle::new(a, c, d, normal)]
    }
}

/// Builds the 12 outward-facing triangles of an axis-aligned box.
///
/// The result is a closed mesh: everything inside the box is solid once the
/// triangles are fed to a [`BspTree`](crate::bsp::BspTree).
pub fn axis_aligned_box(min: Point3<f32>, max: Point3<f32>) -> Vec<Triangle> {
    let extent = max - min;
    let dx = Vector3::new(extent.x, 0.0, 0.0);
    let dy = Vector3::new(0.0, extent.y, 0.0);
    let dz = Vector3::new(0.0, 0.0, extent.z);

    let faces = [
        Rectangle::new(min, dz, dy),
        Rectangle::new(Point3::new(max.x, min.y, min.z), dy, dz),
        Rectangle::new(min, dx, dz),
        Rectangle::new(Point3::new(min.x, max.y, min.z), dz, dx),
        Rectangle::new(min, dy, dx),
        Rectangle::new(Point3::new(min.x, min.y, max.z), dx, dy),
    ];

    faces.iter().flat_map(Rectangle::triangles).collect()
}
