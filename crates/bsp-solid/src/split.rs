//! Splitting triangles by a partition plane.

use crate::{HalfSpace, Plane3D, Polygon, Triangle, TriangleClassification};

/// Result of splitting one or more triangles by a plane.
///
/// A triangle lands in exactly one bucket; straddling triangles are replaced
/// by their fragments in `front` and `back`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSplit {
    pub front: Vec<Triangle>,
    pub back: Vec<Triangle>,
    pub coplanar: Vec<Triangle>,
}

impl TriangleSplit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of triangles across all three buckets.
    pub fn len(&self) -> usize {
        self.front.len() + self.back.len() + self.coplanar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Triangle {
    /// Splits the triangle by `plane`, appending the results to `out`.
    ///
    /// Returns the classification the triangle received. A `Spanning`
    /// triangle is clipped twice, once per half-space, and each clipped
    /// polygon is fan-triangulated; the fragments inherit this triangle's
    /// normal and never enter the coplanar bucket.
    pub fn split_into(
        &self,
        plane: &Plane3D,
        epsilon: f32,
        out: &mut TriangleSplit,
    ) -> TriangleClassification {
        let classification = self.classify(plane, epsilon);
        match classification {
            TriangleClassification::Coplanar => out.coplanar.push(*self),
            TriangleClassification::Front => out.front.push(*self),
            TriangleClassification::Back => out.back.push(*self),
            TriangleClassification::Spanning => {
                // The two clips are computed independently: one side may be a
                // triangle while the other is a quad.
                let polygon = Polygon::from(self);
                let front = polygon.clip(plane, HalfSpace::Front);
                let back = polygon.clip(plane, HalfSpace::Back);
                out.front.extend(front.triangulate(self.normal()));
                out.back.extend(back.triangulate(self.normal()));
            }
        }
        classification
    }

    /// Splits the triangle by `plane` into front, back and coplanar lists.
    pub fn split(&self, plane: &Plane3D, epsilon: f32) -> TriangleSplit {
        let mut out = TriangleSplit::new();
        self.split_into(plane, epsilon, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PLANE_EPSILON;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    fn x_plane() -> Plane3D {
        Plane3D::new(Vector3::new(1.0, 0.0, 0.0), 0.0)
    }

    fn straddling() -> Triangle {
        Triangle::new(
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn coplanar_goes_to_coplanar_only() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Vector3::new(-1.0, 0.0, 0.0),
        );
        let split = tri.split(&x_plane(), PLANE_EPSILON);
        assert_eq!(split.coplanar, vec![tri]);
        assert!(split.front.is_empty());
        assert!(split.back.is_empty());
    }

    #[test]
    fn touching_triangles_are_not_split() {
        let front = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Vector3::z(),
        );
        let split = front.split(&x_plane(), PLANE_EPSILON);
        assert_eq!(split.front, vec![front]);
        assert_eq!(split.len(), 1);

        let back = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Vector3::z(),
        );
        let split = back.split(&x_plane(), PLANE_EPSILON);
        assert_eq!(split.back, vec![back]);
        assert_eq!(split.len(), 1);
    }

    #[test]
    fn near_plane_vertex_counts_as_on() {
        let tri = Triangle::new(
            Point3::new(-5e-7, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Vector3::z(),
        );
        let split = tri.split(&x_plane(), PLANE_EPSILON);
        assert_eq!(split.front, vec![tri]);
        assert!(split.back.is_empty());
    }

    #[test]
    fn straddling_triangle_gives_one_and_two() {
        let split = straddling().split(&x_plane(), PLANE_EPSILON);

        assert!(split.coplanar.is_empty());
        assert_eq!(split.front.len(), 2);
        assert_eq!(split.back.len(), 1);

        for tri in &split.front {
            assert!(tri.vertices().iter().all(|v| v.x >= 0.0));
            assert_eq!(tri.normal(), Vector3::z());
        }
        for tri in &split.back {
            assert!(tri.vertices().iter().all(|v| v.x <= 0.0));
            assert_eq!(tri.normal(), Vector3::z());
        }
    }

    #[test]
    fn straddling_fragments_share_cut_vertices() {
        let split = straddling().split(&x_plane(), PLANE_EPSILON);

        let on_cut = |tris: &[Triangle]| {
            let mut cut: Vec<Point3<f32>> = tris
                .iter()
                .flat_map(|t| t.vertices().iter().copied())
                .filter(|v| v.x == 0.0)
                .collect();
            cut.sort_by(|a, b| a.y.total_cmp(&b.y));
            cut.dedup();
            cut
        };

        let front_cut = on_cut(&split.front);
        let back_cut = on_cut(&split.back);
        assert_eq!(front_cut.len(), 2);
        assert_eq!(front_cut, back_cut);
        assert_eq!(front_cut[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(front_cut[1], Point3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn split_preserves_area() {
        let tri = Triangle::new(
            Point3::new(-0.3, -1.0, 0.2),
            Point3::new(0.7, 0.4, -0.1),
            Point3::new(-0.9, 1.3, 0.5),
            Vector3::z(),
        );
        let plane = Plane3D::new(Vector3::new(0.6, 0.8, 0.0), -0.1);
        let split = tri.split(&plane, PLANE_EPSILON);

        let area: f32 = split.front.iter().chain(&split.back).map(Triangle::area).sum();
        assert_relative_eq!(area, tri.area(), max_relative = 1e-5);
    }

    #[test]
    fn split_into_appends_and_reports() {
        let mut out = TriangleSplit::new();
        let first = straddling().split_into(&x_plane(), PLANE_EPSILON, &mut out);
        let second = straddling().split_into(&x_plane(), PLANE_EPSILON, &mut out);

        assert_eq!(first, TriangleClassification::Spanning);
        assert_eq!(second, TriangleClassification::Spanning);
        assert_eq!(out.front.len(), 4);
        assert_eq!(out.back.len(), 2);
    }
}
