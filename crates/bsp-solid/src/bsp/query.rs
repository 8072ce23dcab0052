//! Spatial queries against a finished tree.
//!
//! All queries take `&self`; a built tree can be shared between threads and
//! queried concurrently.

use nalgebra::{Point3, Vector3};
use tracing::{debug, trace};

use super::node::{BspNode, LeafState};
use super::tree::BspTree;

/// Outcome of [`BspTree::point_query`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointClassification {
    /// Classification of the leaf the point falls into.
    pub state: LeafState,
    /// Push-out vector along the least violated plane crossed on the way
    /// down, zero if the walk never went behind a plane.
    pub correction: Vector3<f32>,
}

impl PointClassification {
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.state.is_solid()
    }
}

/// Contact reported by [`BspTree::sphere_contact`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereContact {
    /// Normal of the touched plane, pointing into air.
    pub normal: Vector3<f32>,
    /// Distance to move the center along `normal` so the sphere rests
    /// exactly on the plane.
    pub penetration: f32,
    /// Closest point on the touched triangles.
    pub point: Point3<f32>,
}

impl BspTree {
    /// Classifies `point` and computes a best-effort correction vector.
    ///
    /// At each internal node the walk goes front when the signed distance is
    /// `>= 0` and back otherwise. Among the back descents it keeps the
    /// largest (least negative) distance and that plane's normal; the
    /// correction is `normal * -distance`. This is a cheap local escape
    /// direction, not a minimal penetration vector.
    pub fn point_query(&self, point: Point3<f32>) -> PointClassification {
        let mut node = self.root();
        let mut shallowest: Option<(f32, Vector3<f32>)> = None;

        loop {
            match node {
                BspNode::Leaf(state) => {
                    let correction = shallowest
                        .map_or_else(Vector3::zeros, |(distance, normal)| normal * -distance);
                    return PointClassification {
                        state: *state,
                        correction,
                    };
                }
                BspNode::Internal(n) => {
                    let distance = n.plane().signed_distance(point);
                    if distance >= 0.0 {
                        node = n.front();
                    } else {
                        if shallowest.is_none_or(|(best, _)| distance > best) {
                            shallowest = Some((distance, n.plane().normal()));
                        }
                        node = n.back();
                    }
                }
            }
        }
    }

    /// Classification of the leaf containing `point`.
    #[inline]
    pub fn point_state(&self, point: Point3<f32>) -> LeafState {
        self.point_query(point).state
    }

    /// Pushes `point` out of solid space.
    ///
    /// Repeats [`point_query`](Self::point_query) and applies its correction
    /// while the point is solid, at most
    /// [`max_resolve_iterations`](crate::BspConfig::max_resolve_iterations)
    /// times. Running out of iterations is not an error; the point is left
    /// where the last correction put it.
    pub fn resolve_collision(&self, point: Point3<f32>) -> Point3<f32> {
        let max_iterations = self.config().max_resolve_iterations;
        let mut current = point;

        for _ in 0..max_iterations {
            let query = self.point_query(current);
            if !query.is_solid() {
                return current;
            }
            if query.correction == Vector3::zeros() {
                debug!(?current, "solid point without correction, giving up");
                return current;
            }
            current += query.correction;
        }

        debug!(
            max_iterations,
            start = ?point,
            end = ?current,
            "collision resolution reached iteration cap"
        );
        current
    }

    /// Traces the segment `p1 -> p2` and returns the first point where it
    /// enters solid space, or `None` if it stays in air.
    ///
    /// A segment that starts inside solid reports `p1`.
    pub fn trace_line(&self, p1: Point3<f32>, p2: Point3<f32>) -> Option<Point3<f32>> {
        trace_segment(self.root(), p1, p2, self.config().parallel_epsilon)
    }

    /// Tests a sphere against the triangles along the center's path to its
    /// leaf.
    ///
    /// Among the visited nodes whose plane is closer than `radius` to the
    /// center and which hold a coplanar triangle within `radius`, the one
    /// with the smallest distance wins.
    pub fn sphere_contact(&self, center: Point3<f32>, radius: f32) -> Option<SphereContact> {
        let radius_sq = radius * radius;
        let mut node = self.root();
        let mut best: Option<(f32, SphereContact)> = None;

        while let BspNode::Internal(n) = node {
            let distance = n.plane().signed_distance(center);
            let abs = distance.abs();

            if abs < radius && best.as_ref().is_none_or(|(best_abs, _)| abs < *best_abs) {
                let closest = n
                    .coplanar()
                    .iter()
                    .map(|tri| tri.closest_point(center))
                    .map(|p| (p, (center - p).norm_squared()))
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .filter(|(_, dist_sq)| *dist_sq <= radius_sq);

                if let Some((point, _)) = closest {
                    let contact = SphereContact {
                        normal: n.plane().normal(),
                        penetration: radius - distance,
                        point,
                    };
                    best = Some((abs, contact));
                }
            }

            node = if distance >= 0.0 { n.front() } else { n.back() };
        }

        best.map(|(_, contact)| contact)
    }
}

/// Segment walk over an explicit stack of sub-segments.
///
/// The near half of a crossing is pushed last so it is explored first, which
/// makes the first solid leaf reached the first hit along `p1 -> p2`.
fn trace_segment(
    root: &BspNode,
    p1: Point3<f32>,
    p2: Point3<f32>,
    parallel_epsilon: f32,
) -> Option<Point3<f32>> {
    let mut stack = vec![(root, p1, p2)];

    while let Some((node, p1, p2)) = stack.pop() {
        let n = match node {
            BspNode::Leaf(LeafState::Solid) => return Some(p1),
            BspNode::Leaf(LeafState::Air) => continue,
            BspNode::Internal(n) => n,
        };

        let t1 = n.plane().signed_distance(p1);
        let t2 = n.plane().signed_distance(p2);

        if t1 >= 0.0 && t2 >= 0.0 {
            stack.push((n.front(), p1, p2));
            continue;
        }
        if t1 < 0.0 && t2 < 0.0 {
            stack.push((n.back(), p1, p2));
            continue;
        }

        let denom = t1 - t2;
        if denom.abs() <= parallel_epsilon {
            trace!(t1, t2, "near-parallel crossing, tracing front side only");
            stack.push((n.front(), p1, p2));
            continue;
        }

        let frac = (t1 / denom).clamp(0.0, 1.0);
        let mid = p1 + (p2 - p1) * frac;

        let (near, far) = if t1 < 0.0 {
            (n.back(), n.front())
        } else {
            (n.front(), n.back())
        };

        stack.push((far, mid, p2));
        stack.push((near, p1, mid));
    }

    None
}
