//! BSP tree container and construction.

use tracing::{debug, instrument};

use crate::{BspConfig, Plane3D, Triangle, TriangleClassification, TriangleSplit};

use super::node::{BspNode, InternalNode, LeafState};
use super::selector::{PivotSelector, RandomPivot};

/// A solid-leaf Binary Space Partitioning tree built from a triangle soup.
///
/// Every internal node partitions space by the plane of a pivot triangle.
/// Front space (the side the face normals point to) is air, back space is
/// solid, so a closed mesh with outward normals yields `Solid` leaves for its
/// interior.
///
/// # Construction
///
/// ```ignore
/// use bsp_solid::{BspTree, RandomPivot};
///
/// let triangles: Vec<Triangle> = /* from a mesh importer */;
/// let tree = BspTree::build(triangles, &mut RandomPivot::seeded(7));
/// ```
///
/// The tree is immutable once built. [`BspTree::rebuild`] replaces it
/// wholesale rather than editing nodes in place.
#[derive(Debug, Clone, PartialEq)]
pub struct BspTree {
    root: BspNode,
    config: BspConfig,
}

impl Default for BspTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters gathered while building, reported through `tracing`.
#[derive(Debug, Default)]
struct BuildStats {
    internal_nodes: usize,
    spanning: usize,
    coplanar: usize,
}

impl BspTree {
    /// Creates an empty tree: a single `Air` leaf.
    pub fn new() -> Self {
        Self::with_config(BspConfig::default())
    }

    /// Creates an empty tree that will use `config` for queries.
    pub fn with_config(config: BspConfig) -> Self {
        Self {
            root: BspNode::Leaf(LeafState::Air),
            config,
        }
    }

    /// Builds a tree from `triangles` using the default [`BspConfig`].
    ///
    /// Returns an empty tree if the input is empty.
    pub fn build<S: PivotSelector>(triangles: Vec<Triangle>, selector: &mut S) -> Self {
        Self::build_with_config(triangles, selector, BspConfig::default())
    }

    /// Builds a tree with a seeded [`RandomPivot`] selector.
    pub fn from_triangles_seeded(triangles: Vec<Triangle>, seed: u64) -> Self {
        Self::build(triangles, &mut RandomPivot::seeded(seed))
    }

    /// Builds a tree from `triangles`.
    ///
    /// Triangles must have unit normals and non-collinear vertices; this is
    /// not checked (see [`Triangle::validate`]). Invalid input does not
    /// panic but produces an unspecified partition.
    ///
    /// Tree depth is bounded only by the input length. Construction, queries,
    /// traversal and drop keep pending work on the heap, so a chain of parallel
    /// planes as deep as the input does not overflow the call stack. Memory
    /// still grows with the retained buckets, quadratically for such a chain.
    #[instrument(skip_all, fields(triangles = triangles.len()))]
    pub fn build_with_config<S: PivotSelector>(
        triangles: Vec<Triangle>,
        selector: &mut S,
        config: BspConfig,
    ) -> Self {
        if triangles.is_empty() {
            debug!("no input triangles, building empty tree");
            return Self::with_config(config);
        }

        let mut stats = BuildStats::default();
        let root = build_subtree(triangles, selector, config.epsilon, &mut stats);

        debug!(
            internal_nodes = stats.internal_nodes,
            spanning = stats.spanning,
            coplanar = stats.coplanar,
            depth = root.depth(),
            "built BSP tree"
        );

        Self { root, config }
    }

    /// Discards the current tree and builds a fresh one, keeping the config.
    pub fn rebuild<S: PivotSelector>(&mut self, triangles: Vec<Triangle>, selector: &mut S) {
        *self = Self::build_with_config(triangles, selector, self.config);
    }

    /// Returns `true` if the tree holds no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    #[inline]
    pub fn root(&self) -> &BspNode {
        &self.root
    }

    #[inline]
    pub fn config(&self) -> &BspConfig {
        &self.config
    }

    /// Returns the number of triangles stored in coplanar buckets across the
    /// tree, split fragments included.
    pub fn triangle_count(&self) -> usize {
        self.root.triangle_count()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Returns the maximum depth of the tree (1 for an empty tree).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Collects every coplanar-bucket triangle in the tree.
    ///
    /// The order of triangles is not guaranteed.
    pub fn collect_triangles(&self) -> Vec<Triangle> {
        self.root
            .pre_order()
            .flat_map(|node| node.coplanar().iter().copied())
            .collect()
    }
}

/// A node whose plane and buckets are known but whose children are not.
struct PartialNode {
    plane: Plane3D,
    coplanar: Vec<Triangle>,
    front: Vec<Triangle>,
    back: Vec<Triangle>,
}

impl PartialNode {
    fn into_node(self, front_child: BspNode, back_child: BspNode) -> BspNode {
        BspNode::internal(InternalNode::new(
            self.plane,
            self.coplanar,
            self.front,
            self.back,
            front_child,
            back_child,
        ))
    }
}

/// Build work kept on the heap instead of the call stack.
enum Frame {
    /// Waiting for the front subtree.
    Front(PartialNode),
    /// Front subtree finished, waiting for the back subtree.
    Back(PartialNode, BspNode),
}

enum Step {
    Partition(Vec<Triangle>),
    Finished(BspNode),
}

/// Builds the subtree for a non-empty triangle list.
///
/// Children are built front first, so selectors are consulted in pre-order.
/// The pending path lives in an explicit stack; a chain-shaped tree as deep
/// as the input is long does not grow the call stack.
fn build_subtree<S: PivotSelector>(
    triangles: Vec<Triangle>,
    selector: &mut S,
    epsilon: f32,
    stats: &mut BuildStats,
) -> BspNode {
    let mut stack: Vec<Frame> = Vec::new();
    let mut step = Step::Partition(triangles);

    loop {
        step = match step {
            Step::Partition(triangles) => {
                let partial = partition(triangles, selector, epsilon, stats);
                let next = if partial.front.is_empty() {
                    Step::Finished(BspNode::Leaf(LeafState::Air))
                } else {
                    Step::Partition(partial.front.clone())
                };
                stack.push(Frame::Front(partial));
                next
            }
            Step::Finished(child) => match stack.pop() {
                None => return child,
                Some(Frame::Front(partial)) => {
                    if partial.back.is_empty() {
                        Step::Finished(partial.into_node(child, BspNode::Leaf(LeafState::Solid)))
                    } else {
                        let back = partial.back.clone();
                        stack.push(Frame::Back(partial, child));
                        Step::Partition(back)
                    }
                }
                Some(Frame::Back(partial, front_child)) => {
                    Step::Finished(partial.into_node(front_child, child))
                }
            },
        };
    }
}

/// Picks a pivot and sorts the remaining triangles against its plane.
fn partition<S: PivotSelector>(
    mut triangles: Vec<Triangle>,
    selector: &mut S,
    epsilon: f32,
    stats: &mut BuildStats,
) -> PartialNode {
    debug_assert!(!triangles.is_empty());

    let pivot_idx = selector
        .select(&triangles)
        .filter(|&idx| idx < triangles.len())
        .unwrap_or(0);
    let pivot = triangles.swap_remove(pivot_idx);
    let plane = pivot.plane();

    let mut split = TriangleSplit::new();
    split.coplanar.push(pivot);

    for triangle in &triangles {
        match triangle.split_into(&plane, epsilon, &mut split) {
            TriangleClassification::Spanning => stats.spanning += 1,
            TriangleClassification::Coplanar => stats.coplanar += 1,
            _ => {}
        }
    }
    stats.internal_nodes += 1;

    let TriangleSplit {
        front,
        back,
        coplanar,
    } = split;

    PartialNode {
        plane,
        coplanar,
        front,
        back,
    }
}
