//! BSP tree node implementation.

use crate::{Plane3D, Triangle};

/// Terminal classification of a leaf region.
///
/// Front space of every partition plane is outside the solid, back space is
/// inside it. An empty front bucket therefore ends in an `Air` leaf and an
/// empty back bucket in a `Solid` leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafState {
    Air,
    Solid,
}

impl LeafState {
    #[inline]
    pub fn is_solid(self) -> bool {
        self == LeafState::Solid
    }
}

/// A node in the BSP tree: either a terminal leaf or a partitioning node
/// that owns both of its children.
///
/// Counting, traversal and dropping use explicit stacks. The derived
/// `Clone`, `PartialEq` and `Debug` impls recurse once per level, so avoid
/// them on degenerate trees thousands of levels deep.
#[derive(Debug, Clone, PartialEq)]
pub enum BspNode {
    Leaf(LeafState),
    Internal(Box<InternalNode>),
}

/// A partitioning node.
///
/// Besides the plane and the two subtrees, the node keeps the raw buckets
/// produced by its own construction step. `front_bucket` and `back_bucket`
/// hold the triangles (and fragments) that were handed to the children, for
/// visualisation and export. They are disjoint from `coplanar`.
///
/// Nodes come only from [`BspTree::build`](super::BspTree::build), which
/// guarantees a non-empty coplanar bucket:
///
/// ```compile_fail
/// use bsp_solid::bsp::{BspNode, InternalNode, LeafState};
/// use bsp_solid::Plane3D;
/// use nalgebra::Vector3;
///
/// let node = InternalNode::new(
///     Plane3D::new(Vector3::y(), 0.0),
///     Vec::new(),
///     Vec::new(),
///     Vec::new(),
///     BspNode::Leaf(LeafState::Air),
///     BspNode::Leaf(LeafState::Solid),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InternalNode {
    plane: Plane3D,
    coplanar: Vec<Triangle>,
    front_bucket: Vec<Triangle>,
    back_bucket: Vec<Triangle>,
    front: BspNode,
    back: BspNode,
}

impl InternalNode {
    pub(crate) fn new(
        plane: Plane3D,
        coplanar: Vec<Triangle>,
        front_bucket: Vec<Triangle>,
        back_bucket: Vec<Triangle>,
        front: BspNode,
        back: BspNode,
    ) -> Self {
        debug_assert!(!coplanar.is_empty(), "internal node needs its pivot");
        Self {
            plane,
            coplanar,
            front_bucket,
            back_bucket,
            front,
            back,
        }
    }

    /// Returns a reference to the splitting plane.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Triangles lying in the plane, pivot first.
    #[inline]
    pub fn coplanar(&self) -> &[Triangle] {
        &self.coplanar
    }

    #[inline]
    pub fn front_bucket(&self) -> &[Triangle] {
        &self.front_bucket
    }

    #[inline]
    pub fn back_bucket(&self) -> &[Triangle] {
        &self.back_bucket
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> &BspNode {
        &self.front
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> &BspNode {
        &self.back
    }

    fn take_children(&mut self) -> (BspNode, BspNode) {
        (
            std::mem::replace(&mut self.front, BspNode::Leaf(LeafState::Air)),
            std::mem::replace(&mut self.back, BspNode::Leaf(LeafState::Air)),
        )
    }
}

impl BspNode {
    pub fn internal(node: InternalNode) -> Self {
        BspNode::Internal(Box::new(node))
    }

    /// Checks if this node is a terminal leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, BspNode::Leaf(_))
    }

    /// The leaf classification, `None` for internal nodes.
    #[inline]
    pub fn state(&self) -> Option<LeafState> {
        match self {
            BspNode::Leaf(state) => Some(*state),
            BspNode::Internal(_) => None,
        }
    }

    /// The splitting plane, `None` for leaves.
    #[inline]
    pub fn plane(&self) -> Option<&Plane3D> {
        self.as_internal().map(InternalNode::plane)
    }

    #[inline]
    pub fn as_internal(&self) -> Option<&InternalNode> {
        match self {
            BspNode::Internal(node) => Some(node.as_ref()),
            BspNode::Leaf(_) => None,
        }
    }

    #[inline]
    pub fn front(&self) -> Option<&BspNode> {
        self.as_internal().map(InternalNode::front)
    }

    #[inline]
    pub fn back(&self) -> Option<&BspNode> {
        self.as_internal().map(InternalNode::back)
    }

    /// Coplanar triangles stored at this node (empty for leaves).
    pub fn coplanar(&self) -> &[Triangle] {
        match self {
            BspNode::Internal(node) => node.coplanar(),
            BspNode::Leaf(_) => &[],
        }
    }

    pub fn front_bucket(&self) -> &[Triangle] {
        match self {
            BspNode::Internal(node) => node.front_bucket(),
            BspNode::Leaf(_) => &[],
        }
    }

    pub fn back_bucket(&self) -> &[Triangle] {
        match self {
            BspNode::Internal(node) => node.back_bucket(),
            BspNode::Leaf(_) => &[],
        }
    }

    /// Iterates over this subtree in pre-order, front before back.
    ///
    /// Uses an explicit stack, so arbitrarily deep trees are fine.
    pub fn pre_order(&self) -> impl Iterator<Item = &BspNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let BspNode::Internal(n) = node {
                stack.push(&n.back);
                stack.push(&n.front);
            }
            Some(node)
        })
    }

    /// Returns the total number of coplanar triangles in this subtree.
    pub fn triangle_count(&self) -> usize {
        self.pre_order().map(|node| node.coplanar().len()).sum()
    }

    /// Number of nodes in this subtree, leaves included.
    pub fn node_count(&self) -> usize {
        self.pre_order().count()
    }

    pub fn leaf_count(&self) -> usize {
        self.pre_order().filter(|node| node.is_leaf()).count()
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let BspNode::Internal(n) = node {
                stack.push((&n.front, depth + 1));
                stack.push((&n.back, depth + 1));
            }
        }
        max_depth
    }
}

// Children are detached onto a heap stack so a degenerate chain does not
// recurse once per level.
impl Drop for BspNode {
    fn drop(&mut self) {
        let BspNode::Internal(node) = self else {
            return;
        };
        let mut stack = vec![node.take_children()];
        while let Some((front, back)) = stack.pop() {
            for mut child in [front, back] {
                if let BspNode::Internal(n) = &mut child {
                    stack.push(n.take_children());
                }
            }
        }
    }
}
