//! Pre-order traversal for exporters and other read-only consumers.
//!
//! Nodes are numbered sequentially in pre-order: the root is `0`, followed by
//! its whole front subtree, then its back subtree. Identifiers are assigned
//! during the walk, so the tree itself carries no identity.

use nalgebra::Vector3;

use crate::{Plane3D, Triangle};

use super::node::{BspNode, LeafState};
use super::tree::BspTree;

/// Pre-order index of a node.
pub type NodeId = usize;

/// What a visitor sees of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeView<'a> {
    Internal {
        plane: &'a Plane3D,
        coplanar: &'a [Triangle],
        front: NodeId,
        back: NodeId,
    },
    Leaf(LeafState),
}

/// Visitor for walking a BSP tree in pre-order.
pub trait BspVisitor {
    /// Called once per node, parents before children, front before back.
    fn visit(&mut self, id: NodeId, node: NodeView<'_>);
}

/// Flattened node, as emitted by [`FlatteningVisitor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlatNode {
    Internal {
        normal: Vector3<f32>,
        d: f32,
        front: NodeId,
        back: NodeId,
    },
    Leaf(LeafState),
}

impl FlatNode {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, FlatNode::Leaf(_))
    }
}

/// Collects nodes into a vector indexed by [`NodeId`].
#[derive(Debug, Default)]
pub struct FlatteningVisitor {
    nodes: Vec<FlatNode>,
}

impl FlatteningVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[FlatNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<FlatNode> {
        self.nodes
    }
}

impl BspVisitor for FlatteningVisitor {
    fn visit(&mut self, id: NodeId, node: NodeView<'_>) {
        debug_assert_eq!(id, self.nodes.len());
        let flat = match node {
            NodeView::Internal {
                plane, front, back, ..
            } => FlatNode::Internal {
                normal: plane.normal(),
                d: plane.d(),
                front,
                back,
            },
            NodeView::Leaf(state) => FlatNode::Leaf(state),
        };
        self.nodes.push(flat);
    }
}

/// A visitor that calls a closure for each node.
pub struct FnVisitor<F>
where
    F: FnMut(NodeId, NodeView<'_>),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(NodeId, NodeView<'_>),
{
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> BspVisitor for FnVisitor<F>
where
    F: FnMut(NodeId, NodeView<'_>),
{
    fn visit(&mut self, id: NodeId, node: NodeView<'_>) {
        (self.func)(id, node);
    }
}

impl BspTree {
    /// Walks the tree in pre-order, numbering nodes as it goes.
    ///
    /// Runs in time linear in the node count and without recursion.
    pub fn walk<V: BspVisitor>(&self, visitor: &mut V) {
        let order: Vec<&BspNode> = self.root().pre_order().collect();

        // In pre-order a node's front child directly follows it and its back
        // child follows the whole front subtree. Children sit at higher ids,
        // so a reverse pass sees them first.
        let mut sizes = vec![1usize; order.len()];
        for id in (0..order.len()).rev() {
            if !order[id].is_leaf() {
                let front = id + 1;
                let back = front + sizes[front];
                sizes[id] = 1 + sizes[front] + sizes[back];
            }
        }

        for (id, node) in order.iter().enumerate() {
            let view = match node {
                BspNode::Leaf(state) => NodeView::Leaf(*state),
                BspNode::Internal(n) => {
                    let front = id + 1;
                    NodeView::Internal {
                        plane: n.plane(),
                        coplanar: n.coplanar(),
                        front,
                        back: front + sizes[front],
                    }
                }
            };
            visitor.visit(id, view);
        }
    }

    /// Flattens the tree into a pre-order vector; `nodes[0]` is the root.
    pub fn flatten(&self) -> Vec<FlatNode> {
        let mut visitor = FlatteningVisitor::new();
        self.walk(&mut visitor);
        visitor.into_nodes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::FirstTriangle;
    use crate::{axis_aligned_box, BspTree};
    use nalgebra::Point3;

    fn two_cubes() -> BspTree {
        let mut triangles = axis_aligned_box(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        triangles.extend(axis_aligned_box(Point3::new(0.5, 0.5, -1.0), Point3::new(2.0, 2.0, 0.5)));
        BspTree::from_triangles_seeded(triangles, 17)
    }

    #[test]
    fn empty_tree_flattens_to_one_leaf() {
        let flat = BspTree::new().flatten();
        assert_eq!(flat, vec![FlatNode::Leaf(LeafState::Air)]);
    }

    #[test]
    fn single_triangle_layout() {
        let tri = Triangle::from_vertices(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        let tree = BspTree::build(vec![tri], &mut FirstTriangle);
        let flat = tree.flatten();

        assert_eq!(flat.len(), 3);
        assert_eq!(
            flat[0],
            FlatNode::Internal {
                normal: tri.normal(),
                d: tri.plane().d(),
                front: 1,
                back: 2,
            }
        );
        assert_eq!(flat[1], FlatNode::Leaf(LeafState::Air));
        assert_eq!(flat[2], FlatNode::Leaf(LeafState::Solid));
    }

    #[test]
    fn flat_links_match_tree() {
        let tree = two_cubes();
        let flat = tree.flatten();
        assert_eq!(flat.len(), tree.node_count());

        // Re-walk both structures together.
        fn check(node: &BspNode, id: NodeId, flat: &[FlatNode]) {
            match (node, flat[id]) {
                (BspNode::Leaf(state), FlatNode::Leaf(flat_state)) => assert_eq!(*state, flat_state),
                (BspNode::Internal(n), FlatNode::Internal { normal, d, front, back }) => {
                    assert_eq!(n.plane().normal(), normal);
                    assert_eq!(n.plane().d(), d);
                    assert!(front > id && back > front);
                    check(n.front(), front, flat);
                    check(n.back(), back, flat);
                }
                _ => panic!("node {id} kind mismatch"),
            }
        }
        check(tree.root(), 0, &flat);
    }

    #[test]
    fn fn_visitor_sees_every_node_in_order() {
        let tree = two_cubes();
        let mut ids = Vec::new();
        let mut coplanar = 0;
        {
            let mut visitor = FnVisitor::new(|id, node: NodeView<'_>| {
                ids.push(id);
                if let NodeView::Internal { coplanar: tris, .. } = node {
                    coplanar += tris.len();
                }
            });
            tree.walk(&mut visitor);
        }
        assert_eq!(ids, (0..tree.node_count()).collect::<Vec<_>>());
        assert_eq!(coplanar, tree.triangle_count());
    }

    #[test]
    fn leaves_in_flat_view() {
        let tree = two_cubes();
        let flat = tree.flatten();
        let leaves = flat.iter().filter(|n| n.is_leaf()).count();
        assert_eq!(leaves, tree.leaf_count());
    }

    #[test]
    fn chain_ids_follow_pre_order() {
        let triangles: Vec<Triangle> = (0..500)
            .map(|i| {
                let z = i as f32;
                Triangle::from_vertices(
                    Point3::new(0.0, 0.0, z),
                    Point3::new(1.0, 0.0, z),
                    Point3::new(0.0, 1.0, z),
                )
                .unwrap()
            })
            .collect();
        let tree = BspTree::build(triangles, &mut FirstTriangle);
        let flat = tree.flatten();
        assert_eq!(flat.len(), 1001);

        // Root fronts into the chain; every later node has an air front leaf
        // and continues through its back child.
        assert_eq!(
            flat[0],
            FlatNode::Internal {
                normal: Vector3::z(),
                d: 0.0,
                front: 1,
                back: 1000,
            }
        );
        for id in (1..999).step_by(2) {
            match flat[id] {
                FlatNode::Internal { front, back, .. } => {
                    assert_eq!(front, id + 1);
                    assert_eq!(back, id + 2);
                    assert_eq!(flat[front], FlatNode::Leaf(LeafState::Air));
                }
                FlatNode::Leaf(_) => panic!("node {id} should be internal"),
            }
        }
        assert_eq!(flat[999], FlatNode::Leaf(LeafState::Solid));
        assert_eq!(flat[1000], FlatNode::Leaf(LeafState::Solid));
    }
}
