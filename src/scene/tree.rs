use glam::{Mat4, Vec3};

use super::control::ControlPoint;
use super::node::{Node, NodeId};
use super::policy::{AnchorPolicy, AnchorRule};
use crate::error::{HierarchyError, Result};
use crate::math::{about_pivot, rotation_about, BoundingBox};

/// Arena of [`Node`]s addressed by [`NodeId`].
///
/// Paths are slices of child positions read back-to-front: the last element is the first
/// hop from the node an operation starts at. Operations never consume the caller's path.
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl NodeTree {
    /// Takes ownership of an arena whose child/parent links are already consistent.
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        debug_assert!(root.0 < nodes.len());
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn anchor(&self, id: NodeId) -> Vec3 {
        self.nodes[id.0].anchor
    }

    pub fn child(&self, id: NodeId, segment: usize) -> Result<NodeId> {
        let children = &self.nodes[id.0].children;
        children
            .get(segment)
            .copied()
            .ok_or(HierarchyError::InvalidPath {
                node: id.0,
                segment,
                children: children.len(),
            })
    }

    /// Follows `path` (back-to-front) starting at `from`.
    pub fn resolve(&self, from: NodeId, path: &[usize]) -> Result<NodeId> {
        path.iter()
            .rev()
            .try_fold(from, |node, &segment| self.child(node, segment))
    }

    /// Number of hops between `id` and the root.
    pub fn depth_of(&self, id: NodeId) -> usize {
        std::iter::successors(self.nodes[id.0].parent, |p| self.nodes[p.0].parent).count()
    }

    /// Reversed root-to-node path of `id`, in the same encoding as [`ControlPoint::indices`].
    pub fn path_to(&self, id: NodeId) -> Vec<usize> {
        std::iter::successors(Some(id), |n| self.nodes[n.0].parent)
            .take_while(|n| *n != self.root)
            .map(|n| self.nodes[n.0].id)
            .collect()
    }

    /// Depth-first, self-before-children traversal of the subtree at `from`.
    pub fn walk(&self, from: NodeId) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![from],
        }
    }

    /// Every node of the tree in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.walk(self.root).map(move |id| (id, self.node(id)))
    }

    fn apply_subtree(&mut self, from: NodeId, matrix: Mat4, persist: bool) {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.0];
            node.apply(matrix, persist);
            stack.extend(node.children.iter().copied());
        }
    }

    /// Rigid rotation of the subtree at `node` around its own anchor. Updates the
    /// `_original` snapshots, making the result the new rest pose.
    pub fn rotate(&mut self, node: NodeId, axis: Vec3, angle_degrees: f32) {
        let pivot = self.anchor(node);
        self.rotate_around(node, pivot, axis, angle_degrees);
    }

    /// Rigid rotation of the subtree at `node` around `pivot`. Updates the `_original` snapshots.
    pub fn rotate_around(&mut self, node: NodeId, pivot: Vec3, axis: Vec3, angle_degrees: f32) {
        match rotation_about(pivot, axis, angle_degrees) {
            Some(matrix) => self.apply_subtree(node, matrix, true),
            None => log::warn!("ignoring rotation around a zero axis at node {}", node.0),
        }
    }

    /// Rotation of the node addressed by `path` around that node's anchor. Transient: the
    /// `_original` snapshots of the addressed subtree are left untouched.
    pub fn rotate_path(
        &mut self,
        node: NodeId,
        path: &[usize],
        axis: Vec3,
        angle_degrees: f32,
    ) -> Result<()> {
        let target = self.resolve(node, path)?;
        let pivot = self.anchor(target);
        self.rotate_target(target, pivot, axis, angle_degrees);
        Ok(())
    }

    /// Transient rotation of the node addressed by `path` around `pivot`.
    pub fn rotate_path_around(
        &mut self,
        node: NodeId,
        path: &[usize],
        pivot: Vec3,
        axis: Vec3,
        angle_degrees: f32,
    ) -> Result<()> {
        let target = self.resolve(node, path)?;
        self.rotate_target(target, pivot, axis, angle_degrees);
        Ok(())
    }

    fn rotate_target(&mut self, target: NodeId, pivot: Vec3, axis: Vec3, angle_degrees: f32) {
        match rotation_about(pivot, axis, angle_degrees) {
            Some(matrix) => self.apply_subtree(target, matrix, false),
            None => log::warn!("ignoring rotation around a zero axis at node {}", target.0),
        }
    }

    /// Left-multiplies `matrix` onto every geometry of the subtree and moves its joint
    /// points (and their snapshots) with it.
    pub fn transform(&mut self, node: NodeId, matrix: Mat4) {
        self.apply_subtree(node, matrix, true);
    }

    /// Like [`transform`](Self::transform) with `local` applied as if `pivot` were the origin.
    pub fn transform_around(&mut self, node: NodeId, pivot: Vec3, local: Mat4) {
        self.apply_subtree(node, about_pivot(pivot, local), true);
    }

    /// Transient transform of the subtree addressed by `path`.
    pub fn transform_path(&mut self, node: NodeId, path: &[usize], matrix: Mat4) -> Result<()> {
        let target = self.resolve(node, path)?;
        self.apply_subtree(target, matrix, false);
        Ok(())
    }

    /// Transient transform of the subtree addressed by `path`, with `local` conjugated by `pivot`.
    pub fn transform_path_around(
        &mut self,
        node: NodeId,
        path: &[usize],
        pivot: Vec3,
        local: Mat4,
    ) -> Result<()> {
        let target = self.resolve(node, path)?;
        self.apply_subtree(target, about_pivot(pivot, local), false);
        Ok(())
    }

    pub fn translate(&mut self, node: NodeId, delta: Vec3) {
        self.apply_subtree(node, Mat4::from_translation(delta), true);
    }

    /// Scales around the world origin.
    pub fn scale(&mut self, node: NodeId, factors: Vec3) {
        self.apply_subtree(node, Mat4::from_scale(factors), true);
    }

    /// Identity transforms for the whole subtree; joint points return to their snapshots.
    pub fn reset_transforms(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.0];
            node.reset();
            stack.extend(node.children.iter().copied());
        }
    }

    /// Union of the geometry boxes of the whole subtree.
    pub fn bounding_box(&self, node: NodeId) -> BoundingBox {
        let own = self.nodes[node.0].geometry.bounding_box();
        self.nodes[node.0]
            .children
            .iter()
            .fold(own, |acc, &child| acc.union(&self.bounding_box(child)))
    }

    /// Derives anchors and control points from the current geometry boxes and snapshots them.
    ///
    /// Children are processed before their parent records their anchors as its control
    /// points. A leaf gets a single control point from `policy.end()`.
    pub fn calculate_control_points(&mut self, policy: &AnchorPolicy) {
        let root = self.root;
        self.calculate_node(root, None, policy);
    }

    fn calculate_node(&mut self, id: NodeId, parent_box: Option<BoundingBox>, policy: &AnchorPolicy) {
        let own_box = self.nodes[id.0].geometry.bounding_box();
        let children = self.nodes[id.0].children.clone();

        let control = if children.is_empty() {
            vec![rule_point(policy.end(), &own_box, None)]
        } else {
            children
                .iter()
                .map(|&child| {
                    self.calculate_node(child, Some(own_box), policy);
                    self.anchor(child)
                })
                .collect()
        };

        let rule = if parent_box.is_some() {
            policy.middle()
        } else {
            policy.first()
        };
        let anchor = rule_point(rule, &own_box, parent_box.as_ref());

        self.nodes[id.0].set_joints(anchor, control);
    }

    /// All control points of the subtree at `node`, this node's first, then each child's
    /// subtree in order. Each point's path is relative to `node`.
    pub fn control_points(&self, node: NodeId) -> Vec<ControlPoint> {
        let current = &self.nodes[node.0];
        let mut points: Vec<ControlPoint> = current
            .control
            .iter()
            .map(|&c| ControlPoint::new(c, current.anchor))
            .collect();

        for (segment, &child) in current.children.iter().enumerate() {
            let mut below = self.control_points(child);
            for point in &mut below {
                point.indices.push(segment);
            }
            points.extend(below);
        }

        points
    }

    /// Bone chain for driving `ctrl`: up to `links` points, starting at the node owning
    /// `ctrl` and moving toward `node`. Each link's `anchor` is the pivot to rotate, its
    /// `indices` the path to that pivot's node, and its `coords` the previous link's anchor
    /// (the first link starts at `ctrl` itself).
    pub fn ordered_control_points(
        &self,
        node: NodeId,
        links: usize,
        ctrl: &ControlPoint,
    ) -> Result<Vec<ControlPoint>> {
        self.ordered_from(node, links, ctrl, &ctrl.indices)
    }

    fn ordered_from(
        &self,
        node: NodeId,
        links: usize,
        ctrl: &ControlPoint,
        remaining: &[usize],
    ) -> Result<Vec<ControlPoint>> {
        let mut chain = match remaining.split_last() {
            Some((&segment, rest)) => {
                let child = self.child(node, segment)?;
                let mut chain = self.ordered_from(child, links, ctrl, rest)?;
                for link in &mut chain {
                    link.indices.push(segment);
                }
                chain
            }
            None => Vec::new(),
        };

        if chain.len() < links {
            let (coords, initial) = match chain.last() {
                Some(previous) => (previous.anchor, previous.anchor),
                None => (ctrl.coords, ctrl.initial),
            };
            chain.push(ControlPoint {
                coords,
                initial,
                anchor: self.anchor(node),
                indices: Vec::new(),
            });
        }

        Ok(chain)
    }
}

fn rule_point(rule: AnchorRule, own: &BoundingBox, parent: Option<&BoundingBox>) -> Vec3 {
    // `Inter` without a parent is rejected by AnchorPolicy::new.
    rule.point(own, parent).unwrap_or_else(|| own.centre())
}

/// Iterator returned by [`NodeTree::walk`].
pub struct Walk<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.nodes[id.0].children.iter().rev().copied());
        Some(id)
    }
}
