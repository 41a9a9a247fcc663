use glam::{Mat4, Vec3};

use super::control::ControlPoint;
use super::geometry::Geometry;
use super::mesh::SceneImport;
use super::node::{Node, NodeId};
use super::policy::AnchorPolicy;
use super::tree::NodeTree;
use crate::error::{HierarchyError, Result};
use crate::math::BoundingBox;
use crate::render::RenderSink;

/// An articulated figure: the node tree built from one import plus the anchor policy
/// used to derive its joints.
///
/// Object-level unscoped rotations and transforms pivot around the world origin; the
/// path-scoped variants address nodes from the root.
#[derive(Debug, Clone)]
pub struct HierarchicalObject {
    tree: NodeTree,
    policy: AnchorPolicy,
}

impl HierarchicalObject {
    pub fn from_import(import: &SceneImport, policy: AnchorPolicy) -> Result<Self> {
        let root_entry = import.validate()?;

        let mut nodes = Vec::with_capacity(import.entry_count());
        let root = load_node(import, root_entry, 0, &mut nodes);

        if nodes.len() != import.entry_count() {
            return Err(HierarchyError::import(format!(
                "{} of {} entries are not reachable from root entry {root_entry}",
                import.entry_count() - nodes.len(),
                import.entry_count()
            )));
        }

        let mut tree = NodeTree::from_parts(nodes, root);
        tree.calculate_control_points(&policy);

        log::debug!(
            "built hierarchy: {} nodes, root entry {}, policy {}/{}/{}",
            tree.len(),
            root_entry,
            policy.first(),
            policy.middle(),
            policy.end()
        );

        Ok(Self { tree, policy })
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn root(&self) -> &Node {
        self.tree.node(self.tree.root())
    }

    pub fn policy(&self) -> &AnchorPolicy {
        &self.policy
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.tree.bounding_box(self.tree.root())
    }

    pub fn control_points(&self) -> Vec<ControlPoint> {
        self.tree.control_points(self.tree.root())
    }

    pub fn ordered_control_points(&self, links: usize, ctrl: &ControlPoint) -> Result<Vec<ControlPoint>> {
        self.tree.ordered_control_points(self.tree.root(), links, ctrl)
    }

    /// Longest bone chain any control point allows.
    pub fn max_chain_length(&self) -> usize {
        self.control_points()
            .iter()
            .map(|p| p.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Recomputes joints from the current geometry and makes them the new snapshots.
    pub fn recalculate_control_points(&mut self) {
        self.tree.calculate_control_points(&self.policy);
    }

    pub fn reset_transforms(&mut self) {
        let root = self.tree.root();
        self.tree.reset_transforms(root);
    }

    pub fn rotate(&mut self, axis: Vec3, angle_degrees: f32) {
        let root = self.tree.root();
        self.tree.rotate_around(root, Vec3::ZERO, axis, angle_degrees);
    }

    pub fn rotate_around(&mut self, pivot: Vec3, axis: Vec3, angle_degrees: f32) {
        let root = self.tree.root();
        self.tree.rotate_around(root, pivot, axis, angle_degrees);
    }

    pub fn rotate_path(&mut self, path: &[usize], axis: Vec3, angle_degrees: f32) -> Result<()> {
        let root = self.tree.root();
        self.tree.rotate_path(root, path, axis, angle_degrees)
    }

    pub fn rotate_path_around(
        &mut self,
        path: &[usize],
        pivot: Vec3,
        axis: Vec3,
        angle_degrees: f32,
    ) -> Result<()> {
        let root = self.tree.root();
        self.tree.rotate_path_around(root, path, pivot, axis, angle_degrees)
    }

    pub fn translate(&mut self, delta: Vec3) {
        let root = self.tree.root();
        self.tree.translate(root, delta);
    }

    pub fn scale(&mut self, factors: Vec3) {
        let root = self.tree.root();
        self.tree.scale(root, factors);
    }

    pub fn transform(&mut self, matrix: Mat4) {
        let root = self.tree.root();
        self.tree.transform(root, matrix);
    }

    pub fn transform_around(&mut self, pivot: Vec3, local: Mat4) {
        let root = self.tree.root();
        self.tree.transform_around(root, pivot, local);
    }

    pub fn transform_path(&mut self, path: &[usize], matrix: Mat4) -> Result<()> {
        let root = self.tree.root();
        self.tree.transform_path(root, path, matrix)
    }

    pub fn transform_path_around(&mut self, path: &[usize], pivot: Vec3, local: Mat4) -> Result<()> {
        let root = self.tree.root();
        self.tree.transform_path_around(root, path, pivot, local)
    }

    /// Hands every node to `sink`, parents before their children.
    pub fn draw<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        for (id, node) in self.tree.iter() {
            sink.draw(id, node.geometry().transform_mat(), node.geometry());
        }
    }
}

/// Builds the subtree of `entry` into `nodes`, children before their parent.
fn load_node(import: &SceneImport, entry: usize, sibling: usize, nodes: &mut Vec<Node>) -> NodeId {
    let children: Vec<NodeId> = import
        .children_of(entry)
        .enumerate()
        .map(|(position, child)| load_node(import, child, position, nodes))
        .collect();

    let mesh = &import.meshes[import.mesh_index[entry]];
    let geometry = Geometry::new(mesh.to_vertices(), mesh.indices.clone());

    let id = NodeId(nodes.len());
    for child in &children {
        nodes[child.0].parent = Some(id);
    }
    nodes.push(Node::new(sibling, entry, geometry, children));
    id
}
