use glam::{Mat4, Vec3};

use super::geometry::Geometry;

/// Index of a node inside its [`NodeTree`](super::NodeTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One rigid segment: its geometry, child links, and the joint points derived from
/// bounding boxes.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: usize,
    pub(crate) entry: usize,
    pub(crate) geometry: Geometry,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) anchor: Vec3,
    pub(crate) anchor_original: Vec3,
    pub(crate) control: Vec<Vec3>,
    pub(crate) control_original: Vec<Vec3>,
}

impl Node {
    pub fn new(id: usize, entry: usize, geometry: Geometry, children: Vec<NodeId>) -> Self {
        Self {
            id,
            entry,
            geometry,
            parent: None,
            children,
            anchor: Vec3::ZERO,
            anchor_original: Vec3::ZERO,
            control: Vec::new(),
            control_original: Vec::new(),
        }
    }

    /// Position among the parent's children; the path segment addressing this node.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Entry of the import arrays this node was built from.
    pub fn entry(&self) -> usize {
        self.entry
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn anchor_original(&self) -> Vec3 {
        self.anchor_original
    }

    pub fn control(&self) -> &[Vec3] {
        &self.control
    }

    pub fn control_original(&self) -> &[Vec3] {
        &self.control_original
    }

    /// Applies `matrix` to this node's geometry and joint points. With `persist` the
    /// `_original` snapshots follow as well.
    pub(crate) fn apply(&mut self, matrix: Mat4, persist: bool) {
        self.geometry.apply(matrix);

        self.anchor = matrix.transform_point3(self.anchor);
        for point in &mut self.control {
            *point = matrix.transform_point3(*point);
        }

        if persist {
            self.anchor_original = matrix.transform_point3(self.anchor_original);
            for point in &mut self.control_original {
                *point = matrix.transform_point3(*point);
            }
        }
    }

    pub(crate) fn set_joints(&mut self, anchor: Vec3, control: Vec<Vec3>) {
        self.anchor = anchor;
        self.anchor_original = anchor;
        self.control_original = control.clone();
        self.control = control;
    }

    pub(crate) fn reset(&mut self) {
        self.geometry.reset_transforms();
        self.anchor = self.anchor_original;
        self.control.clone_from(&self.control_original);
    }
}
