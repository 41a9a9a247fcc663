//! Scene graph module
//!
//! Geometry, the node arena, anchor policies and the hierarchical object built on top.

pub mod control;
pub mod geometry;
pub mod mesh;
pub mod node;
pub mod object;
pub mod policy;
pub mod tree;

pub use control::ControlPoint;
pub use geometry::{Geometry, Vertex};
pub use mesh::{MeshData, SceneImport};
pub use node::{Node, NodeId};
pub use object::HierarchicalObject;
pub use policy::{AnchorPolicy, AnchorRule};
pub use tree::{NodeTree, Walk};
