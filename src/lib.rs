//! # ik-hierarchy
//!
//! Hierarchical scene-graph transforms and kinematics for articulated figures.
//!
//! ## Features
//! - Node arena built from flat mesh/parent arrays, with path-addressed transforms
//! - Joint anchors and control points derived from bounding boxes
//! - Single-joint forward kinematics and bounded iterative inverse kinematics
//! - Scripted periodic posing
//! - Camera picking/dragging and a render sink for any rasterizer
//!
//! ## Example
//! ```rust,ignore
//! use ik_hierarchy::scene::{AnchorPolicy, HierarchicalObject, MeshData, SceneImport};
//! use ik_hierarchy::{ik, SolverConfig};
//! use glam::Vec3;
//!
//! let segment = |x: f32| MeshData::cuboid(Vec3::new(x, -0.1, -0.1), Vec3::new(x + 1.0, 0.1, 0.1), [1.0; 3]);
//! let import = SceneImport::new(vec![segment(0.0), segment(1.0), segment(2.0)], vec![0, 1, 2], vec![-1, 0, 1]);
//! let mut arm = HierarchicalObject::from_import(&import, AnchorPolicy::parse("left", "inter", "right")?)?;
//!
//! // Drive the tip of the arm toward a target with a 3-link chain.
//! let tip = arm.control_points().len() - 1;
//! let result = ik::solve_chain(&mut arm, tip, Vec3::new(1.5, 1.5, 0.0), &SolverConfig::new(3))?;
//! println!("Converged: {}, iterations: {}", result.converged, result.iterations);
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod ik;
pub mod math;
pub mod render;
pub mod scene;

pub use app::{AppState, InputEvent, KinematicMode};
pub use config::{ScriptParams, SolverConfig};
pub use error::{HierarchyError, Result};
pub use ik::{forward_step, solve_chain, ScriptedDriver, SolveResult};
pub use math::BoundingBox;
pub use render::{Camera, CameraCommand, DrawList, RenderSink};
pub use scene::{
    AnchorPolicy, AnchorRule, ControlPoint, Geometry, HierarchicalObject, MeshData, Node, NodeId,
    NodeTree, SceneImport, Vertex,
};
