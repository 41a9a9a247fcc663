//! Kinematics module
//!
//! Single-joint FK, iterative IK over a bounded chain of ancestor joints, and the
//! scripted periodic driver. All of them act through path-scoped transforms on a
//! [`HierarchicalObject`](crate::scene::HierarchicalObject).

pub mod script;
pub mod solver;

pub use script::{ScriptedDriver, SCRIPTED_DEPTHS};
pub use solver::{forward_step, solve_chain, SolveResult};
