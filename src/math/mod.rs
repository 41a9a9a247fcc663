//! Math utilities module
//!
//! Bounding boxes, pivot matrices and shortest-arc rotations on top of glam.

mod bounds;
mod transform;

pub use bounds::BoundingBox;
pub use transform::{about_pivot, rotation_about, shortest_arc, swing_about};

// Re-export commonly used glam types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
