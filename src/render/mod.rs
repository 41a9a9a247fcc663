//! Rendering boundary
//!
//! Camera math used for picking and dragging, and the sink trait a renderer implements
//! to receive resolved node transforms.

pub mod camera;
pub mod sink;

pub use camera::{Camera, CameraCommand};
pub use sink::{DrawCall, DrawList, RenderSink};
