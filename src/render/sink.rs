use glam::Mat4;

use crate::scene::{Geometry, NodeId};

/// Receives one call per node, parents before children. Implemented by whatever
/// rasterizes the figure.
pub trait RenderSink {
    fn draw(&mut self, node: NodeId, transform: Mat4, geometry: &Geometry);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub node: NodeId,
    pub transform: Mat4,
    pub index_count: u32,
}

/// Sink that records draw calls, for headless runs.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn total_indices(&self) -> u64 {
        self.calls.iter().map(|c| c.index_count as u64).sum()
    }
}

impl RenderSink for DrawList {
    fn draw(&mut self, node: NodeId, transform: Mat4, geometry: &Geometry) {
        self.calls.push(DrawCall {
            node,
            transform,
            index_count: geometry.indices().len() as u32,
        });
    }
}
