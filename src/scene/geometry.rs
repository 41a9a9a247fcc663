use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::math::{rotation_about, BoundingBox};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

#[cfg(feature = "wgpu")]
impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x3,
        3 => Float32x2,
        4 => Float32x3,
        5 => Float32x3,
    ];

    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &Self::ATTRIBUTES,
    };
}

impl Vertex {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Vertex/index buffers of one rigid part plus its cumulative world transform.
///
/// Every operation left-multiplies onto the stored matrix (`new = op * old`), so it acts
/// in world space relative to the current placement.
#[derive(Debug, Clone)]
pub struct Geometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    transform: Mat4,
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn transform_mat(&self) -> Mat4 {
        self.transform
    }

    pub fn set_transform_mat(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Left-multiplies `matrix` onto the stored transform.
    pub fn apply(&mut self, matrix: Mat4) {
        self.transform = matrix * self.transform;
    }

    /// Rotation around `axis` through the world origin. A zero axis is ignored.
    pub fn rotate(&mut self, axis: Vec3, angle_degrees: f32) {
        if let Some(m) = rotation_about(Vec3::ZERO, axis, angle_degrees) {
            self.apply(m);
        }
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.apply(Mat4::from_translation(delta));
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.apply(Mat4::from_scale(factors));
    }

    pub fn reset_transforms(&mut self) {
        self.transform = Mat4::IDENTITY;
    }

    /// Box of every vertex position after the current transform.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(
            self.vertices
                .iter()
                .map(|v| self.transform.transform_point3(v.position())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MeshData;

    fn unit_cube() -> Geometry {
        MeshData::cuboid(Vec3::ZERO, Vec3::ONE, [1.0, 1.0, 1.0]).into_geometry()
    }

    #[test]
    fn starts_at_identity() {
        let geom = unit_cube();
        assert_eq!(geom.transform_mat(), Mat4::IDENTITY);
        assert_eq!(geom.bounding_box(), BoundingBox::new(Vec3::ZERO, Vec3::ONE));
    }

    #[test]
    fn operations_compose_in_world_space() {
        let mut geom = unit_cube();
        geom.translate(Vec3::new(2.0, 0.0, 0.0));
        // Rotating after translating swings the translated cube around the world origin.
        geom.rotate(Vec3::Z, 90.0);
        let bb = geom.bounding_box();
        assert!(bb.min.abs_diff_eq(Vec3::new(-1.0, 2.0, 0.0), 1e-5));
        assert!(bb.max.abs_diff_eq(Vec3::new(0.0, 3.0, 1.0), 1e-5));
    }

    #[test]
    fn scale_and_reset() {
        let mut geom = unit_cube();
        geom.scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(geom.bounding_box().max, Vec3::new(2.0, 3.0, 4.0));
        geom.reset_transforms();
        assert_eq!(geom.bounding_box().max, Vec3::ONE);
    }

    #[test]
    fn zero_axis_rotation_is_ignored() {
        let mut geom = unit_cube();
        geom.rotate(Vec3::ZERO, 45.0);
        assert_eq!(geom.transform_mat(), Mat4::IDENTITY);
    }

    #[test]
    fn vertices_cast_to_bytes() {
        let geom = unit_cube();
        let bytes: &[u8] = bytemuck::cast_slice(geom.vertices());
        assert_eq!(bytes.len(), geom.vertices().len() * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 17 * 4);
    }
}
