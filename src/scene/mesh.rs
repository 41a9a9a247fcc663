use glam::{Vec2, Vec3};

use super::geometry::{Geometry, Vertex};
use crate::error::{HierarchyError, Result};

const DEFAULT_NORMAL: [f32; 3] = [1.0, 1.0, 1.0];
const DEFAULT_UV: [f32; 2] = [0.0, 0.0];
const DEFAULT_TANGENT: [f32; 3] = [0.0, 1.0, 0.0];
const DEFAULT_BITANGENT: [f32; 3] = [1.0, 0.0, 0.0];

/// One mesh as handed over by the import stage.
///
/// Attribute arrays may be empty; missing entries fall back to fixed defaults.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub tangents: Vec<Vec3>,
    pub bitangents: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub diffuse: [f32; 3],
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, diffuse: [f32; 3]) -> Self {
        Self {
            positions,
            indices,
            diffuse,
            ..Default::default()
        }
    }

    /// Axis-aligned box between `min` and `max`, four vertices per face.
    pub fn cuboid(min: Vec3, max: Vec3, diffuse: [f32; 3]) -> Self {
        let faces: [(Vec3, [Vec3; 4]); 6] = [
            (
                Vec3::Z,
                [
                    Vec3::new(min.x, min.y, max.z),
                    Vec3::new(max.x, min.y, max.z),
                    Vec3::new(max.x, max.y, max.z),
                    Vec3::new(min.x, max.y, max.z),
                ],
            ),
            (
                Vec3::NEG_Z,
                [
                    Vec3::new(min.x, min.y, min.z),
                    Vec3::new(min.x, max.y, min.z),
                    Vec3::new(max.x, max.y, min.z),
                    Vec3::new(max.x, min.y, min.z),
                ],
            ),
            (
                Vec3::NEG_X,
                [
                    Vec3::new(min.x, min.y, max.z),
                    Vec3::new(min.x, max.y, max.z),
                    Vec3::new(min.x, max.y, min.z),
                    Vec3::new(min.x, min.y, min.z),
                ],
            ),
            (
                Vec3::X,
                [
                    Vec3::new(max.x, min.y, min.z),
                    Vec3::new(max.x, max.y, min.z),
                    Vec3::new(max.x, max.y, max.z),
                    Vec3::new(max.x, min.y, max.z),
                ],
            ),
            (
                Vec3::Y,
                [
                    Vec3::new(min.x, max.y, max.z),
                    Vec3::new(max.x, max.y, max.z),
                    Vec3::new(max.x, max.y, min.z),
                    Vec3::new(min.x, max.y, min.z),
                ],
            ),
            (
                Vec3::NEG_Y,
                [
                    Vec3::new(min.x, min.y, max.z),
                    Vec3::new(min.x, min.y, min.z),
                    Vec3::new(max.x, min.y, min.z),
                    Vec3::new(max.x, min.y, max.z),
                ],
            ),
        ];

        let mut mesh = Self {
            diffuse,
            ..Default::default()
        };

        for (face, (normal, corners)) in faces.iter().enumerate() {
            let base = (face * 4) as u32;
            mesh.positions.extend_from_slice(corners);
            mesh.normals.extend(std::iter::repeat(*normal).take(4));
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn to_vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex {
                position: position.to_array(),
                normal: self.normals.get(i).map_or(DEFAULT_NORMAL, |n| n.to_array()),
                color: self.diffuse,
                uv: self.uvs.get(i).map_or(DEFAULT_UV, |uv| uv.to_array()),
                tangent: self
                    .tangents
                    .get(i)
                    .map_or(DEFAULT_TANGENT, |t| t.to_array()),
                bitangent: self
                    .bitangents
                    .get(i)
                    .map_or(DEFAULT_BITANGENT, |b| b.to_array()),
            })
            .collect()
    }

    pub fn into_geometry(self) -> Geometry {
        let vertices = self.to_vertices();
        Geometry::new(vertices, self.indices)
    }
}

/// Flat hierarchy description: entry `i` uses mesh `mesh_index[i]` and hangs off
/// entry `parent_index[i]`; `-1` marks the root.
#[derive(Debug, Clone, Default)]
pub struct SceneImport {
    pub meshes: Vec<MeshData>,
    pub mesh_index: Vec<usize>,
    pub parent_index: Vec<i32>,
}

impl SceneImport {
    pub fn new(meshes: Vec<MeshData>, mesh_index: Vec<usize>, parent_index: Vec<i32>) -> Self {
        Self {
            meshes,
            mesh_index,
            parent_index,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.parent_index.len()
    }

    /// Checks array shapes and returns the root entry.
    pub fn validate(&self) -> Result<usize> {
        if self.mesh_index.len() != self.parent_index.len() {
            return Err(HierarchyError::import(format!(
                "{} mesh indices but {} parent indices",
                self.mesh_index.len(),
                self.parent_index.len()
            )));
        }

        let count = self.parent_index.len();
        let mut root = None;

        for (entry, (&mesh, &parent)) in self.mesh_index.iter().zip(&self.parent_index).enumerate() {
            if mesh >= self.meshes.len() {
                return Err(HierarchyError::import(format!(
                    "entry {entry} uses mesh {mesh}, only {} meshes supplied",
                    self.meshes.len()
                )));
            }

            match parent {
                -1 => {
                    if let Some(previous) = root.replace(entry) {
                        return Err(HierarchyError::import(format!(
                            "entries {previous} and {entry} are both roots"
                        )));
                    }
                }
                p if p < 0 || p as usize >= count || p as usize == entry => {
                    return Err(HierarchyError::import(format!(
                        "entry {entry} has invalid parent {p}"
                    )));
                }
                _ => {}
            }
        }

        root.ok_or_else(|| HierarchyError::import("no root entry (parent -1)"))
    }

    /// Entries whose parent is `entry`, in ascending order.
    pub fn children_of(&self, entry: usize) -> impl Iterator<Item = usize> + '_ {
        self.parent_index
            .iter()
            .enumerate()
            .filter(move |(_, &p)| p >= 0 && p as usize == entry)
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> MeshData {
        MeshData::cuboid(Vec3::ZERO, Vec3::ONE, [0.2, 0.4, 0.6])
    }

    #[test]
    fn cuboid_shape() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn missing_attributes_use_defaults() {
        let mesh = MeshData::new(vec![Vec3::ONE], vec![], [1.0, 0.0, 0.0]);
        let v = mesh.to_vertices()[0];
        assert_eq!(v.color, [1.0, 0.0, 0.0]);
        assert_eq!(v.normal, DEFAULT_NORMAL);
        assert_eq!(v.uv, DEFAULT_UV);
        assert_eq!(v.tangent, DEFAULT_TANGENT);
        assert_eq!(v.bitangent, DEFAULT_BITANGENT);
    }

    #[test]
    fn validate_finds_root() {
        let import = SceneImport::new(vec![cube(), cube()], vec![1, 0], vec![1, -1]);
        assert_eq!(import.validate(), Ok(1));
        assert_eq!(import.children_of(1).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn validate_rejects_bad_arrays() {
        let mismatched = SceneImport::new(vec![cube()], vec![0, 0], vec![-1]);
        assert!(matches!(
            mismatched.validate(),
            Err(HierarchyError::InvalidImport { .. })
        ));

        let two_roots = SceneImport::new(vec![cube()], vec![0, 0], vec![-1, -1]);
        assert!(two_roots.validate().is_err());

        let no_root = SceneImport::new(vec![cube()], vec![0, 0], vec![1, 0]);
        assert!(no_root.validate().is_err());

        let bad_mesh = SceneImport::new(vec![cube()], vec![3], vec![-1]);
        assert!(bad_mesh.validate().is_err());

        let bad_parent = SceneImport::new(vec![cube()], vec![0, 0], vec![-1, 7]);
        assert!(bad_parent.validate().is_err());
    }
}
