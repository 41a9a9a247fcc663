#![allow(dead_code)]

use glam::Vec3;
use ik_hierarchy::scene::{AnchorPolicy, HierarchicalObject, MeshData, SceneImport};

pub const EPS: f32 = 1e-4;

pub fn segment(x: f32) -> MeshData {
    MeshData::cuboid(
        Vec3::new(x, -0.1, -0.1),
        Vec3::new(x + 1.0, 0.1, 0.1),
        [1.0, 1.0, 1.0],
    )
}

/// `links` unit segments along +x starting at the origin, each the child of the previous.
pub fn chain(links: usize) -> HierarchicalObject {
    let meshes = (0..links).map(|i| segment(i as f32)).collect();
    let parents = (0..links as i32).map(|i| i - 1).collect();
    let import = SceneImport::new(meshes, (0..links).collect(), parents);
    HierarchicalObject::from_import(&import, arm_policy()).expect("valid chain")
}

/// Root segment at x in [0, 1] with two children: one continuing along +x (which has a
/// child of its own) and one hanging down in -y.
pub fn branching() -> HierarchicalObject {
    let down = MeshData::cuboid(
        Vec3::new(0.9, -1.0, -0.1),
        Vec3::new(1.1, 0.0, 0.1),
        [1.0, 1.0, 1.0],
    );
    let import = SceneImport::new(
        vec![segment(0.0), segment(1.0), down, segment(2.0)],
        vec![0, 1, 2, 3],
        vec![-1, 0, 0, 1],
    );
    HierarchicalObject::from_import(&import, arm_policy()).expect("valid branching figure")
}

pub fn arm_policy() -> AnchorPolicy {
    AnchorPolicy::parse("left", "inter", "right").expect("valid policy")
}

pub fn assert_near(actual: Vec3, expected: Vec3, tolerance: f32) {
    assert!(
        actual.abs_diff_eq(expected, tolerance),
        "expected {expected:?}, got {actual:?} (tolerance {tolerance})"
    );
}

/// Centre block with one arm of three segments hanging in -y below x = 0.7.
pub fn hanging_arm() -> HierarchicalObject {
    let mut meshes = vec![MeshData::cuboid(
        Vec3::new(-1.0, -0.5, -1.0),
        Vec3::new(1.0, 0.5, 1.0),
        [1.0, 1.0, 1.0],
    )];
    for k in 0..3 {
        let top = -0.5 - k as f32;
        meshes.push(MeshData::cuboid(
            Vec3::new(0.6, top - 1.0, -0.1),
            Vec3::new(0.8, top, 0.1),
            [1.0, 1.0, 1.0],
        ));
    }
    let import = SceneImport::new(meshes, vec![0, 1, 2, 3], vec![-1, 0, 1, 2]);
    let policy = AnchorPolicy::parse("centre", "inter", "down").expect("valid policy");
    HierarchicalObject::from_import(&import, policy).expect("valid hanging arm")
}
