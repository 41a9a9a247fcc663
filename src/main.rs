use glam::Vec3;
use ik_hierarchy::scene::{AnchorPolicy, HierarchicalObject, MeshData, SceneImport};
use ik_hierarchy::{
    AppState, Camera, CameraCommand, DrawList, HierarchyError, InputEvent, KinematicMode,
    ScriptParams, SolverConfig,
};

const FRAME: f32 = 1.0 / 60.0;

/// Five segments laid end to end along +x.
fn worm() -> Result<HierarchicalObject, HierarchyError> {
    let meshes = (0..5)
        .map(|i| {
            let x = i as f32 - 2.5;
            MeshData::cuboid(
                Vec3::new(x, -0.3, -0.3),
                Vec3::new(x + 1.0, 0.3, 0.3),
                [0.35, 0.7, 0.3],
            )
        })
        .collect();
    let import = SceneImport::new(meshes, vec![0, 1, 2, 3, 4], vec![-1, 0, 1, 2, 3]);
    HierarchicalObject::from_import(&import, AnchorPolicy::parse("left", "inter", "right")?)
}

/// A bell with four arms of three segments hanging below it.
fn jelly() -> Result<HierarchicalObject, HierarchyError> {
    let mut meshes = vec![MeshData::cuboid(
        Vec3::new(-1.0, -0.5, -1.0),
        Vec3::new(1.0, 0.5, 1.0),
        [0.8, 0.5, 0.9],
    )];
    let mut parents = vec![-1];

    for (ax, az) in [(0.7, 0.0), (0.0, 0.7), (-0.7, 0.0), (0.0, -0.7)] {
        for segment in 0..3 {
            let top = -0.5 - segment as f32;
            meshes.push(MeshData::cuboid(
                Vec3::new(ax - 0.1, top - 1.0, az - 0.1),
                Vec3::new(ax + 0.1, top, az + 0.1),
                [0.9, 0.6, 1.0],
            ));
            let parent = if segment == 0 { 0 } else { meshes.len() as i32 - 2 };
            parents.push(parent);
        }
    }

    let mesh_index = (0..meshes.len()).collect();
    let import = SceneImport::new(meshes, mesh_index, parents);
    HierarchicalObject::from_import(&import, AnchorPolicy::parse("centre", "inter", "down")?)
}

fn drag_tip(app: &mut AppState, offset: Vec3, time: &mut f32) -> Result<(), HierarchyError> {
    let tip = app.control_points().len() - 1;
    let start = app.control_points()[tip].coords;
    let Some(screen) = app.camera().project(start) else {
        return Ok(());
    };

    app.handle(InputEvent::Press { x: screen.x, y: screen.y });
    for step in 1..=10 {
        app.handle(InputEvent::DragTo(start + offset * step as f32 / 10.0));
        *time += FRAME;
        app.update(*time)?;
    }
    app.handle(InputEvent::Release);

    let reached = app.control_points()[tip].coords;
    log::info!(
        "{:?}: tip moved {:?} -> {:?} (target {:?})",
        app.mode(),
        start,
        reached,
        start + offset
    );
    Ok(())
}

fn main() -> Result<(), HierarchyError> {
    env_logger::init();

    let camera = Camera::new(Vec3::new(0.0, 0.0, 15.0), Vec3::NEG_Z, 1400, 800);
    let mut app = AppState::new(
        vec![worm()?, jelly()?],
        camera,
        SolverConfig::default(),
        ScriptParams::default(),
    )?;
    let mut time = 0.0;

    app.set_mode(KinematicMode::Forward);
    drag_tip(&mut app, Vec3::new(0.0, 1.0, 0.0), &mut time)?;
    app.reset_pose();

    app.set_mode(KinematicMode::Inverse);
    app.set_ik_level(app.max_ik_level());
    drag_tip(&mut app, Vec3::new(-1.0, 2.0, 0.0), &mut time)?;
    if let Some(result) = app.last_solve() {
        log::info!(
            "last IK solve: {} links, {} iterations, distance {:.4}, converged {}",
            result.chain_length,
            result.iterations,
            result.final_distance,
            result.converged
        );
    }

    app.select_object(1)?;
    app.set_mode(KinematicMode::Scripted);
    for _ in 0..120 {
        time += FRAME;
        app.update(time)?;
        app.handle(InputEvent::Camera(CameraCommand::RotateRight));
    }

    let mut frame = DrawList::new();
    app.draw(&mut frame);
    log::info!(
        "jelly after {:.1}s: {} draw calls, {} indices, bounds {:?}",
        time,
        frame.len(),
        frame.total_indices(),
        app.active_object().bounding_box()
    );

    Ok(())
}
