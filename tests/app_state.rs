mod common;

use common::{assert_near, chain, hanging_arm};
use glam::Vec3;
use ik_hierarchy::{
    AppState, Camera, CameraCommand, DrawList, HierarchyError, InputEvent, KinematicMode,
    ScriptParams, SolverConfig,
};

fn app() -> AppState {
    AppState::new(
        vec![chain(2), hanging_arm()],
        Camera::default(),
        SolverConfig::default(),
        ScriptParams::default(),
    )
    .unwrap()
}

fn press_on(app: &mut AppState, world: Vec3) {
    let screen = app.camera().project(world).unwrap();
    app.handle(InputEvent::Press { x: screen.x, y: screen.y });
}

#[test]
fn needs_an_object_and_a_valid_config() {
    let empty = AppState::new(vec![], Camera::default(), SolverConfig::default(), ScriptParams::default());
    assert!(matches!(empty, Err(HierarchyError::Config { .. })));

    let bad = AppState::new(
        vec![chain(2)],
        Camera::default(),
        SolverConfig::new(0),
        ScriptParams::default(),
    );
    assert!(matches!(bad, Err(HierarchyError::Config { .. })));
}

#[test]
fn press_selects_nearest_point_and_release_clears() {
    let mut app = app();
    assert_eq!(app.mode(), KinematicMode::Forward);

    press_on(&mut app, Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(app.moving_joint(), Some(1));

    // A held joint is not replaced by another press.
    press_on(&mut app, Vec3::X);
    assert_eq!(app.moving_joint(), Some(1));

    app.handle(InputEvent::Release);
    assert_eq!(app.moving_joint(), None);

    press_on(&mut app, Vec3::new(0.0, 4.0, 0.0));
    assert_eq!(app.moving_joint(), None);
}

#[test]
fn forward_drag_moves_the_held_joint() {
    let mut app = app();
    press_on(&mut app, Vec3::new(2.0, 0.0, 0.0));

    app.handle(InputEvent::DragTo(Vec3::new(1.0, 1.0, 0.0)));
    assert!(app.selected().unwrap().is_displaced());
    app.update(0.1).unwrap();

    assert_near(app.control_points()[1].coords, Vec3::new(1.0, 1.0, 0.0), 1e-4);
    assert!(!app.control_points()[1].is_displaced());
    assert_eq!(app.moving_joint(), Some(1));
}

#[test]
fn pointer_drag_stays_on_the_joint_depth() {
    let mut app = app();
    press_on(&mut app, Vec3::new(2.0, 0.0, 0.0));

    let cursor = app.camera().project(Vec3::new(1.0, 1.0, 0.0)).unwrap();
    app.handle(InputEvent::Drag { x: cursor.x, y: cursor.y });
    app.update(0.1).unwrap();

    assert_near(app.control_points()[1].coords, Vec3::new(1.0, 1.0, 0.0), 1e-2);
}

#[test]
fn inverse_mode_runs_the_solver() {
    let mut app = app();
    app.set_mode(KinematicMode::Inverse);
    app.set_ik_level(99);
    assert_eq!(app.config().ik_level, app.max_ik_level());
    assert_eq!(app.max_ik_level(), 2);

    press_on(&mut app, Vec3::new(2.0, 0.0, 0.0));
    app.handle(InputEvent::DragTo(Vec3::new(1.0, 1.0, 0.0)));
    app.update(0.1).unwrap();

    let result = app.last_solve().unwrap();
    assert_eq!(result.chain_length, 2);
    assert!(result.iterations <= 8);

    // No new drag, no new solve.
    let iterations = result.iterations;
    app.update(0.2).unwrap();
    assert_eq!(app.last_solve().unwrap().iterations, iterations);
}

#[test]
fn mode_switch_drops_the_held_joint() {
    let mut app = app();
    press_on(&mut app, Vec3::new(2.0, 0.0, 0.0));
    app.set_mode(KinematicMode::Inverse);
    assert_eq!(app.moving_joint(), None);
}

#[test]
fn scripted_mode_poses_the_active_object() {
    let mut app = app();
    assert!(app.select_object(5).is_err());
    app.select_object(1).unwrap();
    assert_eq!(app.control_points().len(), 4);

    let rest = app.control_points()[3].coords;
    app.set_mode(KinematicMode::Scripted);
    app.update(1.0).unwrap();
    assert!(app.control_points()[3].coords.distance(rest) > 0.1);
    assert_eq!(app.time(), 1.0);

    app.reset_pose();
    assert_near(app.control_points()[3].coords, rest, 1e-4);

    // Inactive objects are untouched.
    assert_eq!(app.objects()[0].control_points(), chain(2).control_points());
}

#[test]
fn script_params_apply_to_every_object() {
    let mut app = app();
    app.set_script_params(ScriptParams::new(1.0, 2.0));
    app.select_object(1).unwrap();
    assert_eq!(app.script_params(), ScriptParams::new(1.0, 2.0));
}

#[test]
fn camera_events_reach_the_camera() {
    let mut app = app();
    app.handle(InputEvent::Resize { width: 800, height: 600 });
    assert_eq!((app.camera().width, app.camera().height), (800, 600));

    let before = app.camera().position;
    app.handle(InputEvent::Camera(CameraCommand::RotateLeft));
    assert!(app.camera().position.distance(before) > 1e-3);
}

#[test]
fn draw_forwards_the_active_object() {
    let mut app = app();
    let mut frame = DrawList::new();
    app.draw(&mut frame);
    assert_eq!(frame.len(), 2);

    frame.clear();
    app.select_object(1).unwrap();
    app.draw(&mut frame);
    assert_eq!(frame.len(), 4);
}
