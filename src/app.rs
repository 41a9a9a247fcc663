//! Per-frame application state: which figure is active, which joint is held, and how
//! it is being driven.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::{ScriptParams, SolverConfig};
use crate::error::{HierarchyError, Result};
use crate::ik::{forward_step, solve_chain, ScriptedDriver, SolveResult};
use crate::render::{Camera, CameraCommand, RenderSink};
use crate::scene::{ControlPoint, HierarchicalObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KinematicMode {
    #[default]
    Forward,
    Inverse,
    Scripted,
}

/// High-level input delivered by the windowing layer. Screen coordinates are pixels
/// from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Button down: selects the nearest control point if none is held.
    Press { x: f32, y: f32 },
    /// Pointer moved with the button held.
    Drag { x: f32, y: f32 },
    /// Drag the held point straight to a world position.
    DragTo(Vec3),
    Release,
    Resize { width: u32, height: u32 },
    Camera(CameraCommand),
}

pub struct AppState {
    objects: Vec<HierarchicalObject>,
    scripts: Vec<ScriptedDriver>,
    active: usize,
    mode: KinematicMode,
    control_points: Vec<ControlPoint>,
    moving_joint: Option<usize>,
    camera: Camera,
    config: SolverConfig,
    time: f32,
    last_solve: Option<SolveResult>,
}

impl AppState {
    pub fn new(
        objects: Vec<HierarchicalObject>,
        camera: Camera,
        config: SolverConfig,
        script: ScriptParams,
    ) -> Result<Self> {
        config.validate()?;
        let Some(first) = objects.first() else {
            return Err(HierarchyError::Config {
                reason: "at least one object is required".into(),
            });
        };

        let control_points = first.control_points();
        let scripts = objects
            .iter()
            .map(|object| ScriptedDriver::new(object, script))
            .collect();

        Ok(Self {
            objects,
            scripts,
            active: 0,
            mode: KinematicMode::default(),
            control_points,
            moving_joint: None,
            camera,
            config,
            time: 0.0,
            last_solve: None,
        })
    }

    pub fn active_object(&self) -> &HierarchicalObject {
        &self.objects[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn objects(&self) -> &[HierarchicalObject] {
        &self.objects
    }

    pub fn select_object(&mut self, index: usize) -> Result<()> {
        if index >= self.objects.len() {
            return Err(HierarchyError::Config {
                reason: format!("object {index} does not exist ({} loaded)", self.objects.len()),
            });
        }
        self.active = index;
        self.moving_joint = None;
        self.refresh();
        Ok(())
    }

    pub fn mode(&self) -> KinematicMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: KinematicMode) {
        if mode != self.mode {
            log::debug!("kinematic mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.moving_joint = None;
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Largest IK level the active figure supports.
    pub fn max_ik_level(&self) -> usize {
        self.active_object().max_chain_length().max(1)
    }

    /// Sets the IK level, clamped to `1..=max_ik_level()`.
    pub fn set_ik_level(&mut self, level: usize) {
        self.config.ik_level = level.clamp(1, self.max_ik_level());
    }

    pub fn script_params(&self) -> ScriptParams {
        self.scripts[self.active].params()
    }

    pub fn set_script_params(&mut self, params: ScriptParams) {
        for script in &mut self.scripts {
            script.set_params(params);
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    pub fn moving_joint(&self) -> Option<usize> {
        self.moving_joint
    }

    pub fn selected(&self) -> Option<&ControlPoint> {
        self.moving_joint.and_then(|i| self.control_points.get(i))
    }

    pub fn last_solve(&self) -> Option<SolveResult> {
        self.last_solve
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press { x, y } => {
                if self.moving_joint.is_none() {
                    self.moving_joint = self.camera.pick(
                        self.control_points.iter().map(|p| p.coords),
                        Vec2::new(x, y),
                        self.config.select_radius,
                    );
                    if let Some(joint) = self.moving_joint {
                        log::debug!("selected control point {joint}");
                    }
                }
            }
            InputEvent::Drag { x, y } => {
                let Some(joint) = self.moving_joint else {
                    return;
                };
                let initial = self.control_points[joint].initial;
                if let Some(world) = self.camera.unproject_at_depth_of(Vec2::new(x, y), initial) {
                    self.control_points[joint].drag_to(world);
                }
            }
            InputEvent::DragTo(world) => {
                if let Some(joint) = self.moving_joint {
                    self.control_points[joint].drag_to(world);
                }
            }
            InputEvent::Release => self.moving_joint = None,
            InputEvent::Resize { width, height } => self.camera.set_viewport(width, height),
            InputEvent::Camera(command) => self.camera.apply(command),
        }
    }

    /// Runs one kinematics tick for the active figure at `time` seconds, then re-reads
    /// its control points.
    pub fn update(&mut self, time: f32) -> Result<()> {
        self.time = time;
        let object = &mut self.objects[self.active];

        match self.mode {
            KinematicMode::Forward => {
                if let Some(point) = self.moving_joint.and_then(|i| self.control_points.get(i)) {
                    forward_step(object, point)?;
                }
            }
            KinematicMode::Inverse => {
                if let Some(joint) = self.moving_joint {
                    let point = &self.control_points[joint];
                    if point.is_displaced() {
                        let target = point.coords;
                        self.last_solve = Some(solve_chain(object, joint, target, &self.config)?);
                    }
                }
            }
            KinematicMode::Scripted => {
                self.scripts[self.active].apply(object, time)?;
            }
        }

        self.refresh();
        Ok(())
    }

    /// Puts the active figure back in its rest pose.
    pub fn reset_pose(&mut self) {
        self.objects[self.active].reset_transforms();
        self.moving_joint = None;
        self.refresh();
    }

    pub fn draw<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        self.active_object().draw(sink);
    }

    fn refresh(&mut self) {
        self.control_points = self.objects[self.active].control_points();
    }
}
