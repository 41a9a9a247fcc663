use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::shortest_arc;

const ORBIT_STEP_DEGREES: f32 = 1.0;
const ORBIT_NUDGE: f32 = 0.2;

/// Orbit commands issued by the UI; all of them turn the camera around the world origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraCommand {
    RotateLeft,
    RotateRight,
    RotateUp,
    RotateDown,
}

/// Perspective camera with a pixel viewport whose origin is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 15.0),
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 45.0,
            near: 0.1,
            far: 300.0,
            width: 1400,
            height: 800,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, direction: Vec3, width: u32, height: u32) -> Self {
        Self {
            position,
            direction: direction.normalize_or_zero(),
            width,
            height,
            ..Default::default()
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Screen position (pixels, y down) and NDC depth of `world`. `None` for points on or
    /// behind the camera plane.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w < f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
            ndc.z,
        ))
    }

    /// Inverse of [`project`](Self::project): pixel coordinates plus NDC depth to world.
    pub fn unproject(&self, screen: Vec3) -> Vec3 {
        let ndc = Vec3::new(
            2.0 * screen.x / self.width as f32 - 1.0,
            1.0 - 2.0 * screen.y / self.height as f32,
            screen.z,
        );
        let world = self.view_projection().inverse() * ndc.extend(1.0);
        world.truncate() / world.w
    }

    /// World point under `cursor` at the same depth as `reference`.
    pub fn unproject_at_depth_of(&self, cursor: Vec2, reference: Vec3) -> Option<Vec3> {
        let depth = self.project(reference)?.z;
        Some(self.unproject(cursor.extend(depth)))
    }

    /// Index of the point nearest to `cursor` on screen, if within `radius` pixels.
    pub fn pick<I>(&self, points: I, cursor: Vec2, radius: f32) -> Option<usize>
    where
        I: IntoIterator<Item = Vec3>,
    {
        points
            .into_iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let screen = self.project(p)?;
                Some((i, screen.truncate().distance(cursor)))
            })
            .filter(|(_, d)| *d < radius)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
    }

    pub fn apply(&mut self, command: CameraCommand) {
        let rotation = match command {
            CameraCommand::RotateLeft => Mat4::from_rotation_y(-ORBIT_STEP_DEGREES.to_radians()),
            CameraCommand::RotateRight => Mat4::from_rotation_y(ORBIT_STEP_DEGREES.to_radians()),
            CameraCommand::RotateUp => self.nudge(ORBIT_NUDGE),
            CameraCommand::RotateDown => self.nudge(-ORBIT_NUDGE),
        };

        self.position = rotation.transform_point3(self.position);
        self.direction = rotation.transform_vector3(self.direction).normalize_or_zero();
        self.up = rotation.transform_vector3(self.up).normalize_or_zero();
    }

    /// Rotation carrying the camera position a little along its up vector.
    fn nudge(&self, amount: f32) -> Mat4 {
        shortest_arc(self.position, self.position + self.up * amount)
            .map(Mat4::from_quat)
            .unwrap_or(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_unproject_round_trip() {
        let camera = Camera::default();
        let world = Vec3::new(1.5, -0.5, 2.0);
        let screen = camera.project(world).unwrap();
        assert!(camera.unproject(screen).abs_diff_eq(world, 1e-2));
    }

    #[test]
    fn origin_projects_to_viewport_centre() {
        let camera = Camera::default();
        let screen = camera.project(Vec3::ZERO).unwrap();
        assert!((screen.x - 700.0).abs() < 1e-3);
        assert!((screen.y - 400.0).abs() < 1e-3);
    }

    #[test]
    fn screen_y_grows_downward() {
        let camera = Camera::default();
        let above = camera.project(Vec3::Y).unwrap();
        let centre = camera.project(Vec3::ZERO).unwrap();
        assert!(above.y < centre.y);
    }

    #[test]
    fn pick_respects_radius() {
        let camera = Camera::default();
        let points = [Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)];
        let centre = camera.project(Vec3::ZERO).unwrap().truncate();
        assert_eq!(camera.pick(points, centre + Vec2::new(4.0, 0.0), 10.0), Some(0));
        assert_eq!(camera.pick(points, centre + Vec2::new(0.0, 40.0), 10.0), None);
    }

    #[test]
    fn points_behind_the_camera_are_not_picked() {
        let camera = Camera::default();
        let behind = Vec3::new(0.0, 0.0, 20.0);
        assert!(camera.project(behind).is_none());

        let centre = camera.project(Vec3::ZERO).unwrap().truncate();
        assert_eq!(camera.pick([behind], centre, 10.0), None);
        assert_eq!(camera.pick([behind, Vec3::ZERO], centre, 10.0), Some(1));
    }

    #[test]
    fn orbit_keeps_distance_to_origin() {
        let mut camera = Camera::default();
        let distance = camera.position.length();
        for command in [
            CameraCommand::RotateLeft,
            CameraCommand::RotateUp,
            CameraCommand::RotateRight,
            CameraCommand::RotateDown,
        ] {
            camera.apply(command);
            assert!((camera.position.length() - distance).abs() < 1e-3);
        }
    }
}
