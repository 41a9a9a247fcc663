use glam::Vec3;

use crate::config::ScriptParams;
use crate::error::Result;
use crate::math::swing_about;
use crate::scene::{ControlPoint, HierarchicalObject};

/// Depth levels driven by the script, shallowest first.
pub const SCRIPTED_DEPTHS: usize = 3;

/// Closed-form periodic motion: every control point at depth 1..=3 is pulled radially
/// (in the XZ plane) away from its rest position by the sum of the per-depth terms up
/// to its own depth.
#[derive(Debug, Clone)]
pub struct ScriptedDriver {
    reference: Vec<ControlPoint>,
    params: ScriptParams,
}

impl ScriptedDriver {
    /// Snapshots the current control points of `object` as the rest pose.
    pub fn new(object: &HierarchicalObject, params: ScriptParams) -> Self {
        Self {
            reference: object.control_points(),
            params,
        }
    }

    pub fn params(&self) -> ScriptParams {
        self.params
    }

    pub fn set_params(&mut self, params: ScriptParams) {
        self.params = params;
    }

    pub fn reference(&self) -> &[ControlPoint] {
        &self.reference
    }

    /// Displacement terms for depth levels 1, 2 and 3 at `time` seconds.
    pub fn terms(&self, time: f32) -> [f32; SCRIPTED_DEPTHS] {
        let a = self.params.amplitude;
        let phase = self.params.frequency * time;
        [
            -a * phase.sin() + a / 2.0,
            a * phase.cos(),
            2.0 * a * (phase + (-0.8f32).asin()).cos(),
        ]
    }

    /// Goal position of reference point `index` at `time`, if it is driven at all.
    pub fn goal(&self, index: usize, time: f32) -> Option<Vec3> {
        let rest = self.reference.get(index)?;
        let depth = rest.depth();
        if depth == 0 || depth > SCRIPTED_DEPTHS {
            return None;
        }

        let radial = Vec3::new(rest.coords.x, 0.0, rest.coords.z).normalize_or_zero();
        if radial == Vec3::ZERO {
            return None;
        }

        let amount: f32 = self.terms(time).iter().take(depth).sum();
        Some(rest.coords + radial * amount)
    }

    /// Poses `object` for `time`. Returns the number of joints rotated.
    pub fn apply(&self, object: &mut HierarchicalObject, time: f32) -> Result<usize> {
        let mut applied = 0;

        for depth in 1..=SCRIPTED_DEPTHS {
            for (index, rest) in self.reference.iter().enumerate() {
                if rest.depth() != depth {
                    continue;
                }
                let Some(goal) = self.goal(index, time) else {
                    continue;
                };

                // Earlier rotations moved this point; read it fresh.
                let current = object.control_points();
                let Some(point) = current.get(index) else {
                    continue;
                };

                let Some(matrix) = swing_about(point.anchor, point.initial, goal) else {
                    continue;
                };
                object.transform_path(&point.indices, matrix)?;
                applied += 1;
            }
        }

        log::trace!("script: t={time:.3}, {applied} joints posed");
        Ok(applied)
    }
}
