use glam::Vec3;

use crate::config::SolverConfig;
use crate::error::{HierarchyError, Result};
use crate::math::swing_about;
use crate::scene::{ControlPoint, HierarchicalObject};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    pub converged: bool,
    /// Single-link rotations applied, capped at `chain_length³`.
    pub iterations: u32,
    pub final_distance: f32,
    pub chain_length: usize,
}

/// Upper bound on single-link rotations for a chain of `chain_length` links.
fn iteration_cap(chain_length: usize) -> u32 {
    u32::try_from(chain_length).map_or(u32::MAX, |n| n.saturating_pow(3))
}

/// Swings the subtree at `link`'s path around its anchor so that `current` points at `goal`.
/// Returns `false` when either direction is degenerate.
fn swing_link(
    object: &mut HierarchicalObject,
    link: &ControlPoint,
    current: Vec3,
    goal: Vec3,
) -> Result<bool> {
    let Some(matrix) = swing_about(link.anchor, current, goal) else {
        return Ok(false);
    };
    object.transform_path(&link.indices, matrix)?;
    Ok(true)
}

/// Single-joint FK: rotates the joint owning `point` so its `initial` position turns
/// toward the dragged `coords`. A point that has not been dragged is left alone.
pub fn forward_step(object: &mut HierarchicalObject, point: &ControlPoint) -> Result<bool> {
    if !point.is_displaced() {
        return Ok(false);
    }

    let applied = swing_link(object, point, point.initial, point.coords)?;
    if applied {
        log::trace!(
            "fk: swung joint at {:?} toward {:?} (path {:?})",
            point.anchor,
            point.coords,
            point.indices
        );
    }
    Ok(applied)
}

/// Iterative IK toward `target` for the control point at `joint` in
/// [`HierarchicalObject::control_points`] order.
///
/// Each pass rotates every link of the chain (owner outward) so the effector, re-read
/// after every rotation, points at the target from that link's anchor. Passes repeat
/// while some link still moves the effector by at least `config.move_threshold`, and stop
/// unconditionally once `chain_length³` rotations have been applied. The result is
/// `converged` when the effector ends within `config.reach_tolerance` of the target.
pub fn solve_chain(
    object: &mut HierarchicalObject,
    joint: usize,
    target: Vec3,
    config: &SolverConfig,
) -> Result<SolveResult> {
    config.validate()?;

    let mut points = object.control_points();
    let count = points.len();
    let effector = points
        .get(joint)
        .ok_or(HierarchyError::JointOutOfRange { index: joint, count })?;

    let chain_length = effector.chain_limit(config.ik_level);
    let mut chain = object.ordered_control_points(chain_length, effector)?;
    let max_steps = iteration_cap(chain_length);
    let mut iterations = 0u32;

    loop {
        let mut moved = false;

        for link in 0..chain.len() {
            let reach = points[joint].coords;
            swing_link(object, &chain[link], reach, target)?;

            points = object.control_points();
            chain = object.ordered_control_points(chain_length, &points[joint])?;

            let step = reach.distance(points[joint].coords);
            if step >= config.move_threshold {
                moved = true;
            }
            iterations += 1;

            log::trace!("ik: link {link} moved effector by {step:.4}");
        }

        if !moved || iterations >= max_steps {
            break;
        }
    }

    let final_distance = points[joint].coords.distance(target);
    let result = SolveResult {
        converged: final_distance < config.reach_tolerance,
        iterations,
        final_distance,
        chain_length,
    };

    log::debug!(
        "ik: joint {joint}, {} links, {} iterations, distance {:.4}",
        result.chain_length,
        result.iterations,
        result.final_distance
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_cap_is_cubic() {
        assert_eq!(iteration_cap(1), 1);
        assert_eq!(iteration_cap(2), 8);
        assert_eq!(iteration_cap(3), 27);
    }

    #[test]
    fn iteration_cap_saturates_for_long_chains() {
        assert_eq!(iteration_cap(1625), 1625u32.pow(3));
        assert_eq!(iteration_cap(1626), u32::MAX);
        assert_eq!(iteration_cap(usize::MAX), u32::MAX);
    }
}
