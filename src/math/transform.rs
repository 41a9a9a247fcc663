use glam::{Mat4, Quat, Vec3};

const DEGENERATE_LENGTH: f32 = 1e-6;

/// `T(pivot) * local * T(-pivot)`: applies `local` as if `pivot` were the origin.
pub fn about_pivot(pivot: Vec3, local: Mat4) -> Mat4 {
    Mat4::from_translation(pivot) * local * Mat4::from_translation(-pivot)
}

/// Rotation of `angle_degrees` around `axis` through `pivot`.
///
/// Returns `None` for a zero axis.
pub fn rotation_about(pivot: Vec3, axis: Vec3, angle_degrees: f32) -> Option<Mat4> {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return None;
    }
    let rotation = Mat4::from_axis_angle(axis, angle_degrees.to_radians());
    Some(about_pivot(pivot, rotation))
}

/// Quaternion turning the direction of `from` onto the direction of `to`.
///
/// Built from the cross product for the vector part and `|v1||v2| + v1·v2` for the
/// scalar part, then normalized. Returns `None` when either input has no direction.
pub fn shortest_arc(from: Vec3, to: Vec3) -> Option<Quat> {
    if from.length_squared() < DEGENERATE_LENGTH || to.length_squared() < DEGENERATE_LENGTH {
        return None;
    }

    let v1 = from.normalize();
    let v2 = to.normalize();
    let axis = v1.cross(v2);
    let w = (v1.length_squared() * v2.length_squared()).sqrt() + v1.dot(v2);
    let q = Quat::from_xyzw(axis.x, axis.y, axis.z, w);

    // Opposite directions collapse q to zero.
    if q.length_squared() < DEGENERATE_LENGTH {
        return Some(Quat::from_axis_angle(v1.any_orthonormal_vector(), std::f32::consts::PI));
    }

    Some(q.normalize())
}

/// Pivot-conjugated matrix rotating `current` onto `goal` around `pivot`.
pub fn swing_about(pivot: Vec3, current: Vec3, goal: Vec3) -> Option<Mat4> {
    let q = shortest_arc(current - pivot, goal - pivot)?;
    Some(about_pivot(pivot, Mat4::from_quat(q)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_arc_maps_direction() {
        let q = shortest_arc(Vec3::X, Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert!((q * Vec3::X).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn shortest_arc_handles_opposites() {
        let q = shortest_arc(Vec3::X, Vec3::NEG_X).unwrap();
        assert!((q * Vec3::X).abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn shortest_arc_rejects_zero_vectors() {
        assert!(shortest_arc(Vec3::ZERO, Vec3::Y).is_none());
        assert!(shortest_arc(Vec3::Y, Vec3::ZERO).is_none());
    }

    #[test]
    fn rotation_about_keeps_pivot_fixed() {
        let pivot = Vec3::new(1.0, 2.0, 3.0);
        let m = rotation_about(pivot, Vec3::Z, 90.0).unwrap();
        assert!(m.transform_point3(pivot).abs_diff_eq(pivot, 1e-5));
        let moved = m.transform_point3(pivot + Vec3::X);
        assert!(moved.abs_diff_eq(pivot + Vec3::Y, 1e-5));
    }

    #[test]
    fn swing_moves_current_onto_goal() {
        let pivot = Vec3::new(0.5, 0.0, 0.0);
        let m = swing_about(pivot, Vec3::new(1.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 1.0)).unwrap();
        let moved = m.transform_point3(Vec3::new(1.5, 0.0, 0.0));
        assert!(moved.abs_diff_eq(Vec3::new(0.5, 0.0, 1.0), 1e-5));
    }
}
