use glam::Vec3;

/// A queryable joint handle.
///
/// `indices` is the root-to-owner path stored reversed: `indices.last()` is the first hop
/// from the root. `coords` follows user drags while `initial` keeps the undragged position;
/// a difference between the two is the request to move this joint.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    pub coords: Vec3,
    pub initial: Vec3,
    pub anchor: Vec3,
    pub indices: Vec<usize>,
}

impl ControlPoint {
    pub fn new(coords: Vec3, anchor: Vec3) -> Self {
        Self {
            coords,
            initial: coords,
            anchor,
            indices: Vec::new(),
        }
    }

    /// Number of hops from the root to the owning node.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    pub fn is_displaced(&self) -> bool {
        self.coords != self.initial
    }

    pub fn drag_to(&mut self, coords: Vec3) {
        self.coords = coords;
    }

    /// Chain length an IK solve may use from this point: `level`, capped at the number
    /// of nodes between the owner and the root inclusive.
    pub fn chain_limit(&self, level: usize) -> usize {
        level.min(self.depth() + 1)
    }

    /// Root-first copy of the path.
    pub fn root_first_path(&self) -> Vec<usize> {
        self.indices.iter().rev().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_moves_coords_only() {
        let mut point = ControlPoint::new(Vec3::X, Vec3::ZERO);
        assert!(!point.is_displaced());
        point.drag_to(Vec3::Y);
        assert!(point.is_displaced());
        assert_eq!(point.initial, Vec3::X);
    }

    #[test]
    fn chain_limit_is_clamped_to_depth() {
        let mut point = ControlPoint::new(Vec3::X, Vec3::ZERO);
        point.indices = vec![2, 0];
        assert_eq!(point.chain_limit(5), 3);
        assert_eq!(point.chain_limit(2), 2);
        assert_eq!(point.root_first_path(), vec![0, 2]);
    }
}
