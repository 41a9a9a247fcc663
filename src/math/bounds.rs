use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box folded from a point set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Folds min/max over `points`. An empty iterator gives [`BoundingBox::ZERO`].
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::ZERO;
        };

        points.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    pub fn centre(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Component-wise overlap. Disjoint boxes produce `min > max` on the separating axis;
    /// callers only use the centre, which then lies between the two boxes.
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_zero_box() {
        assert_eq!(BoundingBox::from_points(std::iter::empty()), BoundingBox::ZERO);
    }

    #[test]
    fn folds_min_and_max_per_axis() {
        let bb = BoundingBox::from_points([
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.5),
            Vec3::new(0.0, 0.0, -7.0),
        ]);
        assert_eq!(bb.min, Vec3::new(-1.0, -2.0, -7.0));
        assert_eq!(bb.max, Vec3::new(1.0, 4.0, 3.0));
        assert!(bb.min.cmple(bb.max).all());
    }

    #[test]
    fn intersection_of_touching_boxes_is_the_shared_face() {
        let a = BoundingBox::new(Vec3::new(0.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Vec3::new(1.0, -0.5, -0.5), Vec3::new(2.0, 0.5, 0.5));
        let overlap = a.intersection(&b);
        assert_eq!(overlap.centre(), Vec3::new(1.0, 0.0, 0.0));
    }
}
