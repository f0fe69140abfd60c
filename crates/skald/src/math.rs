//! Math types and glam re-exports.
//!
//! We re-export the [glam](https://docs.rs/glam) 2D types so users don't need
//! to depend on it directly. [`Aabb`] is the small axis-aligned box every
//! broad-phase collider shape is built from.

pub use glam::{Affine2, Vec2, vec2};

/// An axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point in `points`.
    ///
    /// Returns a degenerate box at the origin for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Self {
        let Some((&first, rest)) = points.split_first() else {
            return Self::new(Vec2::ZERO, Vec2::ZERO);
        };
        let mut min = first;
        let mut max = first;
        for &p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Axis-overlap test against another box. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_around_points() {
        let points = [vec2(3.0, -1.0), vec2(-2.0, 4.0), vec2(0.0, 0.0)];
        let aabb = Aabb::from_points(&points);
        assert_eq!(aabb.min, vec2(-2.0, -1.0));
        assert_eq!(aabb.max, vec2(3.0, 4.0));
    }

    #[test]
    fn fit_empty_is_degenerate() {
        let aabb = Aabb::from_points(&[]);
        assert_eq!(aabb.size(), Vec2::ZERO);
    }

    #[test]
    fn center_and_size() {
        let aabb = Aabb::new(vec2(0.0, 0.0), vec2(10.0, 4.0));
        assert_eq!(aabb.center(), vec2(5.0, 2.0));
        assert_eq!(aabb.size(), vec2(10.0, 4.0));
    }

    #[test]
    fn overlap_cases() {
        let a = Aabb::new(vec2(0.0, 0.0), vec2(2.0, 2.0));
        let b = Aabb::new(vec2(1.0, 1.0), vec2(3.0, 3.0));
        let c = Aabb::new(vec2(5.0, 5.0), vec2(6.0, 6.0));
        let touching = Aabb::new(vec2(2.0, 0.0), vec2(4.0, 2.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.overlaps(&touching));
    }
}
