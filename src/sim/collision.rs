//! Broad-phase collision
//!
//! Axis-aligned bounding boxes only. Entities are centre-anchored, so a box is
//! built from a centre point and a full size.

use glam::DVec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    /// Box of full `size` centred on `center`
    pub fn from_center(center: DVec2, size: DVec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.max.y
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Anything that takes part in the collision pass
pub trait Collider {
    fn aabb(&self) -> Aabb;
}

/// Stateless overlap test between two colliders
#[inline]
pub fn check_aabb_collision(a: &impl Collider, b: &impl Collider) -> bool {
    a.aabb().overlaps(&b.aabb())
}
