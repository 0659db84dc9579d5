//! Axis-aligned bounding boxes
//!
//! Screen-space convention: `pos` is the top-left corner and y grows downward,
//! so `top() < bottom()`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle used for every overlap test in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether `x` lies within the horizontal extent (inclusive)
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }

    /// Same box shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Aabb {
        Aabb::new(self.pos + offset, self.size)
    }
}

/// Anything with a collision box
pub trait Bounded {
    fn bounds(&self) -> Aabb;

    fn collides_with<B: Bounded + ?Sized>(&self, other: &B) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

impl Bounded for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_edges() {
        let a = rect(10.0, 20.0, 30.0, 40.0);
        assert_eq!(a.left(), 10.0);
        assert_eq!(a.right(), 40.0);
        assert_eq!(a.top(), 20.0);
        assert_eq!(a.bottom(), 60.0);
        assert_eq!(a.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
        // Sharing an edge is not an overlap
        assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(0.0, 10.0, 10.0, 10.0)));
        // Containment is an overlap
        assert!(a.overlaps(&rect(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_translated() {
        let a = rect(0.0, 0.0, 4.0, 4.0).translated(Vec2::new(3.0, -1.0));
        assert_eq!(a.pos, Vec2::new(3.0, -1.0));
        assert_eq!(a.size, Vec2::new(4.0, 4.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.1f32..200.0, ah in 0.1f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.1f32..200.0, bh in 0.1f32..200.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn box_overlaps_itself(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 0.1f32..200.0, h in 0.1f32..200.0,
        ) {
            let a = rect(x, y, w, h);
            prop_assert!(a.overlaps(&a));
        }
    }
}
