//! Circle vs axis-aligned rectangle collision
//!
//! Every hit test in the arena is a circle against a rectangle: projectiles
//! against buildings, tank bounding squares and infantry hitboxes, and tanks
//! against buildings for solid-body resolution.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp;

/// Smallest separation distance used when pushing a circle out of a rectangle
const MIN_SEPARATION: f32 = 0.0001;

/// Axis-aligned rectangle, `(x, y)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `2 * half` centered on `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self::new(center.x - half, center.y - half, half * 2.0, half * 2.0)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Closest point on (or in) the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp(p.x, self.x, self.x + self.w),
            clamp(p.y, self.y, self.y + self.h),
        )
    }
}

/// True iff the circle touches or overlaps the rectangle
#[inline]
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let d = center - rect.closest_point(center);
    d.length_squared() <= radius * radius
}

/// Push a circle out of a rectangle by exactly its penetration depth
///
/// Returns `center` unchanged when the shapes do not overlap. When the center
/// sits on the rectangle's closest point the separation direction is zero and
/// the center is also returned unchanged.
pub fn resolve_circle_rect(center: Vec2, radius: f32, rect: &Rect) -> Vec2 {
    let delta = center - rect.closest_point(center);
    let dist_sq = delta.length_squared();
    if dist_sq > radius * radius {
        return center;
    }

    let dist = dist_sq.sqrt().max(MIN_SEPARATION);
    let normal = delta / dist;
    let overlap = radius - dist;
    center + normal * overlap
}
