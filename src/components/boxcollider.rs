use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Axis-aligned rectangle in world space, stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build from two arbitrary corners, normalizing to proper min/max.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::from_corners(center - half_extents, center + half_extents)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Shrink every side inward by `margin`. Never inverts: a box thinner
    /// than `2 * margin` collapses onto its center line.
    pub fn shrink(&self, margin: f32) -> Self {
        let center = self.center();
        let half = (self.half_extents() - Vec2::splat(margin)).max(Vec2::ZERO);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Closest point of the box to `point` (the point itself when inside).
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }
}

/// Box shape of an entity, centered on its [`MapPosition`](super::mapposition::MapPosition)
/// plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Modify BoxCollider with given offset from the entity pivot
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// World-space bounds for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> Aabb {
        Aabb::from_center(position + self.offset, self.size.abs() * 0.5)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        self.aabb(position).overlaps(&other.aabb(other_position))
    }

    /// Point containment in world space.
    pub fn contains_point(&self, position: Vec2, point: Vec2) -> bool {
        self.aabb(position).contains_point(point)
    }

    /// Bottom-center point of the box, used as the landing point for effects.
    pub fn bottom(&self, position: Vec2) -> Vec2 {
        let bounds = self.aabb(position);
        Vec2::new(bounds.center().x, bounds.min.y)
    }
}
