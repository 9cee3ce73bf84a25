//! Ray fan geometry derived from a box.
//!
//! [`RaycastOrigins`] are the four corners of the skin-shrunk box and are
//! recomputed on every move. [`RaySpacing`] is the distance between
//! neighbouring rays along an edge and only changes when the box is resized.

use glam::Vec2;

use crate::components::boxcollider::Aabb;

/// Fewest rays per edge; both corners of an edge are always sampled.
pub const MIN_RAY_COUNT: u32 = 2;

/// Corner points of the skin-shrunk bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaycastOrigins {
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_left: Vec2,
    pub top_right: Vec2,
}

impl RaycastOrigins {
    pub fn from_bounds(bounds: &Aabb, skin_width: f32) -> Self {
        let shrunk = bounds.shrink(skin_width);
        Self {
            bottom_left: shrunk.min,
            bottom_right: Vec2::new(shrunk.max.x, shrunk.min.y),
            top_left: Vec2::new(shrunk.min.x, shrunk.max.y),
            top_right: shrunk.max,
        }
    }
}

/// Distance between neighbouring rays.
///
/// `horizontal` separates the rays of a horizontal sweep (stacked along the
/// vertical edge); `vertical` separates the rays of a vertical sweep (spread
/// along the horizontal edge). Rays run edge to edge inclusive of corners:
/// `spacing = edge_length / (ray_count - 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaySpacing {
    pub horizontal: f32,
    pub vertical: f32,
}

impl RaySpacing {
    /// Ray counts below [`MIN_RAY_COUNT`] are treated as the minimum.
    pub fn from_bounds(
        bounds: &Aabb,
        skin_width: f32,
        horizontal_ray_count: u32,
        vertical_ray_count: u32,
    ) -> Self {
        let size = bounds.shrink(skin_width).size();
        let horizontal_ray_count = horizontal_ray_count.max(MIN_RAY_COUNT);
        let vertical_ray_count = vertical_ray_count.max(MIN_RAY_COUNT);
        Self {
            horizontal: size.y / (horizontal_ray_count - 1) as f32,
            vertical: size.x / (vertical_ray_count - 1) as f32,
        }
    }
}
