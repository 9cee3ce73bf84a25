//! Raycast kinematic mover.
//!
//! The [`Platformer`] component moves an entity's [`BoxCollider`] through the
//! [`CollisionWorld`](crate::resources::collisionworld::CollisionWorld) by
//! casting fans of short rays ahead of the box and clipping the requested
//! displacement to the nearest obstruction.
//!
//! # Move Algorithm
//!
//! Each call to [`Platformer::move_box`]:
//!
//! 1. Recomputes [`RaycastOrigins`] from the box shrunk by `skin_width`
//! 2. Resets [`CollisionState`]
//! 3. Horizontal sweep (only when `dx != 0`): `horizontal_ray_count` rays
//!    stacked up the leading vertical edge, each `|dx| + skin_width` long.
//!    One-way platforms never block horizontally.
//! 4. Vertical sweep (only when `dy != 0`): `vertical_ray_count` rays spread
//!    along the leading horizontal edge, shifted by the already clipped `dx`
//!    so a diagonal move sweeps from where the horizontal pass left the box.
//!    One-way platforms block only while moving down.
//! 5. Translates the position by the clipped displacement
//! 6. Reports a landing when `bottom` turns true after a move that was not
//!    grounded
//!
//! Every hit shortens the remaining rays to the hit distance, so the closest
//! obstruction across the whole fan wins.
//!
//! The horizontal sweep must run before the vertical one; the vertical rays
//! depend on the clipped horizontal displacement.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::warn;

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::collisionlayer::LayerMask;
use crate::components::collisionstate::CollisionState;
use crate::components::raycastorigins::{MIN_RAY_COUNT, RaySpacing, RaycastOrigins};
use crate::resources::collisionworld::{GeometryQuery, QueryFilter};

pub const DEFAULT_SKIN_WIDTH: f32 = 0.015;
pub const DEFAULT_RAY_COUNT: u32 = 4;

/// Outcome of a single [`Platformer::move_box`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Displacement actually applied after clipping.
    pub applied: Vec2,
    pub collisions: CollisionState,
    /// `bottom` became true on this move after a move that was not grounded.
    pub landed: bool,
}

/// Kinematic box mover driven by ray sweeps.
#[derive(Component, Debug, Clone)]
pub struct Platformer {
    /// Layers treated as solid.
    pub collision_mask: LayerMask,
    skin_width: f32,
    horizontal_ray_count: u32,
    vertical_ray_count: u32,
    spacing: RaySpacing,
    origins: RaycastOrigins,
    /// Sides blocked during the most recent move.
    pub collisions: CollisionState,
    /// `collisions.bottom` of the previous move.
    pub was_grounded: bool,
}

impl Platformer {
    pub fn new(collision_mask: LayerMask) -> Self {
        Self {
            collision_mask,
            skin_width: DEFAULT_SKIN_WIDTH,
            horizontal_ray_count: DEFAULT_RAY_COUNT,
            vertical_ray_count: DEFAULT_RAY_COUNT,
            spacing: RaySpacing::default(),
            origins: RaycastOrigins::default(),
            collisions: CollisionState::default(),
            was_grounded: false,
        }
    }

    /// Set ray counts. Counts below 2 would leave an edge unsampled and are
    /// raised to 2.
    pub fn with_ray_counts(mut self, horizontal: u32, vertical: u32) -> Self {
        if horizontal < MIN_RAY_COUNT || vertical < MIN_RAY_COUNT {
            warn!(
                "Platformer ray counts {}x{} below minimum, clamping to {}",
                horizontal, vertical, MIN_RAY_COUNT
            );
        }
        self.horizontal_ray_count = horizontal.max(MIN_RAY_COUNT);
        self.vertical_ray_count = vertical.max(MIN_RAY_COUNT);
        self
    }

    /// Set the skin width. Non-positive or non-finite values fall back to
    /// [`DEFAULT_SKIN_WIDTH`].
    pub fn with_skin_width(mut self, skin_width: f32) -> Self {
        if skin_width.is_finite() && skin_width > 0.0 {
            self.skin_width = skin_width;
        } else {
            warn!(
                "Platformer skin width {} is invalid, using {}",
                skin_width, DEFAULT_SKIN_WIDTH
            );
            self.skin_width = DEFAULT_SKIN_WIDTH;
        }
        self
    }

    pub fn skin_width(&self) -> f32 {
        self.skin_width
    }

    pub fn horizontal_ray_count(&self) -> u32 {
        self.horizontal_ray_count
    }

    pub fn vertical_ray_count(&self) -> u32 {
        self.vertical_ray_count
    }

    pub fn spacing(&self) -> RaySpacing {
        self.spacing
    }

    pub fn origins(&self) -> RaycastOrigins {
        self.origins
    }

    pub fn is_grounded(&self) -> bool {
        self.collisions.bottom
    }

    /// Recompute ray spacing for the current box size. Call on spawn and
    /// whenever the collider is resized.
    pub fn calculate_ray_spacing(&mut self, bounds: &Aabb) {
        self.spacing = RaySpacing::from_bounds(
            bounds,
            self.skin_width,
            self.horizontal_ray_count,
            self.vertical_ray_count,
        );
    }

    /// Move the box by `velocity` (a displacement for this tick), clipped
    /// against `geometry`. `caster` is excluded from every ray so an entity
    /// never collides with its own collider.
    pub fn move_box<G: GeometryQuery + ?Sized>(
        &mut self,
        position: &mut Vec2,
        collider: &BoxCollider,
        velocity: Vec2,
        geometry: &G,
        caster: Option<Entity>,
    ) -> MoveResult {
        self.origins = RaycastOrigins::from_bounds(&collider.aabb(*position), self.skin_width);
        self.collisions.reset();

        let filter = QueryFilter::new(self.collision_mask).excluding(caster);
        let mut velocity = velocity;

        if velocity.x != 0.0 {
            self.horizontal_collisions(&mut velocity, geometry, filter);
        }
        if velocity.y != 0.0 {
            self.vertical_collisions(&mut velocity, geometry, filter);
        }

        *position += velocity;

        let landed = self.collisions.bottom && !self.was_grounded;
        self.was_grounded = self.collisions.bottom;

        MoveResult {
            applied: velocity,
            collisions: self.collisions,
            landed,
        }
    }

    fn horizontal_collisions<G: GeometryQuery + ?Sized>(
        &mut self,
        velocity: &mut Vec2,
        geometry: &G,
        filter: QueryFilter,
    ) {
        let direction = velocity.x.signum();
        let mut ray_length = velocity.x.abs() + self.skin_width;
        let filter = filter.ignoring_one_way(true);
        let base = if direction < 0.0 {
            self.origins.bottom_left
        } else {
            self.origins.bottom_right
        };

        for i in 0..self.horizontal_ray_count {
            let origin = base + Vec2::Y * (self.spacing.horizontal * i as f32);
            let Some(hit) = geometry.raycast(origin, Vec2::X * direction, ray_length, filter) else {
                continue;
            };

            velocity.x = (hit.distance - self.skin_width) * direction;
            ray_length = hit.distance;

            self.collisions.right = direction > 0.0;
            self.collisions.left = direction < 0.0;
        }
    }

    fn vertical_collisions<G: GeometryQuery + ?Sized>(
        &mut self,
        velocity: &mut Vec2,
        geometry: &G,
        filter: QueryFilter,
    ) {
        let direction = velocity.y.signum();
        let mut ray_length = velocity.y.abs() + self.skin_width;
        let filter = filter.ignoring_one_way(direction > 0.0);
        let base = if direction < 0.0 {
            self.origins.bottom_left
        } else {
            self.origins.top_left
        };

        for i in 0..self.vertical_ray_count {
            let origin = base + Vec2::X * (self.spacing.vertical * i as f32 + velocity.x);
            let Some(hit) = geometry.raycast(origin, Vec2::Y * direction, ray_length, filter) else {
                continue;
            };

            velocity.y = (hit.distance - self.skin_width) * direction;
            ray_length = hit.distance;

            self.collisions.top = direction > 0.0;
            self.collisions.bottom = direction < 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::collisionworld::{Collider, CollisionWorld};

    const EPSILON: f32 = 1e-4;
    const SKIN: f32 = DEFAULT_SKIN_WIDTH;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn solid(min: (f32, f32), max: (f32, f32)) -> Collider {
        Collider::solid(Aabb::from_corners(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1)))
    }

    fn one_way(min: (f32, f32), max: (f32, f32)) -> Collider {
        Collider::one_way_platform(Aabb::from_corners(
            Vec2::new(min.0, min.1),
            Vec2::new(max.0, max.1),
        ))
    }

    /// Unit box whose bottom-center sits at `(x, y)`.
    fn mover_at(x: f32, y: f32) -> (Platformer, Vec2, BoxCollider) {
        let collider = BoxCollider::new(1.0, 1.0);
        let position = Vec2::new(x, y + 0.5);
        let mut mover = Platformer::new(LayerMask::MASK_PLAYER_SOLID);
        mover.calculate_ray_spacing(&collider.aabb(position));
        (mover, position, collider)
    }

    // ==================== CONFIGURATION TESTS ====================

    #[test]
    fn test_defaults() {
        let mover = Platformer::new(LayerMask::GROUND);
        assert!(approx_eq(mover.skin_width(), 0.015));
        assert_eq!(mover.horizontal_ray_count(), 4);
        assert_eq!(mover.vertical_ray_count(), 4);
        assert!(!mover.is_grounded());
    }

    #[test]
    fn test_ray_count_clamped_to_two() {
        let mover = Platformer::new(LayerMask::GROUND).with_ray_counts(0, 1);
        assert_eq!(mover.horizontal_ray_count(), 2);
        assert_eq!(mover.vertical_ray_count(), 2);
    }

    #[test]
    fn test_clamped_ray_count_spacing_is_finite() {
        let collider = BoxCollider::new(1.0, 2.0);
        let mut mover = Platformer::new(LayerMask::GROUND).with_ray_counts(0, 1);
        mover.calculate_ray_spacing(&collider.aabb(Vec2::ZERO));
        let spacing = mover.spacing();
        assert!(approx_eq(spacing.horizontal, 2.0 - 2.0 * SKIN));
        assert!(approx_eq(spacing.vertical, 1.0 - 2.0 * SKIN));
    }

    #[test]
    fn test_invalid_skin_width_falls_back() {
        assert!(approx_eq(Platformer::new(LayerMask::GROUND).with_skin_width(0.0).skin_width(), SKIN));
        assert!(approx_eq(Platformer::new(LayerMask::GROUND).with_skin_width(-1.0).skin_width(), SKIN));
        assert!(approx_eq(
            Platformer::new(LayerMask::GROUND).with_skin_width(f32::NAN).skin_width(),
            SKIN
        ));
        assert!(approx_eq(Platformer::new(LayerMask::GROUND).with_skin_width(0.05).skin_width(), 0.05));
    }

    // ==================== FREE MOVEMENT TESTS ====================

    #[test]
    fn test_unobstructed_move_is_exact() {
        let world = CollisionWorld::with_statics(vec![solid((-10.0, -1.0), (10.0, 0.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 2.0);
        let start = position;

        let result = mover.move_box(&mut position, &collider, Vec2::new(0.7, -0.4), &world, None);

        assert_eq!(result.applied, Vec2::new(0.7, -0.4));
        assert_eq!(position, start + Vec2::new(0.7, -0.4));
        assert!(!result.collisions.any());
        assert!(!result.landed);
    }

    #[test]
    fn test_zero_velocity_is_idempotent() {
        let world = CollisionWorld::with_statics(vec![solid((-10.0, -1.0), (10.0, 0.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        // Land first so there is prior state to clear.
        mover.move_box(&mut position, &collider, Vec2::new(0.0, -0.1), &world, None);
        assert!(mover.is_grounded());
        let rest = position;

        let result = mover.move_box(&mut position, &collider, Vec2::ZERO, &world, None);
        assert_eq!(position, rest);
        assert_eq!(result.applied, Vec2::ZERO);
        assert!(!result.collisions.any());
        assert!(!mover.is_grounded());
    }

    // ==================== CLIPPING TESTS ====================

    #[test]
    fn test_floor_clips_to_distance_minus_skin() {
        let world = CollisionWorld::with_statics(vec![solid((-10.0, -1.0), (10.0, 0.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.3);

        let result = mover.move_box(&mut position, &collider, Vec2::new(0.0, -1.0), &world, None);

        assert!(approx_eq(result.applied.y, -0.3));
        assert!(result.collisions.bottom);
        assert!(!result.collisions.top);
        assert!(approx_eq(collider.aabb(position).min.y, 0.0));
    }

    #[test]
    fn test_ceiling_clips_and_sets_top() {
        let world = CollisionWorld::with_statics(vec![solid((-10.0, 2.0), (10.0, 3.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        let result = mover.move_box(&mut position, &collider, Vec2::new(0.0, 5.0), &world, None);

        assert!(approx_eq(result.applied.y, 1.0));
        assert!(result.collisions.top);
        assert!(!result.collisions.bottom);
    }

    #[test]
    fn test_wall_right_clips_and_sets_right() {
        let world = CollisionWorld::with_statics(vec![solid((1.0, -5.0), (2.0, 5.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        let result = mover.move_box(&mut position, &collider, Vec2::new(3.0, 0.0), &world, None);

        assert!(approx_eq(result.applied.x, 0.5));
        assert!(result.collisions.right);
        assert!(!result.collisions.left);
        assert!(approx_eq(collider.aabb(position).max.x, 1.0));
    }

    #[test]
    fn test_wall_left_clips_and_sets_left() {
        let world = CollisionWorld::with_statics(vec![solid((-2.0, -5.0), (-1.0, 5.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        let result = mover.move_box(&mut position, &collider, Vec2::new(-3.0, 0.0), &world, None);

        assert!(approx_eq(result.applied.x, -0.5));
        assert!(result.collisions.left);
        assert!(!result.collisions.right);
    }

    #[test]
    fn test_closest_hit_across_fan_wins() {
        // A low step further away and a high ledge closer: only the top ray
        // sees the ledge, but it must still win.
        let world = CollisionWorld::with_statics(vec![
            solid((3.0, -1.0), (4.0, 0.2)),
            solid((1.5, 0.8), (2.5, 5.0)),
        ]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        let result = mover.move_box(&mut position, &collider, Vec2::new(5.0, 0.0), &world, None);

        assert!(approx_eq(result.applied.x, 1.0));
        assert!(result.collisions.right);
    }

    #[test]
    fn test_resting_against_wall_without_horizontal_input_is_not_flagged() {
        let world = CollisionWorld::with_statics(vec![solid((0.5, -5.0), (1.5, 5.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        let result = mover.move_box(&mut position, &collider, Vec2::new(0.0, 0.1), &world, None);

        assert!(!result.collisions.right);
        assert!(approx_eq(result.applied.y, 0.1));
    }

    #[test]
    fn test_caster_is_excluded() {
        let mut ecs = World::new();
        let me = ecs.spawn_empty().id();
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);
        let mut world = CollisionWorld::new();
        world.push_dynamic(
            Collider::solid(collider.aabb(position))
                .with_layers(LayerMask::BLOCK)
                .with_entity(me),
        );

        let result = mover.move_box(&mut position, &collider, Vec2::new(1.0, 0.0), &world, Some(me));
        assert!(approx_eq(result.applied.x, 1.0));
        assert!(!result.collisions.any());
    }

    // ==================== ORDERING TESTS ====================

    #[test]
    fn test_vertical_sweep_uses_clipped_horizontal_offset() {
        // Wall stops the box at x = 1.0; the floor below ends at x = 1.0 too.
        // Sweeping from the unclipped x would miss the floor entirely.
        let world = CollisionWorld::with_statics(vec![
            solid((1.0, -0.5), (1.2, 10.0)),
            solid((-3.0, -5.0), (1.0, -0.5)),
        ]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        let result = mover.move_box(&mut position, &collider, Vec2::new(2.0, -1.0), &world, None);

        assert!(approx_eq(result.applied.x, 0.5));
        assert!(approx_eq(result.applied.y, -0.5));
        assert!(result.collisions.right);
        assert!(result.collisions.bottom);
    }

    #[test]
    fn test_vertical_sweep_does_not_see_floor_beyond_clipped_offset() {
        // Floor lies only where the box would have ended without the wall.
        let world = CollisionWorld::with_statics(vec![
            solid((1.0, 0.0), (1.2, 10.0)),
            solid((1.6, -5.0), (3.0, -0.5)),
        ]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        let result = mover.move_box(&mut position, &collider, Vec2::new(2.0, -1.0), &world, None);

        assert!(approx_eq(result.applied.x, 0.5));
        assert!(approx_eq(result.applied.y, -1.0));
        assert!(!result.collisions.bottom);
    }

    // ==================== ONE-WAY PLATFORM TESTS ====================

    #[test]
    fn test_one_way_blocks_downward() {
        let world = CollisionWorld::with_statics(vec![one_way((-5.0, -0.5), (5.0, 0.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.2);

        let result = mover.move_box(&mut position, &collider, Vec2::new(0.0, -1.0), &world, None);

        assert!(result.collisions.bottom);
        assert!(approx_eq(result.applied.y, -0.2));
    }

    #[test]
    fn test_one_way_passes_upward() {
        let world = CollisionWorld::with_statics(vec![one_way((-5.0, 1.0), (5.0, 1.5))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        let result = mover.move_box(&mut position, &collider, Vec2::new(0.0, 1.0), &world, None);

        assert!(!result.collisions.any());
        assert!(approx_eq(result.applied.y, 1.0));
    }

    #[test]
    fn test_one_way_never_blocks_horizontally() {
        let world = CollisionWorld::with_statics(vec![one_way((1.0, -1.0), (2.0, 2.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        let result = mover.move_box(&mut position, &collider, Vec2::new(2.0, 0.0), &world, None);

        assert!(!result.collisions.right);
        assert!(approx_eq(result.applied.x, 2.0));
    }

    // ==================== GROUNDED TRANSITION TESTS ====================

    #[test]
    fn test_landing_reported_once() {
        let world = CollisionWorld::with_statics(vec![solid((-10.0, -1.0), (10.0, 0.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.5);

        let first = mover.move_box(&mut position, &collider, Vec2::new(0.0, -0.2), &world, None);
        assert!(!first.landed);
        let second = mover.move_box(&mut position, &collider, Vec2::new(0.0, -1.0), &world, None);
        assert!(second.landed);
        let third = mover.move_box(&mut position, &collider, Vec2::new(0.0, -0.1), &world, None);
        assert!(third.collisions.bottom);
        assert!(!third.landed);
    }

    #[test]
    fn test_landing_reported_again_after_leaving_ground() {
        let world = CollisionWorld::with_statics(vec![solid((-10.0, -1.0), (10.0, 0.0))]);
        let (mut mover, mut position, collider) = mover_at(0.0, 0.0);

        assert!(mover.move_box(&mut position, &collider, Vec2::new(0.0, -0.1), &world, None).landed);
        assert!(!mover.move_box(&mut position, &collider, Vec2::new(0.0, 0.5), &world, None).landed);
        assert!(mover.move_box(&mut position, &collider, Vec2::new(0.0, -1.0), &world, None).landed);
    }
}
