//! Slimeball motion: a gravity-driven point swept as a circle.
//!
//! Projectiles are too small and fast for the ray fan of the
//! [`Platformer`](super::platformer::Platformer). Each tick
//! [`Projectile::advance`] integrates gravity, moves the ball, and sweeps a
//! circle of `radius` from the pre-move position along the velocity for the
//! distance travelled. The first non-trigger hit stops the ball at the
//! contact centroid and marks it spent; the caller reports the impact.
//!
//! One-way platforms are ignored while the ball is rising steeply
//! (`velocity · up > 0.5`) so shots pass up through ledges.
//!
//! A [`Ttl`](super::ttl::Ttl) removes projectiles that never hit anything.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::collisionlayer::LayerMask;
use crate::components::slime::SlimeType;
use crate::resources::collisionworld::{GeometryQuery, QueryFilter, RaycastHit};

pub const DEFAULT_PROJECTILE_RADIUS: f32 = 0.5;

/// Upward velocity component above which one-way platforms are passed.
const ONE_WAY_PASS_THRESHOLD: f32 = 0.5;

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub velocity: Vec2,
    pub gravity: f32,
    pub radius: f32,
    pub collision_mask: LayerMask,
    pub slime: SlimeType,
    /// Set once the ball has hit something; a spent ball never moves again.
    pub spent: bool,
}

impl Projectile {
    pub fn new(velocity: Vec2, gravity: f32, slime: SlimeType) -> Self {
        Self {
            velocity,
            gravity,
            radius: DEFAULT_PROJECTILE_RADIUS,
            collision_mask: LayerMask::MASK_PROJECTILE,
            slime,
            spent: false,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.collision_mask = mask;
        self
    }

    /// Advance the ball by `dt`. Returns the hit when it struck something
    /// this tick.
    pub fn advance<G: GeometryQuery + ?Sized>(
        &mut self,
        position: &mut Vec2,
        dt: f32,
        geometry: &G,
        caster: Option<Entity>,
    ) -> Option<RaycastHit> {
        if self.spent {
            return None;
        }

        self.velocity.y -= self.gravity * dt;
        let start = *position;
        let displacement = self.velocity * dt;
        *position += displacement;

        let distance = displacement.length();
        if distance <= 0.0 {
            return None;
        }

        let filter = QueryFilter::new(self.collision_mask)
            .excluding(caster)
            .ignoring_triggers()
            .ignoring_one_way(self.velocity.dot(Vec2::Y) > ONE_WAY_PASS_THRESHOLD);
        let hit = geometry.circle_cast(start, self.radius, self.velocity, distance, filter)?;

        *position = hit.centroid;
        self.spent = true;
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::Aabb;
    use crate::resources::collisionworld::{Collider, CollisionWorld};

    const EPSILON: f32 = 1e-4;
    const DT: f32 = 1.0 / 60.0;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn floor() -> Collider {
        Collider::solid(Aabb::from_corners(Vec2::new(-50.0, -1.0), Vec2::new(50.0, 0.0)))
    }

    #[test]
    fn test_free_flight_integrates_gravity() {
        let world = CollisionWorld::new();
        let mut ball = Projectile::new(Vec2::new(6.0, 0.0), 20.0, SlimeType::Green);
        let mut position = Vec2::new(0.0, 10.0);

        assert!(ball.advance(&mut position, 0.5, &world, None).is_none());
        assert!(approx_eq(ball.velocity.y, -10.0));
        assert!(approx_eq(position.x, 3.0));
        assert!(approx_eq(position.y, 5.0));
    }

    #[test]
    fn test_hit_stops_at_centroid() {
        let world = CollisionWorld::with_statics(vec![floor()]);
        let mut ball = Projectile::new(Vec2::new(0.0, -60.0), 0.0, SlimeType::Gold);
        let mut position = Vec2::new(0.0, 1.0);

        let hit = ball.advance(&mut position, DT, &world, None).unwrap();
        assert!(approx_eq(hit.distance, 0.5));
        assert!(approx_eq(position.y, 0.5));
        assert_eq!(hit.normal, Vec2::Y);
        assert!(ball.spent);
    }

    #[test]
    fn test_fast_ball_does_not_tunnel() {
        // A thin wall far narrower than one tick of travel.
        let wall = Collider::solid(Aabb::from_corners(Vec2::new(5.0, -5.0), Vec2::new(5.1, 5.0)));
        let world = CollisionWorld::with_statics(vec![wall]);
        let mut ball = Projectile::new(Vec2::new(600.0, 0.0), 0.0, SlimeType::Green);
        let mut position = Vec2::ZERO;

        let hit = ball.advance(&mut position, DT, &world, None).unwrap();
        assert!(approx_eq(position.x, 4.5));
        assert!(approx_eq(hit.point.x, 5.0));
    }

    #[test]
    fn test_spent_ball_never_moves() {
        let world = CollisionWorld::with_statics(vec![floor()]);
        let mut ball = Projectile::new(Vec2::new(0.0, -60.0), 20.0, SlimeType::Green);
        let mut position = Vec2::new(0.0, 1.0);
        ball.advance(&mut position, DT, &world, None).unwrap();
        let rest = position;

        assert!(ball.advance(&mut position, DT, &world, None).is_none());
        assert_eq!(position, rest);
    }

    #[test]
    fn test_rising_ball_passes_one_way() {
        let ledge = Collider::one_way_platform(Aabb::from_corners(Vec2::new(-5.0, 2.0), Vec2::new(5.0, 2.5)));
        let world = CollisionWorld::with_statics(vec![ledge]);
        let mut ball = Projectile::new(Vec2::new(0.0, 120.0), 0.0, SlimeType::Green);
        let mut position = Vec2::ZERO;

        assert!(ball.advance(&mut position, DT, &world, None).is_none());
        assert!(approx_eq(position.y, 2.0));
    }

    #[test]
    fn test_falling_ball_lands_on_one_way() {
        let ledge = Collider::one_way_platform(Aabb::from_corners(Vec2::new(-5.0, 2.0), Vec2::new(5.0, 2.5)));
        let world = CollisionWorld::with_statics(vec![ledge]);
        let mut ball = Projectile::new(Vec2::new(0.0, -120.0), 0.0, SlimeType::Green);
        let mut position = Vec2::new(0.0, 4.0);

        let hit = ball.advance(&mut position, DT, &world, None).unwrap();
        assert!(hit.one_way);
        assert!(approx_eq(position.y, 3.0));
    }

    #[test]
    fn test_triggers_are_ignored() {
        let region = Collider {
            trigger: true,
            ..floor()
        };
        let world = CollisionWorld::with_statics(vec![region]);
        let mut ball = Projectile::new(Vec2::new(0.0, -60.0), 0.0, SlimeType::Green);
        let mut position = Vec2::new(0.0, 1.0);

        assert!(ball.advance(&mut position, DT, &world, None).is_none());
        assert!(approx_eq(position.y, 0.0));
    }

    #[test]
    fn test_mask_filters_layers() {
        let world = CollisionWorld::with_statics(vec![floor()]);
        let mut ball = Projectile::new(Vec2::new(0.0, -60.0), 0.0, SlimeType::Green).with_mask(LayerMask::ENEMY);
        let mut position = Vec2::new(0.0, 1.0);

        assert!(ball.advance(&mut position, DT, &world, None).is_none());
    }
}
