//! Kinematic movement for every [`Platformer`] body.
//!
//! [`platformer_movement`] integrates each non-frozen [`RigidBody`] and moves
//! its box through the collision snapshot with [`step_body`]. A
//! [`GroundedEvent`] is triggered once per landing.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::platformer::{MoveResult, Platformer};
use crate::components::raycastorigins::RaySpacing;
use crate::components::rigidbody::RigidBody;
use crate::events::grounded::GroundedEvent;
use crate::resources::collisionworld::{CollisionWorld, GeometryQuery};
use crate::resources::worldtime::WorldTime;

/// One integration step: gravity and friction, a clipped move, then
/// velocity zeroed on every blocked axis.
pub fn step_body<G: GeometryQuery + ?Sized>(
    dt: f32,
    body: &mut RigidBody,
    mover: &mut Platformer,
    position: &mut Vec2,
    collider: &BoxCollider,
    geometry: &G,
    caster: Option<Entity>,
) -> MoveResult {
    let displacement = body.integrate(dt);
    let result = mover.move_box(position, collider, displacement, geometry, caster);
    body.resolve_collisions(&result.collisions);
    result
}

pub fn platformer_movement(
    time: Res<WorldTime>,
    world: Res<CollisionWorld>,
    mut query: Query<(
        Entity,
        &mut MapPosition,
        &mut RigidBody,
        &mut Platformer,
        &BoxCollider,
    )>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut position, mut body, mut mover, collider) in query.iter_mut() {
        if body.frozen {
            continue;
        }
        let mut pos = position.pos;
        let result = step_body(
            dt,
            &mut body,
            &mut mover,
            &mut pos,
            collider,
            &*world,
            Some(entity),
        );
        position.pos = pos;

        if result.landed {
            debug!("{:?} landed at {:?}", entity, pos);
            commands.trigger(GroundedEvent {
                entity,
                point: collider.bottom(pos),
            });
        }
    }
}

/// Recompute ray spacing for boxes whose size changed since the last tick.
pub fn refresh_ray_spacing(mut query: Query<(&mut Platformer, &BoxCollider, &MapPosition)>) {
    for (mut mover, collider, position) in query.iter_mut() {
        let bounds = collider.aabb(position.pos);
        let expected = RaySpacing::from_bounds(
            &bounds,
            mover.skin_width(),
            mover.horizontal_ray_count(),
            mover.vertical_ray_count(),
        );
        if mover.spacing() != expected {
            mover.calculate_ray_spacing(&bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::Aabb;
    use crate::components::collisionlayer::LayerMask;
    use crate::resources::collisionworld::Collider;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn floor_world() -> CollisionWorld {
        CollisionWorld::with_statics(vec![Collider::solid(Aabb::from_corners(
            Vec2::new(-50.0, -1.0),
            Vec2::new(50.0, 0.0),
        ))])
    }

    #[test]
    fn test_step_body_applies_gravity_and_friction() {
        let world = CollisionWorld::new();
        let mut body = RigidBody::with_physics(20.0, 4.0);
        body.velocity = Vec2::new(2.0, 0.0);
        let mut mover = Platformer::new(LayerMask::MASK_PLAYER_SOLID);
        let collider = BoxCollider::new(1.0, 1.0);
        let mut pos = Vec2::new(0.0, 10.0);

        let result = step_body(0.5, &mut body, &mut mover, &mut pos, &collider, &world, None);
        assert!(approx_eq(body.velocity.x, 0.0));
        assert!(approx_eq(body.velocity.y, -10.0));
        assert!(approx_eq(result.applied.y, -5.0));
        assert!(approx_eq(pos.y, 5.0));
    }

    #[test]
    fn test_step_body_zeroes_blocked_axis() {
        let world = floor_world();
        let mut body = RigidBody::with_physics(20.0, 0.0);
        body.velocity = Vec2::new(1.0, -30.0);
        let mut mover = Platformer::new(LayerMask::MASK_PLAYER_SOLID);
        let collider = BoxCollider::new(1.0, 1.0);
        let mut pos = Vec2::new(0.0, 1.0);

        let result = step_body(0.1, &mut body, &mut mover, &mut pos, &collider, &world, None);
        assert!(result.collisions.bottom);
        assert!(result.landed);
        assert_eq!(body.velocity.y, 0.0);
        assert!(approx_eq(body.velocity.x, 1.0));
        assert!(approx_eq(pos.y, 0.5));
    }

    #[test]
    fn test_step_body_resting_is_idempotent() {
        let world = floor_world();
        let mut body = RigidBody::new();
        let mut mover = Platformer::new(LayerMask::MASK_PLAYER_SOLID);
        let collider = BoxCollider::new(1.0, 1.0);
        let mut pos = Vec2::new(0.0, 0.5);

        let result = step_body(1.0 / 60.0, &mut body, &mut mover, &mut pos, &collider, &world, None);
        assert_eq!(result.applied, Vec2::ZERO);
        assert_eq!(pos, Vec2::new(0.0, 0.5));
        assert!(!result.collisions.any());
    }
}
