//! Kinematic body: velocity plus the gravity and friction acting on it.
//!
//! The [`RigidBody`] component owns an entity's velocity. Each tick the
//! [`platformer_movement`](crate::systems::movement::platformer_movement)
//! system integrates it:
//!
//! 1. `velocity.y -= gravity * dt * gravity_scale`
//! 2. `velocity.x` moves toward zero by `friction * dt`, never overshooting
//! 3. The displacement `velocity * dt` is handed to the
//!    [`Platformer`](super::platformer::Platformer) for a collision-safe move
//! 4. Any axis blocked during the move has its velocity zeroed
//!
//! Knockback is added straight to `velocity`, so it composes with existing
//! motion and is damped by friction and clipped by collisions next tick.
//!
//! The `frozen` flag skips integration entirely while the position is driven
//! from elsewhere.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::collisionstate::CollisionState;

/// Kinematic body storing velocity and the forces integrated into it.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `gravity` - Downward acceleration in world units per second squared
/// - `friction` - Horizontal deceleration in world units per second squared
/// - `gravity_scale` - Multiplier on gravity for the next step (fall multiplier)
/// - `frozen` - When true, movement system skips all calculations for this entity
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_physics(20.0, 5.0);
/// rb.apply_knockback(Vec2::new(3.0, 1.0));
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Downward acceleration. Positive values pull toward -Y.
    pub gravity: f32,
    /// Rate at which `velocity.x` is pulled back to zero.
    pub friction: f32,
    /// Scales gravity for the next integration step only.
    pub gravity_scale: f32,
    /// When true, movement system skips all physics calculations for this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity, no gravity and no friction.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity: 0.0,
            friction: 0.0,
            gravity_scale: 1.0,
            frozen: false,
        }
    }

    /// Create a RigidBody with gravity and friction configured.
    pub fn with_physics(gravity: f32, friction: f32) -> Self {
        Self {
            gravity,
            friction,
            ..Self::new()
        }
    }

    /// Add an instantaneous velocity change.
    pub fn apply_knockback(&mut self, knockback: Vec2) {
        self.velocity += knockback;
    }

    /// Freeze the rigid body, preventing movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Apply gravity and friction for `dt` seconds and return the
    /// displacement to request from the mover.
    pub fn integrate(&mut self, dt: f32) -> Vec2 {
        self.velocity.y -= self.gravity * dt * self.gravity_scale;
        self.velocity.x = move_towards(self.velocity.x, 0.0, self.friction * dt);
        self.velocity * dt
    }

    /// Zero velocity on every axis the last move was blocked on.
    pub fn resolve_collisions(&mut self, collisions: &CollisionState) {
        if collisions.vertical() {
            self.velocity.y = 0.0;
        }
        if collisions.horizontal() {
            self.velocity.x = 0.0;
        }
    }
}

/// Move `current` toward `target` by at most `max_delta`.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== RIGIDBODY CONSTRUCTOR TESTS ====================

    #[test]
    fn test_rigidbody_new() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert!(approx_eq(rb.gravity, 0.0));
        assert!(approx_eq(rb.friction, 0.0));
        assert!(approx_eq(rb.gravity_scale, 1.0));
        assert!(!rb.frozen);
    }

    #[test]
    fn test_rigidbody_with_physics() {
        let rb = RigidBody::with_physics(20.0, 5.0);
        assert!(approx_eq(rb.gravity, 20.0));
        assert!(approx_eq(rb.friction, 5.0));
        assert_eq!(rb.velocity, Vec2::ZERO);
    }

    // ==================== INTEGRATION TESTS ====================

    #[test]
    fn test_integrate_applies_gravity_downward() {
        let mut rb = RigidBody::with_physics(20.0, 0.0);
        let displacement = rb.integrate(0.5);
        assert!(approx_eq(rb.velocity.y, -10.0));
        assert!(approx_eq(displacement.y, -5.0));
    }

    #[test]
    fn test_integrate_scales_gravity() {
        let mut rb = RigidBody::with_physics(10.0, 0.0);
        rb.gravity_scale = 2.0;
        rb.integrate(1.0);
        assert!(approx_eq(rb.velocity.y, -20.0));
    }

    #[test]
    fn test_friction_moves_toward_zero() {
        let mut rb = RigidBody::with_physics(0.0, 4.0);
        rb.velocity.x = 3.0;
        rb.integrate(0.5);
        assert!(approx_eq(rb.velocity.x, 1.0));

        rb.velocity.x = -3.0;
        rb.integrate(0.5);
        assert!(approx_eq(rb.velocity.x, -1.0));
    }

    #[test]
    fn test_friction_never_overshoots_zero() {
        let mut rb = RigidBody::with_physics(0.0, 100.0);
        rb.velocity.x = 0.5;
        rb.integrate(1.0);
        assert_eq!(rb.velocity.x, 0.0);
    }

    #[test]
    fn test_resolve_collisions_zeroes_blocked_axes() {
        let mut rb = RigidBody::new();
        rb.velocity = Vec2::new(4.0, -6.0);
        rb.resolve_collisions(&CollisionState {
            bottom: true,
            ..Default::default()
        });
        assert_eq!(rb.velocity, Vec2::new(4.0, 0.0));

        rb.velocity = Vec2::new(4.0, 2.0);
        rb.resolve_collisions(&CollisionState {
            left: true,
            ..Default::default()
        });
        assert_eq!(rb.velocity, Vec2::new(0.0, 2.0));
    }

    // ==================== VELOCITY TESTS ====================

    #[test]
    fn test_knockback_adds_to_velocity() {
        let mut rb = RigidBody::new();
        rb.apply_knockback(Vec2::new(3.0, 1.0));
        assert_eq!(rb.velocity, Vec2::new(3.0, 1.0));
        rb.apply_knockback(Vec2::new(-1.0, 1.0));
        assert_eq!(rb.velocity, Vec2::new(2.0, 2.0));
    }

    // ==================== FREEZE TESTS ====================

    #[test]
    fn test_freeze() {
        let mut rb = RigidBody::new();
        rb.freeze();
        assert!(rb.frozen);
    }

    #[test]
    fn test_move_towards() {
        assert!(approx_eq(move_towards(5.0, 0.0, 2.0), 3.0));
        assert!(approx_eq(move_towards(-5.0, 0.0, 2.0), -3.0));
        assert!(approx_eq(move_towards(1.0, 0.0, 2.0), 0.0));
        assert!(approx_eq(move_towards(0.0, 0.0, 2.0), 0.0));
    }
}
