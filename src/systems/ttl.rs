//! TTL (Time-to-live) system.
//!
//! This module provides the [`ttl_system`] that decrements TTL timers and
//! despawns entities when their time runs out.
//!
//! # System Flow
//!
//! Each tick:
//!
//! 1. `ttl_system` iterates all entities with [`Ttl`](crate::components::ttl::Ttl)
//! 2. Decrements `remaining` by the scaled `delta`
//! 3. When `remaining <= 0`, despawns the entity
//!
//! # Time Scaling
//!
//! The countdown respects [`WorldTime::time_scale`](crate::resources::worldtime::WorldTime),
//! so slow motion stretches slimeball and explosion lifetimes.

use bevy_ecs::prelude::*;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// Decrements TTL and despawns entities when it reaches zero.
///
/// This system runs each tick and:
/// - Subtracts the scaled delta from all [`Ttl`](crate::components::ttl::Ttl) components
/// - Despawns any entity whose TTL reaches zero or below
pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut commands: Commands,
) {
    let dt = world_time.delta; // delta is already scaled by time_scale
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}
