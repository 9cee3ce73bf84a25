//! Combat events.
//!
//! A [`HitEvent`] asks a target to take damage. The generic
//! [`hit_observer`](crate::systems::combat::hit_observer) dispatches it to
//! the target's [`Hittable`](crate::components::hittable::Hittable)
//! component, applies knockback and, when the target dies, triggers a
//! [`KilledEvent`] handled by
//! [`killed_observer`](crate::systems::combat::killed_observer).
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::hittable::Team;

#[derive(Event, Debug, Clone, Copy)]
pub struct HitEvent {
    pub target: Entity,
    /// Team of the attacker. `None` hits every team (explosions).
    pub source: Option<Team>,
    pub amount: i32,
    /// Added to the target's velocity when the hit lands.
    pub knockback: Vec2,
}

/// A hittable entity died.
#[derive(Event, Debug, Clone, Copy)]
pub struct KilledEvent {
    pub entity: Entity,
    pub team: Team,
}
