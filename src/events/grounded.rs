//! Landing notification.
use bevy_ecs::prelude::*;
use glam::Vec2;

/// Fired once when a [`Platformer`](crate::components::platformer::Platformer)
/// lands: its bottom was blocked on this move and was not on the previous one.
///
/// Staying on the ground does not fire it again; the next landing requires
/// leaving the ground first.
#[derive(Event, Debug, Clone, Copy)]
pub struct GroundedEvent {
    pub entity: Entity,
    /// Bottom-center of the box at the moment of landing.
    pub point: Vec2,
}
