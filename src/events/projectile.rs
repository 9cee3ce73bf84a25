use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::slime::SlimeType;
use crate::resources::collisionworld::RaycastHit;

/// A slimeball struck something.
///
/// The [`projectile_impact_observer`](crate::systems::projectile::projectile_impact_observer)
/// damages the struck entity, spawns the slime-type effect and despawns the
/// ball.
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileImpactEvent {
    pub projectile: Entity,
    pub slime: SlimeType,
    /// Where the ball stopped (sweep centroid).
    pub position: Vec2,
    pub hit: RaycastHit,
}
