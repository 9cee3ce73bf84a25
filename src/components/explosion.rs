use bevy_ecs::prelude::Component;

use crate::resources::gameconfig::ExplosionConfig;

/// Area blast. Detonates once on the first tick it exists, hitting every
/// hittable collider inside `radius` regardless of team, then lingers until
/// its [`Ttl`](super::ttl::Ttl) runs out.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub radius: f32,
    pub damage: i32,
    /// Knockback is `(target - center) * knockback`.
    pub knockback: f32,
    pub shake: f32,
    pub detonated: bool,
}

impl Explosion {
    pub fn from_config(config: &ExplosionConfig) -> Self {
        Self {
            radius: config.radius,
            damage: config.damage,
            knockback: config.knockback,
            shake: config.shake,
            detonated: false,
        }
    }
}
