//! Explosion damage.
//!
//! An [`Explosion`] goes off on the first tick it exists: every hittable
//! collider within `radius` (any team, including the player) takes
//! `damage` and is pushed away from the center by
//! `(target - center) * knockback`. The entity itself lingers until its
//! [`Ttl`](crate::components::ttl::Ttl) runs out.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::collisionlayer::LayerMask;
use crate::components::explosion::Explosion;
use crate::components::mapposition::MapPosition;
use crate::events::combat::HitEvent;
use crate::resources::camerashake::CameraShake;
use crate::resources::collisionworld::CollisionWorld;

pub fn explosion_system(
    world: Res<CollisionWorld>,
    mut shake: Option<ResMut<CameraShake>>,
    mut explosions: Query<(&mut Explosion, &MapPosition)>,
    targets: Query<&MapPosition>,
    mut commands: Commands,
) {
    for (mut explosion, position) in explosions.iter_mut() {
        if explosion.detonated {
            continue;
        }
        explosion.detonated = true;
        if let Some(shake) = shake.as_mut() {
            shake.add(explosion.shake);
        }

        let center = position.pos;
        let caught = world.overlap_circle(center, explosion.radius, LayerMask::MASK_EXPLOSION);
        debug!("Explosion at {:?} caught {} colliders", center, caught.len());
        for target in caught {
            let Ok(target_pos) = targets.get(target) else {
                continue;
            };
            commands.trigger(HitEvent {
                target,
                source: None,
                amount: explosion.damage,
                knockback: (target_pos.pos - center) * explosion.knockback,
            });
        }
    }
}
