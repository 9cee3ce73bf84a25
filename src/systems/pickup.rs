//! Goo pickup collection.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::boxcollider::BoxCollider;
use crate::components::collisionlayer::LayerMask;
use crate::components::mapposition::MapPosition;
use crate::components::pickup::SlimePickup;
use crate::components::player::Player;
use crate::resources::collisionworld::CollisionWorld;
use crate::systems::playercontroller::resize_player;

/// Hand pickups to the player touching them. A pickup stays in the world
/// when the player has no room for any of it.
pub fn pickup_collection(
    world: Res<CollisionWorld>,
    pickups: Query<(Entity, &SlimePickup, &MapPosition, &BoxCollider)>,
    mut players: Query<(&mut Player, &mut BoxCollider), Without<SlimePickup>>,
    mut commands: Commands,
) {
    for (entity, pickup, position, collider) in pickups.iter() {
        let touching = world.overlap_box(&collider.aabb(position.pos), LayerMask::PLAYER);
        for other in touching {
            let Ok((mut player, mut player_collider)) = players.get_mut(other) else {
                continue;
            };
            if player.dead {
                continue;
            }
            let taken = player.add_goo(pickup.slime, pickup.amount);
            if taken > 0 {
                debug!("Picked up {} {:?} goo", taken, pickup.slime);
                resize_player(&player, &mut player_collider);
                commands.entity(entity).try_despawn();
                break;
            }
        }
    }
}
