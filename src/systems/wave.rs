//! Wave progression: the ready region and the enemy spawner.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::boxcollider::BoxCollider;
use crate::components::collisionlayer::LayerMask;
use crate::components::hittable::Team;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::readyregion::ReadyRegion;
use crate::events::wave::{WaveClearedEvent, WaveStartedEvent};
use crate::game::enemy_bundle;
use crate::resources::collisionworld::CollisionWorld;
use crate::resources::gameconfig::GameConfig;
use crate::resources::wavespawner::{SpawnTick, WaveSpawner};
use crate::resources::worldtime::WorldTime;

/// Count one enemy death against the running wave.
pub fn count_enemy_kill(spawner: Option<&mut WaveSpawner>, commands: &mut Commands) {
    let Some(spawner) = spawner else {
        return;
    };
    if let Some(wave) = spawner.on_enemy_killed() {
        commands.trigger(WaveClearedEvent { wave });
    }
}

/// Start the next wave when the player steps into a ready region.
///
/// A region fires on entry only: it re-arms once the player has left it.
pub fn ready_region_system(
    world: Res<CollisionWorld>,
    mut spawner: ResMut<WaveSpawner>,
    mut regions: Query<(&mut ReadyRegion, &MapPosition, &BoxCollider)>,
    teams: Query<&Team>,
    mut commands: Commands,
) {
    for (mut region, position, collider) in regions.iter_mut() {
        let inside = world
            .overlap_box(&collider.aabb(position.pos), LayerMask::PLAYER)
            .iter()
            .any(|e| teams.get(*e).is_ok_and(|t| *t == Team::Player));

        if inside && region.armed {
            if let Some((wave, enemies)) = spawner.start_next_wave() {
                commands.trigger(WaveStartedEvent { wave, enemies });
            }
        }
        region.armed = !inside;
    }
}

/// Spawn the enemies of the running wave, one per `spawn_delay`.
pub fn wave_spawner_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut spawner: ResMut<WaveSpawner>,
    players: Query<Entity, With<Player>>,
    mut commands: Commands,
) {
    let order = match spawner.tick(time.delta) {
        Some(SpawnTick::Spawn(order)) => order,
        Some(SpawnTick::Cleared(wave)) => {
            commands.trigger(WaveClearedEvent { wave });
            return;
        }
        None => return,
    };
    let target = players.iter().next();
    if target.is_none() {
        warn!("Spawning {:?} with nothing to chase", order.kind);
    }
    debug!("Spawning {:?} at {:?}", order.kind, order.position);
    commands.spawn(enemy_bundle(&config, order.kind, order.position, target));
}
