//! Enemy behaviour: pursuit, patience fuses and contact damage.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::boxcollider::BoxCollider;
use crate::components::collisionlayer::LayerMask;
use crate::components::enemy::{Enemy, EnemyBehavior};
use crate::components::hittable::Team;
use crate::components::mapposition::MapPosition;
use crate::components::platformer::Platformer;
use crate::components::rigidbody::RigidBody;
use crate::events::combat::HitEvent;
use crate::game::explosion_bundle;
use crate::resources::collisionworld::CollisionWorld;
use crate::resources::gameconfig::GameConfig;
use crate::resources::wavespawner::WaveSpawner;
use crate::resources::worldtime::WorldTime;
use crate::systems::wave::count_enemy_kill;

/// Steer every enemy toward its target and jump over obstacles.
///
/// Enemies without a live target get no input this tick.
pub fn enemy_controller(
    mut enemies: Query<(&Enemy, &MapPosition, &mut RigidBody, &Platformer)>,
    targets: Query<&MapPosition>,
) {
    for (enemy, position, mut body, mover) in enemies.iter_mut() {
        let Some(target) = enemy.target.and_then(|t| targets.get(t).ok()) else {
            continue;
        };
        body.velocity.x = enemy.pursue(position.pos.x, target.pos.x, body.velocity.x);
        if mover.collisions.horizontal() && mover.is_grounded() {
            body.velocity.y = enemy.jump_speed;
        }
    }
}

/// Replace an exploding enemy with an explosion.
///
/// Marks the enemy dead first so nothing else counts it again this tick.
fn detonate(
    commands: &mut Commands,
    config: &GameConfig,
    spawner: Option<&mut WaveSpawner>,
    entity: Entity,
    enemy: &mut Enemy,
    at: Vec2,
) {
    debug!("{:?} detonated at {:?}", entity, at);
    enemy.health = 0;
    commands.spawn(explosion_bundle(config, at));
    count_enemy_kill(spawner, commands);
    commands.entity(entity).try_despawn();
}

/// Run down the patience of exploding enemies. Runs after movement so the
/// distance covered this tick is measured.
pub fn exploding_enemy_patience(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut spawner: Option<ResMut<WaveSpawner>>,
    mut enemies: Query<(Entity, &mut Enemy, &MapPosition)>,
    mut commands: Commands,
) {
    for (entity, mut enemy, position) in enemies.iter_mut() {
        if enemy.is_dead() {
            continue;
        }
        if enemy.update_patience(position.pos.x, time.delta) {
            detonate(
                &mut commands,
                &config,
                spawner.as_deref_mut(),
                entity,
                &mut enemy,
                position.pos,
            );
        }
    }
}

/// Enemies touching the player: normal ones hurt it, exploding ones go off.
pub fn enemy_contact(
    world: Res<CollisionWorld>,
    config: Res<GameConfig>,
    mut spawner: Option<ResMut<WaveSpawner>>,
    mut enemies: Query<(Entity, &mut Enemy, &MapPosition, &BoxCollider, &RigidBody)>,
    teams: Query<&Team>,
    mut commands: Commands,
) {
    for (entity, mut enemy, position, collider, body) in enemies.iter_mut() {
        if enemy.is_dead() {
            continue;
        }
        let behavior = enemy.behavior;
        let touching = world.overlap_box(&collider.aabb(position.pos), LayerMask::PLAYER);
        for target in touching {
            if !teams.get(target).is_ok_and(|t| *t == Team::Player) {
                continue;
            }
            match behavior {
                EnemyBehavior::Normal => {
                    commands.trigger(HitEvent {
                        target,
                        source: Some(Team::Enemy),
                        amount: enemy.damage,
                        knockback: enemy.contact_knockback(body.velocity.x),
                    });
                }
                EnemyBehavior::Exploding { .. } => {
                    detonate(
                        &mut commands,
                        &config,
                        spawner.as_deref_mut(),
                        entity,
                        &mut enemy,
                        position.pos,
                    );
                    break;
                }
            }
        }
    }
}
