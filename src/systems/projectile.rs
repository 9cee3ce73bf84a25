//! Slimeball flight and impact effects.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::hittable::Team;
use crate::components::mapposition::MapPosition;
use crate::components::projectile::Projectile;
use crate::components::slime::SlimeType;
use crate::components::slimeblock::{SlimeBlock, snap_to_block_grid};
use crate::events::combat::HitEvent;
use crate::events::projectile::ProjectileImpactEvent;
use crate::game::{explosion_bundle, pickup_bundle, slime_block_bundle};
use crate::resources::collisionworld::CollisionWorld;
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Surfaces whose normal is this close to up collect green goo.
const GREEN_SURFACE_MIN_DOT: f32 = 0.9;

/// Knockback per unit of distance from the ball to the struck entity.
const IMPACT_KNOCKBACK: f32 = 2.0;

pub fn projectile_system(
    time: Res<WorldTime>,
    world: Res<CollisionWorld>,
    mut query: Query<(Entity, &mut Projectile, &mut MapPosition)>,
    mut commands: Commands,
) {
    for (entity, mut projectile, mut position) in query.iter_mut() {
        let mut pos = position.pos;
        let hit = projectile.advance(&mut pos, time.delta, &*world, Some(entity));
        position.pos = pos;

        if let Some(hit) = hit {
            commands.trigger(ProjectileImpactEvent {
                projectile: entity,
                slime: projectile.slime,
                position: pos,
                hit,
            });
        }
    }
}

/// Damage whatever the ball struck, leave the slime type's mark, and remove
/// the ball.
pub fn projectile_impact_observer(
    trigger: On<ProjectileImpactEvent>,
    config: Res<GameConfig>,
    targets: Query<(&Team, &MapPosition, Has<SlimeBlock>)>,
    mut commands: Commands,
) {
    let impact = *trigger.event();
    let mut struck_enemy = false;

    if let Some((target, (team, target_pos, is_block))) = impact
        .hit
        .entity
        .and_then(|e| targets.get(e).ok().map(|t| (e, t)))
        && *team != Team::Player
    {
        struck_enemy = *team == Team::Enemy;
        // Purple shots build on blocks instead of breaking them.
        if !(impact.slime == SlimeType::Purple && is_block) {
            commands.trigger(HitEvent {
                target,
                source: Some(Team::Player),
                amount: 1,
                knockback: (target_pos.pos - impact.position) * IMPACT_KNOCKBACK,
            });
        }
    }

    match impact.slime {
        SlimeType::Green => {
            if !struck_enemy && impact.hit.normal.dot(Vec2::Y) > GREEN_SURFACE_MIN_DOT {
                let rest = impact.hit.point + Vec2::Y * (config.pickup.size.y * 0.5);
                commands.spawn(pickup_bundle(&config, rest, SlimeType::Green));
            }
        }
        SlimeType::Purple => {
            if !struck_enemy {
                commands.spawn(slime_block_bundle(snap_to_block_grid(impact.position)));
            }
        }
        SlimeType::Gold => {
            commands.spawn(explosion_bundle(&config, impact.hit.point));
        }
    }

    debug!("{:?} slimeball hit at {:?}", impact.slime, impact.hit.point);
    commands.entity(impact.projectile).try_despawn();
}
