//! Hit resolution and death handling.
//!
//! Attackers never touch their targets directly. They trigger a
//! [`HitEvent`]; one [`hit_observer`] per [`Hittable`] component type picks
//! up the hits aimed at entities carrying that component. A lethal hit
//! triggers a [`KilledEvent`], handled by [`killed_observer`].
//!
//! # Hit Flow
//!
//! 1. Friendly fire is dropped (`Team::accepts_hit_from`)
//! 2. `Hittable::on_hit` updates the target's own state
//! 3. If the hit landed, knockback is added to the target's [`RigidBody`]
//!    and the outcome's shake goes to [`CameraShake`]
//! 4. A `Destroyed` outcome triggers [`KilledEvent`]

use bevy_ecs::component::Mutable;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::enemy::Enemy;
use crate::components::hittable::{HitOutcome, Hittable, Team};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::combat::{HitEvent, KilledEvent};
use crate::events::wave::PlayerDefeatedEvent;
use crate::game::pickup_bundle;
use crate::resources::camerashake::{CameraShake, MAX_SHAKE};
use crate::resources::gameconfig::GameConfig;
use crate::resources::wavespawner::WaveSpawner;
use crate::systems::wave::count_enemy_kill;

pub fn hit_observer<H: Hittable + Component<Mutability = Mutable>>(
    trigger: On<HitEvent>,
    mut targets: Query<(&mut H, Option<&mut RigidBody>)>,
    mut shake: Option<ResMut<CameraShake>>,
    mut commands: Commands,
) {
    let hit = *trigger.event();
    let Ok((mut target, body)) = targets.get_mut(hit.target) else {
        return;
    };
    let team = target.team();
    if !team.accepts_hit_from(hit.source) {
        return;
    }

    let outcome = target.on_hit(hit.amount, hit.knockback);
    if !outcome.landed() {
        return;
    }
    debug!("{:?} hit for {} -> {:?}", hit.target, hit.amount, outcome);

    if let Some(mut body) = body {
        body.apply_knockback(hit.knockback);
    }
    if let Some(shake) = shake.as_mut() {
        shake.add(outcome.shake());
    }
    if let HitOutcome::Destroyed { .. } = outcome {
        commands.trigger(KilledEvent {
            entity: hit.target,
            team,
        });
    }
}

pub fn killed_observer(
    trigger: On<KilledEvent>,
    config: Res<GameConfig>,
    enemies: Query<(&Enemy, &MapPosition)>,
    mut spawner: Option<ResMut<WaveSpawner>>,
    mut shake: Option<ResMut<CameraShake>>,
    mut commands: Commands,
) {
    let killed = *trigger.event();
    match killed.team {
        Team::Enemy => {
            if let Ok((enemy, position)) = enemies.get(killed.entity) {
                commands.spawn(pickup_bundle(&config, position.pos + Vec2::Y, enemy.drop));
            }
            count_enemy_kill(spawner.as_deref_mut(), &mut commands);
            commands.entity(killed.entity).try_despawn();
        }
        Team::Neutral => {
            commands.entity(killed.entity).try_despawn();
        }
        Team::Player => {
            if let Some(shake) = shake.as_mut() {
                shake.add(MAX_SHAKE);
            }
            let waves_survived = spawner.as_ref().map_or(0, |s| s.wave_number());
            info!("You lasted {} waves", waves_survived);
            commands.trigger(PlayerDefeatedEvent { waves_survived });
        }
    }
}
