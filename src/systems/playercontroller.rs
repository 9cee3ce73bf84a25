//! Player input handling: slime cycling, shooting and movement.
//!
//! Reads the [`PlayerInput`] intent component written by the host and turns
//! it into velocity changes and slimeball spawns. Runs before
//! [`platformer_movement`](super::movement::platformer_movement) so the new
//! velocity is integrated on the same tick.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::hittable::Team;
use crate::components::inputcontrolled::PlayerInput;
use crate::components::mapposition::MapPosition;
use crate::components::platformer::Platformer;
use crate::components::player::{FireResult, Player};
use crate::components::rigidbody::RigidBody;
use crate::events::combat::KilledEvent;
use crate::game::projectile_bundle;
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Rate at which a released jump bleeds off upward speed.
const JUMP_CUT_RATE: f32 = 15.0;

/// Upward speed below which releasing jump has no effect.
const JUMP_CUT_MIN_SPEED: f32 = 1.0;

/// Horizontal acceleration and jumping for one tick.
///
/// `grounded` is the bottom flag of the previous move.
pub fn apply_player_motion(
    player: &Player,
    input: &PlayerInput,
    body: &mut RigidBody,
    grounded: bool,
    dt: f32,
) {
    let horizontal = input.horizontal.clamp(-1.0, 1.0);
    body.velocity.x = (body.velocity.x + horizontal * player.acceleration * dt)
        .clamp(-player.move_speed, player.move_speed);

    if grounded && input.jump_pressed {
        body.velocity.y = player.jump_speed;
    } else if body.velocity.y > JUMP_CUT_MIN_SPEED && !input.jump_held {
        let t = (dt * JUMP_CUT_RATE).min(1.0);
        body.velocity.y += (0.0 - body.velocity.y) * t;
    }

    body.gravity_scale = if body.velocity.y < 0.0 {
        player.fall_gravity_multiplier
    } else {
        1.0
    };
}

/// Match the collider to the player's goo-dependent scale.
pub fn resize_player(player: &Player, collider: &mut BoxCollider) {
    collider.size = player.scaled_size();
}

#[allow(clippy::type_complexity)]
pub fn player_controller(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut query: Query<(
        Entity,
        &mut Player,
        &mut PlayerInput,
        &mut RigidBody,
        &Platformer,
        &mut BoxCollider,
        &MapPosition,
    )>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut player, mut input, mut body, mover, mut collider, position) in query.iter_mut() {
        if player.dead {
            input.consume_edges();
            continue;
        }
        player.tick(dt);

        if input.cycle != 0 {
            player.cycle_slime(input.cycle);
            debug!("Active slime: {:?}", player.active);
        }

        if input.fire {
            match player.fire(time.elapsed, input.aim, body.velocity) {
                FireResult::Fired { slime, velocity } => {
                    let muzzle = position.pos + input.aim.normalize_or_zero() * collider.size.x;
                    commands.spawn(projectile_bundle(&config, muzzle, velocity, slime));
                    resize_player(&player, &mut collider);
                    if player.dead {
                        info!("Player spent the last of their goo");
                        commands.trigger(KilledEvent {
                            entity,
                            team: Team::Player,
                        });
                    }
                }
                FireResult::Empty => debug!("No {:?} goo left", player.active),
                FireResult::Cooldown => {}
            }
        }

        apply_player_motion(&player, &input, &mut body, mover.is_grounded(), dt);
        input.consume_edges();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gameconfig::PlayerConfig;

    const EPSILON: f32 = 1e-4;
    const DT: f32 = 0.1;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn player() -> Player {
        Player::from_config(&PlayerConfig::default())
    }

    #[test]
    fn test_acceleration_clamped_to_move_speed() {
        let p = player();
        let mut body = RigidBody::new();
        let input = PlayerInput {
            horizontal: 1.0,
            ..Default::default()
        };
        apply_player_motion(&p, &input, &mut body, true, DT);
        assert!(approx_eq(body.velocity.x, 6.0));
        apply_player_motion(&p, &input, &mut body, true, DT);
        assert!(approx_eq(body.velocity.x, 8.0));
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let p = player();
        let mut body = RigidBody::new();
        let input = PlayerInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        apply_player_motion(&p, &input, &mut body, false, DT);
        assert_eq!(body.velocity.y, 0.0);
        apply_player_motion(&p, &input, &mut body, true, DT);
        assert!(approx_eq(body.velocity.y, p.jump_speed));
    }

    #[test]
    fn test_released_jump_cuts_rise() {
        let p = player();
        let mut body = RigidBody::new();
        body.velocity.y = 10.0;
        apply_player_motion(&p, &PlayerInput::default(), &mut body, false, DT);
        // t = min(0.1 * 15, 1) = 1
        assert_eq!(body.velocity.y, 0.0);

        body.velocity.y = 10.0;
        apply_player_motion(&p, &PlayerInput::default(), &mut body, false, 0.02);
        assert!(approx_eq(body.velocity.y, 7.0));
    }

    #[test]
    fn test_fall_multiplier_only_while_falling() {
        let p = player();
        let mut body = RigidBody::new();
        body.velocity.y = -1.0;
        apply_player_motion(&p, &PlayerInput::default(), &mut body, false, DT);
        assert!(approx_eq(body.gravity_scale, 1.5));

        body.velocity.y = 0.5;
        apply_player_motion(&p, &PlayerInput::default(), &mut body, false, DT);
        assert!(approx_eq(body.gravity_scale, 1.0));
    }

    #[test]
    fn test_resize_follows_goo() {
        let mut p = player();
        let mut collider = BoxCollider::new(1.0, 1.5);
        p.set_current_goo(0);
        p.active = p.active.cycle(1);
        p.set_current_goo(0);
        p.active = p.active.cycle(1);
        p.set_current_goo(0);
        resize_player(&p, &mut collider);
        assert!(approx_eq(collider.size.x, 0.5));
        assert!(approx_eq(collider.size.y, 0.75));
    }
}
