//! Player intent for one tick.
//!
//! Input polling lives outside the simulation. Whatever drives the player (a
//! window's keyboard and mouse, a replay, the scripted pilot in `main.rs`)
//! writes a [`PlayerInput`] each tick and the
//! [`player_controller`](crate::systems::playercontroller::player_controller)
//! system turns it into movement and shots.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Movement and shooting intent derived from player input.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    /// Horizontal axis in `[-1, 1]`.
    pub horizontal: f32,
    /// Jump was pressed this tick.
    pub jump_pressed: bool,
    /// Jump is being held; releasing it early cuts the jump short.
    pub jump_held: bool,
    /// Fire is being held.
    pub fire: bool,
    /// Aim direction relative to the player; need not be normalized.
    pub aim: Vec2,
    /// Slime type selection steps (scroll wheel), usually -1, 0 or 1.
    pub cycle: i32,
}

impl PlayerInput {
    /// Clear one-shot inputs after they have been consumed.
    pub fn consume_edges(&mut self) {
        self.jump_pressed = false;
        self.cycle = 0;
    }
}
