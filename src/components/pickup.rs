use bevy_ecs::prelude::Component;

use crate::components::slime::SlimeType;

/// Collectable goo. Touching it adds `amount` of `slime` to the player, up
/// to the player's free capacity; a full player leaves it lying.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SlimePickup {
    pub slime: SlimeType,
    pub amount: i32,
}

impl SlimePickup {
    pub fn new(slime: SlimeType, amount: i32) -> Self {
        Self { slime, amount }
    }
}
