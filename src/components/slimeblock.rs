//! Solid block built by purple slimeballs.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::hittable::{HitOutcome, Hittable, Team};

/// Side length of a slime block; blocks snap to a grid of this size.
pub const SLIME_BLOCK_SIZE: f32 = 2.0;

/// Snap a point to the slime block grid.
pub fn snap_to_block_grid(point: Vec2) -> Vec2 {
    (point / SLIME_BLOCK_SIZE).round() * SLIME_BLOCK_SIZE
}

/// Neutral obstacle destroyed by any hit.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SlimeBlock {
    pub destroyed: bool,
}

impl Hittable for SlimeBlock {
    fn team(&self) -> Team {
        Team::Neutral
    }

    fn on_hit(&mut self, _amount: i32, _knockback: Vec2) -> HitOutcome {
        if self.destroyed {
            return HitOutcome::Ignored;
        }
        self.destroyed = true;
        HitOutcome::Destroyed { shake: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_even_grid() {
        assert_eq!(snap_to_block_grid(Vec2::new(2.9, -1.1)), Vec2::new(2.0, -2.0));
        assert_eq!(snap_to_block_grid(Vec2::new(3.1, 0.9)), Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_destroyed_by_first_hit_only() {
        let mut block = SlimeBlock::default();
        assert_eq!(block.on_hit(1, Vec2::ZERO), HitOutcome::Destroyed { shake: 0.0 });
        assert_eq!(block.on_hit(1, Vec2::ZERO), HitOutcome::Ignored);
        assert_eq!(block.team(), Team::Neutral);
    }
}
