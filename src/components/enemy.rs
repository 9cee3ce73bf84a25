//! Enemy state and behaviour variants.
//!
//! Every enemy shares the same pursuit movement and health. What differs is
//! captured by [`EnemyBehavior`]: a normal enemy deals contact damage and
//! drops goo on death, an exploding enemy detonates when it touches the
//! player or runs out of patience while stuck.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::hittable::{HitOutcome, Hittable, Team};
use crate::components::slime::SlimeType;
use crate::resources::gameconfig::EnemyConfig;

/// Contact knockback direction, scaled by the enemy's horizontal speed and
/// its damage.
pub const CONTACT_KNOCKBACK: Vec2 = Vec2::new(1.0, 0.5);

/// Which enemy prefab to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Normal,
    Exploding,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyBehavior {
    Normal,
    Exploding {
        /// Seconds of standing still tolerated before detonating.
        patience: f32,
        remaining: f32,
        /// X position at the end of the previous tick.
        last_x: f32,
    },
}

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub move_speed: f32,
    pub acceleration: f32,
    pub jump_speed: f32,
    pub health: i32,
    pub damage: i32,
    /// Goo type dropped on death.
    pub drop: SlimeType,
    /// Entity to pursue. Nothing happens while unset or despawned.
    pub target: Option<Entity>,
    pub behavior: EnemyBehavior,
}

impl Enemy {
    pub fn from_config(config: &EnemyConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            acceleration: config.acceleration,
            jump_speed: config.jump_speed,
            health: config.health,
            damage: config.damage,
            drop: SlimeType::Green,
            target: None,
            behavior: EnemyBehavior::Normal,
        }
    }

    pub fn with_target(mut self, target: Option<Entity>) -> Self {
        self.target = target;
        self
    }

    pub fn with_drop(mut self, drop: SlimeType) -> Self {
        self.drop = drop;
        self
    }

    /// Turn into an exploding enemy spawned at `x`.
    pub fn exploding(mut self, patience: f32, x: f32) -> Self {
        self.behavior = EnemyBehavior::Exploding {
            patience,
            remaining: patience,
            last_x: x,
        };
        self
    }

    pub fn kind(&self) -> EnemyKind {
        match self.behavior {
            EnemyBehavior::Normal => EnemyKind::Normal,
            EnemyBehavior::Exploding { .. } => EnemyKind::Exploding,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Horizontal velocity after one pursuit step toward `target_x`.
    pub fn pursue(&self, x: f32, target_x: f32, velocity_x: f32) -> f32 {
        let direction = (target_x - x).signum();
        (velocity_x + direction * self.acceleration).clamp(-self.move_speed, self.move_speed)
    }

    /// Knockback dealt to whatever this enemy touches.
    pub fn contact_knockback(&self, velocity_x: f32) -> Vec2 {
        CONTACT_KNOCKBACK * velocity_x * self.damage as f32
    }

    /// Advance the patience timer of an exploding enemy now at `x`.
    /// Returns true when it should detonate. Normal enemies never do.
    pub fn update_patience(&mut self, x: f32, dt: f32) -> bool {
        let threshold = (self.move_speed - 1.0) * dt;
        let EnemyBehavior::Exploding {
            patience,
            remaining,
            last_x,
        } = &mut self.behavior
        else {
            return false;
        };

        let mut detonate = false;
        if (*last_x - x).abs() < threshold {
            *remaining -= dt;
            detonate = *remaining <= 0.0;
        } else if *remaining < *patience {
            *remaining = *patience;
        }
        *last_x = x;
        detonate
    }

    /// Fraction of patience used up, for a fuse indicator.
    pub fn fuse_progress(&self) -> f32 {
        match self.behavior {
            EnemyBehavior::Normal => 0.0,
            EnemyBehavior::Exploding {
                patience, remaining, ..
            } if patience > 0.0 => (1.0 - remaining / patience).clamp(0.0, 1.0),
            EnemyBehavior::Exploding { .. } => 1.0,
        }
    }
}

impl Hittable for Enemy {
    fn team(&self) -> Team {
        Team::Enemy
    }

    fn on_hit(&mut self, amount: i32, _knockback: Vec2) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Ignored;
        }
        self.health -= amount;
        if self.is_dead() {
            HitOutcome::Destroyed { shake: 0.0 }
        } else {
            HitOutcome::Damaged { shake: 0.0 }
        }
    }
}
