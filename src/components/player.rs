//! Player state: goo reserves, shooting cadence and hit handling.
//!
//! The player carries three goo reserves, one per [`SlimeType`]. Goo is both
//! ammunition and health: every shot costs [`SHOT_COST`] from the active
//! reserve, every hit drains the reserves, and the player dies when all
//! three are empty. The player's size follows the total amount of goo.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::hittable::{HitOutcome, Hittable, Team};
use crate::components::slime::SlimeType;
use crate::resources::gameconfig::PlayerConfig;

/// Goo spent per slimeball.
pub const SHOT_COST: i32 = 2;

/// Derive `(gravity, jump_speed)` reaching `height` at the apex after `time`
/// seconds.
pub fn jump_physics(height: f32, time: f32) -> (f32, f32) {
    let gravity = (2.0 * height) / (time * time);
    (gravity, gravity.abs() * time)
}

/// Result of pulling the trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireResult {
    /// Still cooling down since the last shot.
    Cooldown,
    /// Shot attempted with an empty active reserve.
    Empty,
    Fired { slime: SlimeType, velocity: Vec2 },
}

#[derive(Component, Debug, Clone)]
pub struct Player {
    pub move_speed: f32,
    pub acceleration: f32,
    pub jump_speed: f32,
    pub fall_gravity_multiplier: f32,
    /// Seconds between shots.
    pub shot_delay: f32,
    pub shot_launch_speed: f32,
    /// World time of the last trigger pull.
    pub last_shot: f32,
    pub max_goo: i32,
    goo: [i32; 3],
    pub active: SlimeType,
    /// Remaining invincibility after a hit.
    pub invincible: f32,
    pub invincibility_time: f32,
    /// Collider size at full goo.
    pub base_size: Vec2,
    pub dead: bool,
}

impl Player {
    pub fn from_config(config: &PlayerConfig) -> Self {
        let (_, jump_speed) = jump_physics(config.jump_height, config.jump_time);
        let third = config.max_goo / 3;
        Self {
            move_speed: config.move_speed,
            acceleration: config.acceleration,
            jump_speed,
            fall_gravity_multiplier: config.fall_gravity_multiplier,
            shot_delay: 1.0 / config.rate_of_fire,
            shot_launch_speed: config.shot_launch_speed,
            last_shot: 0.0,
            max_goo: config.max_goo,
            goo: [third; 3],
            active: SlimeType::Green,
            invincible: 0.0,
            invincibility_time: config.invincibility_time,
            base_size: config.size,
            dead: false,
        }
    }

    pub fn goo(&self, slime: SlimeType) -> i32 {
        self.goo[slime.index()]
    }

    pub fn total_goo(&self) -> i32 {
        self.goo.iter().sum()
    }

    pub fn current_goo(&self) -> i32 {
        self.goo(self.active)
    }

    /// Set the active reserve, never below zero.
    pub fn set_current_goo(&mut self, amount: i32) {
        self.goo[self.active.index()] = amount.max(0);
    }

    pub fn cycle_slime(&mut self, steps: i32) {
        self.active = self.active.cycle(steps);
    }

    /// Size factor in `[0.5, 1.0]` following the total goo.
    pub fn scale(&self) -> f32 {
        let fill = self.total_goo() as f32 / self.max_goo as f32;
        (fill + 1.0) * 0.5
    }

    pub fn scaled_size(&self) -> Vec2 {
        self.base_size * self.scale()
    }

    /// Add goo from a pickup, limited by the free capacity. Returns the
    /// amount actually taken.
    pub fn add_goo(&mut self, slime: SlimeType, amount: i32) -> i32 {
        let taken = (self.max_goo - self.total_goo()).min(amount);
        if taken > 0 {
            self.goo[slime.index()] += taken;
        }
        taken.max(0)
    }

    /// Drain `amount` from the reserves, starting at the active type and
    /// wrapping through the others.
    ///
    /// Returns the amount left in hand when the loop stops: the share taken
    /// from the last reserve touched, or the unpaid remainder when every
    /// reserve ran dry.
    pub fn absorb_hit(&mut self, mut amount: i32) -> i32 {
        for i in 0..3 {
            let slime = self.active.cycle(i);
            let taken = self.goo[slime.index()].min(amount);
            self.goo[slime.index()] -= taken;
            if taken >= amount {
                break;
            }
            amount -= taken;
        }
        amount
    }

    /// Slimeball velocity for an aim direction. The player's own velocity is
    /// inherited when it points the same horizontal way as the shot.
    pub fn shot_velocity(&self, aim: Vec2, player_velocity: Vec2) -> Vec2 {
        let launch = aim.normalize_or_zero() * self.shot_launch_speed;
        if launch.x.signum() == player_velocity.x.signum() {
            launch + player_velocity
        } else {
            launch
        }
    }

    /// Pull the trigger at world time `now`.
    pub fn fire(&mut self, now: f32, aim: Vec2, player_velocity: Vec2) -> FireResult {
        if now < self.last_shot + self.shot_delay {
            return FireResult::Cooldown;
        }
        self.last_shot = now;
        if self.current_goo() <= 0 {
            return FireResult::Empty;
        }

        let slime = self.active;
        let velocity = self.shot_velocity(aim, player_velocity);
        self.set_current_goo(self.current_goo() - SHOT_COST);
        if self.total_goo() <= 0 {
            self.dead = true;
        }
        FireResult::Fired { slime, velocity }
    }

    /// Count down invincibility.
    pub fn tick(&mut self, dt: f32) {
        if self.invincible > 0.0 {
            self.invincible -= dt;
        }
    }
}

impl Hittable for Player {
    fn team(&self) -> Team {
        Team::Player
    }

    fn on_hit(&mut self, amount: i32, _knockback: Vec2) -> HitOutcome {
        if self.dead || self.invincible > 0.0 {
            return HitOutcome::Ignored;
        }
        self.invincible = self.invincibility_time;

        let residual = self.absorb_hit(amount);
        let shake = (residual / 2) as f32;
        if self.total_goo() <= 0 {
            self.dead = true;
            HitOutcome::Destroyed { shake }
        } else {
            HitOutcome::Damaged { shake }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn player() -> Player {
        Player::from_config(&PlayerConfig::default())
    }

    // ==================== SETUP TESTS ====================

    #[test]
    fn test_jump_physics() {
        let (gravity, jump_speed) = jump_physics(4.0, 0.5);
        assert!(approx_eq(gravity, 32.0));
        assert!(approx_eq(jump_speed, 16.0));
    }

    #[test]
    fn test_starts_with_a_third_of_each() {
        let p = player();
        assert_eq!(p.goo(SlimeType::Green), 33);
        assert_eq!(p.goo(SlimeType::Purple), 33);
        assert_eq!(p.goo(SlimeType::Gold), 33);
        assert_eq!(p.total_goo(), 99);
        assert!(approx_eq(p.scale(), (0.99 + 1.0) * 0.5));
    }

    // ==================== GOO TESTS ====================

    #[test]
    fn test_add_goo_capped_by_capacity() {
        let mut p = player();
        assert_eq!(p.add_goo(SlimeType::Gold, 5), 1);
        assert_eq!(p.goo(SlimeType::Gold), 34);
        assert_eq!(p.add_goo(SlimeType::Gold, 5), 0);
        assert_eq!(p.total_goo(), 100);
    }

    #[test]
    fn test_absorb_hit_wraps_from_active_type() {
        let mut p = player();
        p.active = SlimeType::Gold;
        p.goo = [10, 10, 3];
        let residual = p.absorb_hit(8);
        // Gold drained first, then wraps to Green.
        assert_eq!(p.goo, [5, 10, 0]);
        assert_eq!(residual, 5);
    }

    #[test]
    fn test_absorb_hit_unpaid_remainder() {
        let mut p = player();
        p.goo = [1, 1, 1];
        let residual = p.absorb_hit(10);
        assert_eq!(p.goo, [0, 0, 0]);
        assert_eq!(residual, 7);
    }

    // ==================== HIT TESTS ====================

    #[test]
    fn test_hit_grants_invincibility() {
        let mut p = player();
        assert!(matches!(p.on_hit(4, Vec2::ZERO), HitOutcome::Damaged { .. }));
        assert_eq!(p.on_hit(4, Vec2::ZERO), HitOutcome::Ignored);
        assert_eq!(p.total_goo(), 95);

        p.tick(0.3);
        assert!(p.on_hit(4, Vec2::ZERO).landed());
        assert_eq!(p.total_goo(), 91);
    }

    #[test]
    fn test_hit_shake_uses_integer_half() {
        let mut p = player();
        assert_eq!(p.on_hit(5, Vec2::ZERO), HitOutcome::Damaged { shake: 2.0 });
    }

    #[test]
    fn test_lethal_hit_destroys() {
        let mut p = player();
        p.goo = [1, 0, 0];
        assert!(matches!(p.on_hit(4, Vec2::ZERO), HitOutcome::Destroyed { .. }));
        assert!(p.dead);
        p.invincible = 0.0;
        assert_eq!(p.on_hit(4, Vec2::ZERO), HitOutcome::Ignored);
    }

    // ==================== SHOOTING TESTS ====================

    #[test]
    fn test_fire_respects_rate() {
        let mut p = player();
        assert_eq!(p.fire(0.0, Vec2::X, Vec2::ZERO), FireResult::Cooldown);
        assert!(matches!(p.fire(0.25, Vec2::X, Vec2::ZERO), FireResult::Fired { .. }));
        assert_eq!(p.fire(0.3, Vec2::X, Vec2::ZERO), FireResult::Cooldown);
        assert_eq!(p.goo(SlimeType::Green), 31);
    }

    #[test]
    fn test_fire_empty_reserve() {
        let mut p = player();
        p.goo = [0, 10, 10];
        assert_eq!(p.fire(1.0, Vec2::X, Vec2::ZERO), FireResult::Empty);
        assert_eq!(p.total_goo(), 20);
    }

    #[test]
    fn test_last_shot_kills() {
        let mut p = player();
        p.goo = [1, 0, 0];
        assert!(matches!(p.fire(1.0, Vec2::X, Vec2::ZERO), FireResult::Fired { .. }));
        assert_eq!(p.goo(SlimeType::Green), 0);
        assert!(p.dead);
    }

    #[test]
    fn test_shot_inherits_velocity_same_direction() {
        let p = player();
        let v = p.shot_velocity(Vec2::new(2.0, 0.0), Vec2::new(3.0, 1.0));
        assert!(approx_eq(v.x, 18.0));
        assert!(approx_eq(v.y, 1.0));

        let v = p.shot_velocity(Vec2::new(-1.0, 0.0), Vec2::new(3.0, 1.0));
        assert!(approx_eq(v.x, -15.0));
        assert!(approx_eq(v.y, 0.0));
    }

    #[test]
    fn test_cycle_slime() {
        let mut p = player();
        p.cycle_slime(-1);
        assert_eq!(p.active, SlimeType::Gold);
        p.cycle_slime(1);
        assert_eq!(p.active, SlimeType::Green);
    }
}
