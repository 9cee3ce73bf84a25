//! Game configuration resource.
//!
//! Manages tuning values loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//! Every value is optional in the file; missing keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! skin_width = 0.015
//! horizontal_ray_count = 4
//! vertical_ray_count = 4
//! time_scale = 1.0
//!
//! [player]
//! move_speed = 8
//! acceleration = 60
//! friction = 30
//! jump_height = 4
//! jump_time = 0.4
//! fall_gravity_multiplier = 1.5
//! max_goo = 100
//! rate_of_fire = 4
//! shot_launch_speed = 15
//!
//! [projectile]
//! gravity = 20
//! radius = 0.5
//! lifetime = 15
//!
//! [pickup]
//! amount = 5
//!
//! [enemy]
//! move_speed = 4
//! health = 3
//! damage = 4
//!
//! [exploding_enemy]
//! patience = 3
//! rarity = 0.3
//! min_wave = 2
//!
//! [explosion]
//! radius = 3
//! damage = 4
//!
//! [waves]
//! spawn_delay = 1.5
//! camera_shake_decay = 10
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec2;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::raycastorigins::MIN_RAY_COUNT;

/// Default safe values for startup
const DEFAULT_SKIN_WIDTH: f32 = 0.015;
const DEFAULT_RAY_COUNT: u32 = 4;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Raycast mover tuning shared by every platformer.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub skin_width: f32,
    pub horizontal_ray_count: u32,
    pub vertical_ray_count: u32,
    pub time_scale: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            skin_width: DEFAULT_SKIN_WIDTH,
            horizontal_ray_count: DEFAULT_RAY_COUNT,
            vertical_ray_count: DEFAULT_RAY_COUNT,
            time_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub move_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub jump_height: f32,
    pub jump_time: f32,
    pub fall_gravity_multiplier: f32,
    pub max_goo: i32,
    /// Shots per second.
    pub rate_of_fire: f32,
    pub shot_launch_speed: f32,
    /// Collider size at full goo.
    pub size: Vec2,
    pub invincibility_time: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            acceleration: 60.0,
            friction: 30.0,
            jump_height: 4.0,
            jump_time: 0.4,
            fall_gravity_multiplier: 1.5,
            max_goo: 100,
            rate_of_fire: 4.0,
            shot_launch_speed: 15.0,
            size: Vec2::new(1.0, 1.5),
            invincibility_time: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileConfig {
    pub gravity: f32,
    pub radius: f32,
    pub lifetime: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            gravity: 20.0,
            radius: 0.5,
            lifetime: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickupConfig {
    pub amount: i32,
    pub gravity: f32,
    pub friction: f32,
    pub size: Vec2,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            amount: 5,
            gravity: 20.0,
            friction: 10.0,
            size: Vec2::splat(0.5),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyConfig {
    pub move_speed: f32,
    /// Added to horizontal velocity every tick while pursuing.
    pub acceleration: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub friction: f32,
    pub health: i32,
    pub damage: i32,
    pub size: Vec2,
    pub rarity: f32,
    pub min_wave: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            acceleration: 0.5,
            jump_speed: 10.0,
            gravity: 25.0,
            friction: 5.0,
            health: 3,
            damage: 4,
            size: Vec2::splat(1.0),
            rarity: 1.0,
            min_wave: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplodingEnemyConfig {
    /// Seconds of standing still before detonating.
    pub patience: f32,
    pub rarity: f32,
    pub min_wave: i32,
}

impl Default for ExplodingEnemyConfig {
    fn default() -> Self {
        Self {
            patience: 3.0,
            rarity: 0.3,
            min_wave: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionConfig {
    pub radius: f32,
    pub damage: i32,
    pub knockback: f32,
    pub shake: f32,
    pub lifetime: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            damage: 4,
            knockback: 15.0,
            shake: 0.75,
            lifetime: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveConfig {
    pub spawn_delay: f32,
    pub camera_shake_decay: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            spawn_delay: 1.5,
            camera_shake_decay: 10.0,
        }
    }
}

/// Game configuration resource.
///
/// Stores physics tuning and the per-entity-type parameters used by the
/// prefab builders in [`game`](crate::game).
#[derive(Resource, Debug, Clone, Default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub pickup: PickupConfig,
    pub enemy: EnemyConfig,
    pub exploding_enemy: ExplodingEnemyConfig,
    pub explosion: ExplosionConfig,
    pub waves: WaveConfig,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

fn get_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        *target = value as f32;
    }
}

fn get_i32(config: &Ini, section: &str, key: &str, target: &mut i32) {
    if let Some(value) = config.getint(section, key).ok().flatten() {
        *target = value as i32;
    }
}

fn get_u32(config: &Ini, section: &str, key: &str, target: &mut u32) {
    if let Some(value) = config.getuint(section, key).ok().flatten() {
        *target = value as u32;
    }
}

fn clamp_min_f32(name: &str, value: &mut f32, min: f32, fallback: f32) {
    if !value.is_finite() || *value < min {
        warn!("Config {} = {} is invalid, using {}", name, value, fallback);
        *value = fallback;
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            ..Default::default()
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Loaded values
    /// are sanitized before returning.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [physics] section
        get_f32(&config, "physics", "skin_width", &mut self.physics.skin_width);
        get_u32(&config, "physics", "horizontal_ray_count", &mut self.physics.horizontal_ray_count);
        get_u32(&config, "physics", "vertical_ray_count", &mut self.physics.vertical_ray_count);
        get_f32(&config, "physics", "time_scale", &mut self.physics.time_scale);

        // [player] section
        let player = &mut self.player;
        get_f32(&config, "player", "move_speed", &mut player.move_speed);
        get_f32(&config, "player", "acceleration", &mut player.acceleration);
        get_f32(&config, "player", "friction", &mut player.friction);
        get_f32(&config, "player", "jump_height", &mut player.jump_height);
        get_f32(&config, "player", "jump_time", &mut player.jump_time);
        get_f32(&config, "player", "fall_gravity_multiplier", &mut player.fall_gravity_multiplier);
        get_i32(&config, "player", "max_goo", &mut player.max_goo);
        get_f32(&config, "player", "rate_of_fire", &mut player.rate_of_fire);
        get_f32(&config, "player", "shot_launch_speed", &mut player.shot_launch_speed);
        get_f32(&config, "player", "width", &mut player.size.x);
        get_f32(&config, "player", "height", &mut player.size.y);
        get_f32(&config, "player", "invincibility_time", &mut player.invincibility_time);

        // [projectile] section
        get_f32(&config, "projectile", "gravity", &mut self.projectile.gravity);
        get_f32(&config, "projectile", "radius", &mut self.projectile.radius);
        get_f32(&config, "projectile", "lifetime", &mut self.projectile.lifetime);

        // [pickup] section
        get_i32(&config, "pickup", "amount", &mut self.pickup.amount);
        get_f32(&config, "pickup", "gravity", &mut self.pickup.gravity);
        get_f32(&config, "pickup", "friction", &mut self.pickup.friction);

        // [enemy] section
        let enemy = &mut self.enemy;
        get_f32(&config, "enemy", "move_speed", &mut enemy.move_speed);
        get_f32(&config, "enemy", "acceleration", &mut enemy.acceleration);
        get_f32(&config, "enemy", "jump_speed", &mut enemy.jump_speed);
        get_f32(&config, "enemy", "gravity", &mut enemy.gravity);
        get_f32(&config, "enemy", "friction", &mut enemy.friction);
        get_i32(&config, "enemy", "health", &mut enemy.health);
        get_i32(&config, "enemy", "damage", &mut enemy.damage);
        get_f32(&config, "enemy", "width", &mut enemy.size.x);
        get_f32(&config, "enemy", "height", &mut enemy.size.y);
        get_f32(&config, "enemy", "rarity", &mut enemy.rarity);
        get_i32(&config, "enemy", "min_wave", &mut enemy.min_wave);

        // [exploding_enemy] section
        get_f32(&config, "exploding_enemy", "patience", &mut self.exploding_enemy.patience);
        get_f32(&config, "exploding_enemy", "rarity", &mut self.exploding_enemy.rarity);
        get_i32(&config, "exploding_enemy", "min_wave", &mut self.exploding_enemy.min_wave);

        // [explosion] section
        get_f32(&config, "explosion", "radius", &mut self.explosion.radius);
        get_i32(&config, "explosion", "damage", &mut self.explosion.damage);
        get_f32(&config, "explosion", "knockback", &mut self.explosion.knockback);
        get_f32(&config, "explosion", "shake", &mut self.explosion.shake);
        get_f32(&config, "explosion", "lifetime", &mut self.explosion.lifetime);

        // [waves] section
        get_f32(&config, "waves", "spawn_delay", &mut self.waves.spawn_delay);
        get_f32(&config, "waves", "camera_shake_decay", &mut self.waves.camera_shake_decay);

        self.sanitize();

        info!(
            "Loaded config: skin={}, rays={}x{}, player speed={}, jump={}/{}s, max_goo={}",
            self.physics.skin_width,
            self.physics.horizontal_ray_count,
            self.physics.vertical_ray_count,
            self.player.move_speed,
            self.player.jump_height,
            self.player.jump_time,
            self.player.max_goo
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        // [physics] section
        set("physics", "skin_width", self.physics.skin_width.to_string());
        set("physics", "horizontal_ray_count", self.physics.horizontal_ray_count.to_string());
        set("physics", "vertical_ray_count", self.physics.vertical_ray_count.to_string());
        set("physics", "time_scale", self.physics.time_scale.to_string());

        // [player] section
        let player = &self.player;
        set("player", "move_speed", player.move_speed.to_string());
        set("player", "acceleration", player.acceleration.to_string());
        set("player", "friction", player.friction.to_string());
        set("player", "jump_height", player.jump_height.to_string());
        set("player", "jump_time", player.jump_time.to_string());
        set("player", "fall_gravity_multiplier", player.fall_gravity_multiplier.to_string());
        set("player", "max_goo", player.max_goo.to_string());
        set("player", "rate_of_fire", player.rate_of_fire.to_string());
        set("player", "shot_launch_speed", player.shot_launch_speed.to_string());
        set("player", "width", player.size.x.to_string());
        set("player", "height", player.size.y.to_string());
        set("player", "invincibility_time", player.invincibility_time.to_string());

        // [projectile] section
        set("projectile", "gravity", self.projectile.gravity.to_string());
        set("projectile", "radius", self.projectile.radius.to_string());
        set("projectile", "lifetime", self.projectile.lifetime.to_string());

        // [pickup] section
        set("pickup", "amount", self.pickup.amount.to_string());
        set("pickup", "gravity", self.pickup.gravity.to_string());
        set("pickup", "friction", self.pickup.friction.to_string());

        // [enemy] section
        let enemy = &self.enemy;
        set("enemy", "move_speed", enemy.move_speed.to_string());
        set("enemy", "acceleration", enemy.acceleration.to_string());
        set("enemy", "jump_speed", enemy.jump_speed.to_string());
        set("enemy", "gravity", enemy.gravity.to_string());
        set("enemy", "friction", enemy.friction.to_string());
        set("enemy", "health", enemy.health.to_string());
        set("enemy", "damage", enemy.damage.to_string());
        set("enemy", "width", enemy.size.x.to_string());
        set("enemy", "height", enemy.size.y.to_string());
        set("enemy", "rarity", enemy.rarity.to_string());
        set("enemy", "min_wave", enemy.min_wave.to_string());

        // [exploding_enemy] section
        set("exploding_enemy", "patience", self.exploding_enemy.patience.to_string());
        set("exploding_enemy", "rarity", self.exploding_enemy.rarity.to_string());
        set("exploding_enemy", "min_wave", self.exploding_enemy.min_wave.to_string());

        // [explosion] section
        set("explosion", "radius", self.explosion.radius.to_string());
        set("explosion", "damage", self.explosion.damage.to_string());
        set("explosion", "knockback", self.explosion.knockback.to_string());
        set("explosion", "shake", self.explosion.shake.to_string());
        set("explosion", "lifetime", self.explosion.lifetime.to_string());

        // [waves] section
        set("waves", "spawn_delay", self.waves.spawn_delay.to_string());
        set("waves", "camera_shake_decay", self.waves.camera_shake_decay.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Clamp values that would break the simulation back into range.
    pub fn sanitize(&mut self) {
        let defaults = GameConfig::default();

        if !(self.physics.skin_width.is_finite() && self.physics.skin_width > 0.0) {
            warn!(
                "Config physics.skin_width = {} is invalid, using {}",
                self.physics.skin_width, DEFAULT_SKIN_WIDTH
            );
            self.physics.skin_width = DEFAULT_SKIN_WIDTH;
        }
        for (name, count) in [
            ("physics.horizontal_ray_count", &mut self.physics.horizontal_ray_count),
            ("physics.vertical_ray_count", &mut self.physics.vertical_ray_count),
        ] {
            if *count < MIN_RAY_COUNT {
                warn!("Config {} = {} is below {}, clamping", name, count, MIN_RAY_COUNT);
                *count = MIN_RAY_COUNT;
            }
        }
        clamp_min_f32("physics.time_scale", &mut self.physics.time_scale, 0.0, 1.0);

        let player = &mut self.player;
        clamp_min_f32("player.jump_time", &mut player.jump_time, f32::EPSILON, defaults.player.jump_time);
        clamp_min_f32("player.jump_height", &mut player.jump_height, 0.0, defaults.player.jump_height);
        clamp_min_f32("player.rate_of_fire", &mut player.rate_of_fire, f32::EPSILON, defaults.player.rate_of_fire);
        clamp_min_f32("player.move_speed", &mut player.move_speed, 0.0, defaults.player.move_speed);
        clamp_min_f32("player.friction", &mut player.friction, 0.0, defaults.player.friction);
        if player.max_goo < 3 {
            warn!("Config player.max_goo = {} is too small, using {}", player.max_goo, defaults.player.max_goo);
            player.max_goo = defaults.player.max_goo;
        }

        clamp_min_f32("projectile.radius", &mut self.projectile.radius, f32::EPSILON, defaults.projectile.radius);
        clamp_min_f32("projectile.lifetime", &mut self.projectile.lifetime, f32::EPSILON, defaults.projectile.lifetime);
        clamp_min_f32("enemy.move_speed", &mut self.enemy.move_speed, 0.0, defaults.enemy.move_speed);
        clamp_min_f32("enemy.friction", &mut self.enemy.friction, 0.0, defaults.enemy.friction);
        clamp_min_f32("explosion.radius", &mut self.explosion.radius, 0.0, defaults.explosion.radius);
        clamp_min_f32("waves.spawn_delay", &mut self.waves.spawn_delay, 0.0, defaults.waves.spawn_delay);
        clamp_min_f32(
            "waves.camera_shake_decay",
            &mut self.waves.camera_shake_decay,
            0.0,
            defaults.waves.camera_shake_decay,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_mover_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.physics.skin_width, 0.015);
        assert_eq!(config.physics.horizontal_ray_count, 4);
        assert_eq!(config.physics.vertical_ray_count, 4);
        assert_eq!(config.projectile.lifetime, 15.0);
        assert_eq!(config.projectile.radius, 0.5);
    }

    #[test]
    fn test_sanitize_clamps_invalid_values() {
        let mut config = GameConfig::new();
        config.physics.skin_width = -1.0;
        config.physics.horizontal_ray_count = 0;
        config.physics.vertical_ray_count = 1;
        config.player.jump_time = 0.0;
        config.sanitize();
        assert_eq!(config.physics.skin_width, 0.015);
        assert_eq!(config.physics.horizontal_ray_count, 2);
        assert_eq!(config.physics.vertical_ray_count, 2);
        assert_eq!(config.player.jump_time, PlayerConfig::default().jump_time);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[player]\nmove_speed = 12\n\n[physics]\nvertical_ray_count = 1").unwrap();

        let mut config = GameConfig::with_path(file.path());
        config.load_from_file().unwrap();

        assert_eq!(config.player.move_speed, 12.0);
        assert_eq!(config.player.jump_height, PlayerConfig::default().jump_height);
        assert_eq!(config.physics.vertical_ray_count, 2);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let mut config = GameConfig::with_path("/nonexistent/slimewave/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut saved = GameConfig::with_path(&path);
        saved.enemy.health = 7;
        saved.waves.spawn_delay = 0.5;
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.enemy.health, 7);
        assert_eq!(loaded.waves.spawn_delay, 0.5);
    }
}
