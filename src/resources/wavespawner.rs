//! Wave progression and enemy selection.
//!
//! The [`WaveSpawner`] resource tracks the current wave, how many enemies are
//! still alive in it, and how many are left to spawn. A wave starts when the
//! player enters the ready region and ends when every enemy of the wave has
//! been killed. Enemies spawn one at a time, `spawn_delay` seconds apart, at
//! a random spawn point.
//!
//! # Enemy selection
//!
//! Each spawn rolls `chance` in `[0, 1)`. Among the spawnables unlocked for
//! the current wave (`min_wave <= wave`) whose `rarity >= chance`, the one
//! with the **lowest** rarity is chosen; ties keep the first listed.
//!
//! A spawn that cannot happen (no spawn points, no candidate for the roll)
//! is written off against the wave so it can still be cleared.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::{info, warn};

use crate::components::enemy::EnemyKind;

/// Something the spawner can produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnType {
    pub kind: EnemyKind,
    /// In `[0, 1]`; lower is rarer.
    pub rarity: f32,
    /// Earliest wave this type appears in.
    pub min_wave: i32,
}

/// A spawn the host should perform now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOrder {
    pub kind: EnemyKind,
    pub position: Vec2,
}

/// What one advance of the spawn clock produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnTick {
    Spawn(SpawnOrder),
    /// A due spawn was written off and that ended the wave.
    Cleared(i32),
}

#[derive(Resource, Debug, Clone)]
pub struct WaveSpawner {
    wave: i32,
    active: bool,
    remaining: i32,
    to_spawn: i32,
    spawn_timer: f32,
    pub spawn_delay: f32,
    pub spawnables: Vec<SpawnType>,
    pub spawn_points: Vec<Vec2>,
    rng: fastrand::Rng,
}

impl Default for WaveSpawner {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), 1.5)
    }
}

impl WaveSpawner {
    pub fn new(spawnables: Vec<SpawnType>, spawn_points: Vec<Vec2>, spawn_delay: f32) -> Self {
        Self {
            wave: 0,
            active: false,
            remaining: 0,
            to_spawn: 0,
            spawn_timer: 0.0,
            spawn_delay,
            spawnables,
            spawn_points,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enemies of the current wave still alive or not yet spawned.
    pub fn enemies_remaining(&self) -> i32 {
        self.remaining
    }

    pub fn pending_spawns(&self) -> i32 {
        self.to_spawn
    }

    /// Completed waves: during a wave the wave in progress does not count.
    pub fn wave_number(&self) -> i32 {
        if self.active { self.wave - 1 } else { self.wave }
    }

    /// Begin the next wave. Returns `(wave, enemy_count)`, or `None` when a
    /// wave is already running.
    pub fn start_next_wave(&mut self) -> Option<(i32, i32)> {
        if self.active {
            return None;
        }
        self.wave += 1;
        self.remaining = self.wave * 2 + 3;
        self.to_spawn = self.remaining;
        self.spawn_timer = 0.0;
        self.active = true;
        info!("Wave {} started: {} enemies", self.wave, self.remaining);
        Some((self.wave, self.remaining))
    }

    /// Count a kill. Returns the cleared wave number when this kill ended it.
    pub fn on_enemy_killed(&mut self) -> Option<i32> {
        if !self.active {
            return None;
        }
        self.remaining -= 1;
        if self.remaining <= 0 {
            self.active = false;
            self.to_spawn = 0;
            info!("Wave {} cleared", self.wave);
            Some(self.wave)
        } else {
            None
        }
    }

    /// Pick the spawn type for a roll of `chance`.
    pub fn select_spawn(&self, chance: f32) -> Option<&SpawnType> {
        let mut selected: Option<&SpawnType> = None;
        for spawn in &self.spawnables {
            if spawn.min_wave <= self.wave
                && spawn.rarity >= chance
                && selected.is_none_or(|s| s.rarity > spawn.rarity)
            {
                selected = Some(spawn);
            }
        }
        selected
    }

    /// Advance the spawn clock. Returns an order when an enemy is due, or
    /// the cleared wave when a due spawn had to be skipped and nothing of
    /// the wave is left.
    pub fn tick(&mut self, dt: f32) -> Option<SpawnTick> {
        if self.to_spawn <= 0 {
            return None;
        }
        self.spawn_timer -= dt;
        if self.spawn_timer > 0.0 {
            return None;
        }
        self.spawn_timer += self.spawn_delay;
        self.to_spawn -= 1;

        if self.spawn_points.is_empty() {
            warn!("Wave {} has no spawn points", self.wave);
            return self.skip_spawn();
        }
        let chance = self.rng.f32();
        let point = self.spawn_points[self.rng.usize(..self.spawn_points.len())];
        let Some(spawn) = self.select_spawn(chance) else {
            warn!("No spawnable for wave {} at roll {:.3}", self.wave, chance);
            return self.skip_spawn();
        };
        Some(SpawnTick::Spawn(SpawnOrder {
            kind: spawn.kind,
            position: point,
        }))
    }

    fn skip_spawn(&mut self) -> Option<SpawnTick> {
        self.on_enemy_killed().map(SpawnTick::Cleared)
    }
}
