//! Wave progression events.
use bevy_ecs::prelude::*;

/// The player entered the ready region and a new wave began.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveStartedEvent {
    pub wave: i32,
    pub enemies: i32,
}

/// Every enemy of the current wave was killed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveClearedEvent {
    pub wave: i32,
}

/// The player ran out of goo.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDefeatedEvent {
    /// Waves completed before dying.
    pub waves_survived: i32,
}
