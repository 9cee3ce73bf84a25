use bevy_ecs::prelude::Component;

/// Trigger area that starts the next wave when the player walks in.
///
/// Only armed while no wave is running.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyRegion {
    pub armed: bool,
}

impl Default for ReadyRegion {
    fn default() -> Self {
        Self { armed: true }
    }
}
