//! Slimewave library.
//!
//! This module exposes the game's ECS components, resources, systems, and
//! events for use by the headless host and in integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
