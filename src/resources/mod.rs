//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `camerashake` – accumulated screen shake and its decay
//! - `collisionworld` – per-tick collider snapshot and geometry queries
//! - `gameconfig` – tunables loaded from an INI file
//! - `levellayout` – JSON tile grid describing a level
//! - `wavespawner` – wave progression and enemy selection
//! - `worldtime` – simulation time and delta
pub mod camerashake;
pub mod collisionworld;
pub mod gameconfig;
pub mod levellayout;
pub mod wavespawner;
pub mod worldtime;
