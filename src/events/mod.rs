//! Event types exchanged across systems.
//!
//! Events provide a decoupled way for systems to communicate: movement
//! reports landings, combat reports hits and deaths, and the wave spawner
//! reports progression. Observers registered in [`crate::game`] react to
//! them.
//!
//! Submodules:
//! - [`combat`] – hit requests and death notifications
//! - [`grounded`] – one-shot landing notification from the raycast mover
//! - [`projectile`] – slimeball impacts
//! - [`wave`] – wave start/clear and player defeat
pub mod combat;
pub mod grounded;
pub mod projectile;
pub mod wave;
