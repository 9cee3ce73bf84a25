//! Game systems and observers.
//!
//! This module groups all ECS systems that advance the simulation each
//! tick, plus the observers reacting to combat and projectile events.
//!
//! Submodules overview
//! - [`camerashake`] – decay accumulated shake
//! - [`collisionworld`] – snapshot dynamic colliders for the tick
//! - [`combat`] – hit and death observers
//! - [`enemy`] – pursuit, patience fuses and contact damage
//! - [`explosion`] – area damage from explosions
//! - [`movement`] – integrate bodies and move them with the raycast mover
//! - [`pickup`] – hand goo pickups to the player
//! - [`playercontroller`] – turn player intent into motion and shots
//! - [`projectile`] – fly slimeballs and apply impact effects
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn entities whose time ran out
//! - [`wave`] – ready region and wave spawning

pub mod camerashake;
pub mod collisionworld;
pub mod combat;
pub mod enemy;
pub mod explosion;
pub mod movement;
pub mod pickup;
pub mod playercontroller;
pub mod projectile;
pub mod time;
pub mod ttl;
pub mod wave;
