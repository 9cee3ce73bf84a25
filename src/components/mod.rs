//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world, along with the small value types they are built from.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangular collider and its [`Aabb`](boxcollider::Aabb)
//! - [`collisionlayer`] – layer bits and the component exposing a box to queries
//! - [`collisionstate`] – which sides the last move was blocked on
//! - [`enemy`] – enemy stats, pursuit and the exploding variant
//! - [`explosion`] – one-shot area damage
//! - [`hittable`] – the damage protocol and team allegiance
//! - [`inputcontrolled`] – per-tick player intent written by the host
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`pickup`] – collectible goo
//! - [`platformer`] – the raycast kinematic mover
//! - [`player`] – goo reserves, shooting and hit absorption
//! - [`projectile`] – swept-circle slimeballs
//! - [`raycastorigins`] – ray fan corners and spacing
//! - [`readyregion`] – trigger area that starts the next wave
//! - [`rigidbody`] – velocity plus gravity and friction
//! - [`slime`] – the three goo types
//! - [`slimeblock`] – breakable blocks built by purple shots
//! - [`ttl`] – time-to-live for automatic despawning

pub mod boxcollider;
pub mod collisionlayer;
pub mod collisionstate;
pub mod enemy;
pub mod explosion;
pub mod hittable;
pub mod inputcontrolled;
pub mod mapposition;
pub mod pickup;
pub mod platformer;
pub mod player;
pub mod projectile;
pub mod raycastorigins;
pub mod readyregion;
pub mod rigidbody;
pub mod slime;
pub mod slimeblock;
pub mod ttl;
