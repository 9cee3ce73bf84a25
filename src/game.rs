//! Prefabs, observer registration and the update schedule.
//!
//! Everything the host needs to run a match lives here: bundle builders for
//! each entity type, [`register_observers`] for the event handlers,
//! [`build_update_schedule`] for the per-tick system order, and
//! [`setup_world`] which puts a level and its resources into a [`World`].
//!
//! # Tick Order
//!
//! The update schedule is fully chained:
//!
//! 1. `sync_collision_world` snapshots dynamic colliders
//! 2. `player_controller`, `enemy_controller` set intent velocities
//! 3. `refresh_ray_spacing` follows boxes resized since the last move
//! 4. `platformer_movement` integrates and moves every body
//! 5. `exploding_enemy_patience` measures this tick's motion
//! 6. `projectile_system` flies slimeballs and reports impacts
//! 7. `explosion_system`, `enemy_contact`, `pickup_collection` resolve
//!    overlaps against the snapshot
//! 8. `ready_region_system`, `wave_spawner_system` drive the waves
//! 9. `camera_shake_decay`, `ttl_system` age transient state

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{info, warn};

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::collisionlayer::{CollisionLayer, LayerMask};
use crate::components::enemy::{Enemy, EnemyKind};
use crate::components::explosion::Explosion;
use crate::components::hittable::Team;
use crate::components::inputcontrolled::PlayerInput;
use crate::components::mapposition::MapPosition;
use crate::components::pickup::SlimePickup;
use crate::components::platformer::Platformer;
use crate::components::player::{Player, jump_physics};
use crate::components::projectile::Projectile;
use crate::components::readyregion::ReadyRegion;
use crate::components::rigidbody::RigidBody;
use crate::components::slime::SlimeType;
use crate::components::slimeblock::{SLIME_BLOCK_SIZE, SlimeBlock};
use crate::components::ttl::Ttl;
use crate::resources::camerashake::CameraShake;
use crate::resources::collisionworld::CollisionWorld;
use crate::resources::gameconfig::GameConfig;
use crate::resources::levellayout::LevelLayout;
use crate::resources::wavespawner::{SpawnType, WaveSpawner};
use crate::resources::worldtime::WorldTime;
use crate::systems::camerashake::camera_shake_decay;
use crate::systems::collisionworld::sync_collision_world;
use crate::systems::combat::{hit_observer, killed_observer};
use crate::systems::enemy::{enemy_contact, enemy_controller, exploding_enemy_patience};
use crate::systems::explosion::explosion_system;
use crate::systems::movement::{platformer_movement, refresh_ray_spacing};
use crate::systems::pickup::pickup_collection;
use crate::systems::playercontroller::player_controller;
use crate::systems::projectile::{projectile_impact_observer, projectile_system};
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;
use crate::systems::wave::{ready_region_system, wave_spawner_system};

/// A raycast mover configured from `[physics]`, with ray spacing computed
/// for the initial box.
fn mover(config: &GameConfig, mask: LayerMask, collider: &BoxCollider, position: Vec2) -> Platformer {
    let mut mover = Platformer::new(mask)
        .with_ray_counts(
            config.physics.horizontal_ray_count,
            config.physics.vertical_ray_count,
        )
        .with_skin_width(config.physics.skin_width);
    mover.calculate_ray_spacing(&collider.aabb(position));
    mover
}

pub fn player_bundle(config: &GameConfig, position: Vec2) -> impl Bundle {
    let player = Player::from_config(&config.player);
    let size = player.scaled_size();
    let collider = BoxCollider::new(size.x, size.y);
    let (gravity, _) = jump_physics(config.player.jump_height, config.player.jump_time);
    (
        mover(config, LayerMask::MASK_PLAYER_SOLID, &collider, position),
        player,
        PlayerInput::default(),
        Team::Player,
        MapPosition::from_vec(position),
        collider,
        RigidBody::with_physics(gravity, config.player.friction),
        CollisionLayer::new(LayerMask::PLAYER),
    )
}

/// Goo an enemy kind leaves behind when killed.
pub fn enemy_drop(kind: EnemyKind) -> SlimeType {
    match kind {
        EnemyKind::Normal => SlimeType::Purple,
        EnemyKind::Exploding => SlimeType::Gold,
    }
}

pub fn enemy_bundle(
    config: &GameConfig,
    kind: EnemyKind,
    position: Vec2,
    target: Option<Entity>,
) -> impl Bundle {
    let mut enemy = Enemy::from_config(&config.enemy)
        .with_target(target)
        .with_drop(enemy_drop(kind));
    if kind == EnemyKind::Exploding {
        enemy = enemy.exploding(config.exploding_enemy.patience, position.x);
    }
    let collider = BoxCollider::new(config.enemy.size.x, config.enemy.size.y);
    (
        mover(config, LayerMask::MASK_ENEMY_SOLID, &collider, position),
        enemy,
        Team::Enemy,
        MapPosition::from_vec(position),
        collider,
        RigidBody::with_physics(config.enemy.gravity, config.enemy.friction),
        CollisionLayer::new(LayerMask::ENEMY),
    )
}

pub fn projectile_bundle(
    config: &GameConfig,
    position: Vec2,
    velocity: Vec2,
    slime: SlimeType,
) -> impl Bundle {
    (
        Projectile::new(velocity, config.projectile.gravity, slime).with_radius(config.projectile.radius),
        MapPosition::from_vec(position),
        Ttl::new(config.projectile.lifetime),
    )
}

pub fn pickup_bundle(config: &GameConfig, position: Vec2, slime: SlimeType) -> impl Bundle {
    let collider = BoxCollider::new(config.pickup.size.x, config.pickup.size.y);
    (
        mover(config, LayerMask::MASK_PICKUP_SOLID, &collider, position),
        SlimePickup::new(slime, config.pickup.amount),
        MapPosition::from_vec(position),
        collider,
        RigidBody::with_physics(config.pickup.gravity, config.pickup.friction),
        CollisionLayer::new(LayerMask::PICKUP).trigger(),
    )
}

pub fn slime_block_bundle(position: Vec2) -> impl Bundle {
    (
        SlimeBlock::default(),
        Team::Neutral,
        MapPosition::from_vec(position),
        BoxCollider::new(SLIME_BLOCK_SIZE, SLIME_BLOCK_SIZE),
        CollisionLayer::new(LayerMask::BLOCK),
    )
}

pub fn explosion_bundle(config: &GameConfig, position: Vec2) -> impl Bundle {
    (
        Explosion::from_config(&config.explosion),
        MapPosition::from_vec(position),
        Ttl::new(config.explosion.lifetime),
    )
}

pub fn ready_region_bundle(bounds: Aabb) -> impl Bundle {
    let size = bounds.size();
    (
        ReadyRegion::default(),
        MapPosition::from_vec(bounds.center()),
        BoxCollider::new(size.x, size.y),
        CollisionLayer::new(LayerMask::REGION).trigger(),
    )
}

/// Spawn table built from the `[enemy]` and `[exploding_enemy]` sections.
pub fn spawn_table(config: &GameConfig) -> Vec<SpawnType> {
    vec![
        SpawnType {
            kind: EnemyKind::Normal,
            rarity: config.enemy.rarity,
            min_wave: config.enemy.min_wave,
        },
        SpawnType {
            kind: EnemyKind::Exploding,
            rarity: config.exploding_enemy.rarity,
            min_wave: config.exploding_enemy.min_wave,
        },
    ]
}

/// Register every event observer. Must run before the first tick.
pub fn register_observers(world: &mut World) {
    world.spawn(Observer::new(hit_observer::<Player>));
    world.spawn(Observer::new(hit_observer::<Enemy>));
    world.spawn(Observer::new(hit_observer::<SlimeBlock>));
    world.spawn(Observer::new(killed_observer));
    world.spawn(Observer::new(projectile_impact_observer));
    world.flush();
}

pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            sync_collision_world,
            player_controller,
            enemy_controller,
            refresh_ray_spacing,
            platformer_movement,
            exploding_enemy_patience,
            projectile_system,
            explosion_system,
            enemy_contact,
            pickup_collection,
            ready_region_system,
            wave_spawner_system,
            camera_shake_decay,
            ttl_system,
        )
            .chain(),
    );
    update
}

/// Advance the world by one tick of `dt` unscaled seconds.
pub fn step(world: &mut World, update: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    update.run(world);
    world.clear_trackers();
}

/// Insert the level and every resource a match needs, spawn the player and
/// the ready region, and register observers. Returns the player entity.
pub fn setup_world(
    world: &mut World,
    config: GameConfig,
    layout: &LevelLayout,
    seed: Option<u64>,
) -> Entity {
    let start = layout.player_start().unwrap_or_else(|| {
        warn!("Level has no player start, using the origin");
        Vec2::ZERO
    });
    let spawn_points = layout.spawn_points();
    if spawn_points.is_empty() {
        warn!("Level has no enemy spawn points");
    }

    let mut shake = CameraShake::new(config.waves.camera_shake_decay);
    let mut spawner = WaveSpawner::new(spawn_table(&config), spawn_points, config.waves.spawn_delay);
    if let Some(seed) = seed {
        shake = shake.with_seed(seed);
        spawner = spawner.with_seed(seed);
    }

    world.insert_resource(WorldTime::default().with_time_scale(config.physics.time_scale));
    world.insert_resource(CollisionWorld::with_statics(layout.colliders()));
    world.insert_resource(shake);
    world.insert_resource(spawner);

    let player = world.spawn(player_bundle(&config, start)).id();
    match layout.ready_region() {
        Some(bounds) => {
            world.spawn(ready_region_bundle(bounds));
        }
        None => warn!("Level has no ready region; waves will never start"),
    }
    world.insert_resource(config);

    register_observers(world);
    info!("World ready, player {:?} at {:?}", player, start);
    player
}
