//! Slimewave headless host.
//!
//! Runs the arena (or a level loaded from JSON) without a window. A scripted
//! pilot writes [`PlayerInput`] every tick: it walks into the ready region
//! to start a wave, then keeps its distance from the closest enemy while
//! shooting at it. Wave progress and the final result are logged.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --seconds 120 --seed 7
//! ```

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;
use log::{debug, info, warn};

use slimewave::components::enemy::Enemy;
use slimewave::components::inputcontrolled::PlayerInput;
use slimewave::components::mapposition::MapPosition;
use slimewave::components::player::Player;
use slimewave::components::readyregion::ReadyRegion;
use slimewave::events::grounded::GroundedEvent;
use slimewave::events::wave::PlayerDefeatedEvent;
use slimewave::game;
use slimewave::resources::gameconfig::GameConfig;
use slimewave::resources::levellayout::LevelLayout;
use slimewave::resources::wavespawner::WaveSpawner;
use slimewave::resources::worldtime::WorldTime;

const TICK_RATE: f32 = 60.0;

/// Distance the pilot tries to keep from the enemy it is shooting.
const PILOT_STANDOFF: f32 = 4.0;

/// Slimewave headless arena
#[derive(Parser)]
#[command(version, about = "Runs a slimewave match headless with a scripted player.")]
struct Cli {
    /// INI file with game tunables. Missing keys keep their defaults.
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: String,

    /// JSON level layout. The built-in arena is used when omitted.
    #[arg(long, value_name = "PATH")]
    level: Option<String>,

    /// Simulated seconds to run before stopping.
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Seed for spawn rolls and camera shake.
    #[arg(long)]
    seed: Option<u64>,
}

/// Scripted stand-in for a human player.
fn scripted_pilot(
    time: Res<WorldTime>,
    spawner: Res<WaveSpawner>,
    mut players: Query<(&mut PlayerInput, &MapPosition), With<Player>>,
    enemies: Query<&MapPosition, With<Enemy>>,
    regions: Query<&MapPosition, With<ReadyRegion>>,
) {
    for (mut input, position) in players.iter_mut() {
        *input = PlayerInput::default();
        let pos = position.pos;

        if !spawner.is_active() {
            if let Some(region) = regions.iter().next() {
                let dx = region.pos.x - pos.x;
                input.horizontal = if dx.abs() > 0.5 { dx.signum() } else { 0.0 };
            }
            continue;
        }

        let closest = enemies
            .iter()
            .map(|e| e.pos)
            .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)));
        let Some(enemy) = closest else {
            continue;
        };

        let offset = enemy - pos;
        input.aim = offset + Vec2::Y;
        input.fire = true;
        if offset.x.abs() < PILOT_STANDOFF {
            input.horizontal = -offset.x.signum();
        }
        input.jump_pressed = time.frame_count % 90 == 0;
        input.jump_held = input.jump_pressed;
        if time.frame_count % 300 == 0 {
            input.cycle = 1;
        }
    }
}

fn log_grounded(trigger: On<GroundedEvent>) {
    let grounded = trigger.event();
    debug!("{:?} landed at {:?}", grounded.entity, grounded.point);
}

fn log_defeat(trigger: On<PlayerDefeatedEvent>) {
    info!("Game over after {} waves", trigger.event().waves_survived);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("Using default configuration: {}", e);
    }

    let layout = match &cli.level {
        Some(path) => LevelLayout::load_from_file(path).unwrap_or_else(|e| {
            warn!("Failed to load level '{}': {}; using the arena", path, e);
            LevelLayout::arena()
        }),
        None => LevelLayout::arena(),
    };

    let mut world = World::new();
    let player = game::setup_world(&mut world, config, &layout, cli.seed);
    world.spawn(Observer::new(log_grounded));
    world.spawn(Observer::new(log_defeat));
    world.flush();

    let mut pilot = Schedule::default();
    pilot.add_systems(scripted_pilot);
    let mut update = game::build_update_schedule();

    let dt = 1.0 / TICK_RATE;
    let ticks = (cli.seconds.max(0.0) * TICK_RATE) as u64;
    info!("Running {} ticks ({} s)", ticks, cli.seconds);

    for _ in 0..ticks {
        pilot.run(&mut world);
        game::step(&mut world, &mut update, dt);

        if world.get::<Player>(player).is_none_or(|p| p.dead) {
            break;
        }
    }

    let time = world.resource::<WorldTime>();
    let waves = world.resource::<WaveSpawner>().wave_number();
    match world.get::<Player>(player) {
        Some(p) => info!(
            "Stopped at {:.1} s (tick {}): {} waves cleared, {} goo left",
            time.elapsed,
            time.frame_count,
            waves,
            p.total_goo()
        ),
        None => info!("Stopped at {:.1} s: player gone", time.elapsed),
    }
}
