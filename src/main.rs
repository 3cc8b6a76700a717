//! Striker Sim entry point
//!
//! Runs striker scenarios headlessly: a head-on bump between two coasting
//! strikers, then a seeded scramble of strikers chasing random targets.
//! Collision events are logged and the final state is printed as JSON.
//!
//! Usage: `striker-sim [settings.json]`

use std::path::Path;
use std::process::ExitCode;

use glam::Vec2;

use striker_sim::Settings;
use striker_sim::consts::SIM_DT;
use striker_sim::sim::{SimState, move_with_collision};

/// Seconds each scenario runs for
const SCENARIO_SECONDS: f32 = 4.0;
const SCRAMBLE_SEED: u64 = 0x5EED;
const SCRAMBLE_STRIKERS: usize = 2;

fn run(state: &mut SimState, name: &str) {
    let ticks = (SCENARIO_SECONDS / SIM_DT).round() as u32;
    let mut collisions = 0;
    for _ in 0..ticks {
        move_with_collision(state, SIM_DT);
        for event in state.drain_events() {
            collisions += 1;
            log::info!(
                "[{}] tick {}: {} hit {} (|impulse| {:.2})",
                name,
                state.time_ticks,
                event.remote0,
                event.remote1,
                event.impulse0.length()
            );
        }
    }
    log::info!("[{}] {} ticks, {} collision events", name, ticks, collisions);
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    // Two coasting strikers on a collision course; quiet long enough that
    // the bump produces an event
    let mut head_on = SimState::new(settings.clone());
    let a = head_on.spawn_remote(Vec2::new(-3.0, 0.0), 0.0);
    let b = head_on.spawn_remote(Vec2::new(3.0, 0.1), std::f32::consts::PI);
    for (id, velocity) in [(a, Vec2::new(2.0, 0.0)), (b, Vec2::new(-2.0, 0.0))] {
        if let Some(remote) = head_on.remote_mut(id) {
            remote.velocity = velocity;
        }
    }
    run(&mut head_on, "head-on");

    let mut scramble = SimState::new(settings);
    scramble.scatter(SCRAMBLE_SEED, SCRAMBLE_STRIKERS);
    run(&mut scramble, "scramble");

    match serde_json::to_string_pretty(&[&head_on, &scramble]) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed to serialize final state: {}", err);
            ExitCode::FAILURE
        }
    }
}
