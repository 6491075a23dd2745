//! Castle walk demo
//!
//! Builds the courtyard, scatters a few pickups and drives the player through
//! a scripted tour without a window. Frames go to a recording backend and a
//! summary is logged once per simulated second.
//!
//! Usage: `castle_walk [config.toml|config.ron] [seed]`

use castle_engine::config::ConfigError;
use castle_engine::foundation::logging;
use castle_engine::prelude::*;
use castle_engine::scene::add_pickup;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

const FRAME_DT: f32 = 1.0 / 60.0;
const PICKUP_COUNT: usize = 8;
const DEFAULT_SEED: u64 = 7;

#[derive(Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Invalid seed '{0}'")]
    InvalidSeed(String),
}

/// One leg of the scripted tour
struct Leg {
    name: &'static str,
    seconds: f32,
    input: FrameInput,
    camera: CameraMode,
}

fn tour() -> Vec<Leg> {
    vec![
        Leg { name: "walk to the gate", seconds: 3.0, input: FrameInput::idle().with_move(0.0, -1.0), camera: CameraMode::Orbit },
        Leg { name: "turn along the wall", seconds: 1.5, input: FrameInput::idle().with_move(1.0, -1.0), camera: CameraMode::Orbit },
        Leg { name: "hop", seconds: 1.0, input: FrameInput::idle().with_move(0.0, -0.5).with_jump(), camera: CameraMode::Orbit },
        Leg { name: "look around", seconds: 2.0, input: FrameInput::idle().with_look(1.0, -0.1), camera: CameraMode::Orbit },
        Leg { name: "back up", seconds: 1.5, input: FrameInput::idle().with_move(0.0, 1.0), camera: CameraMode::Orbit },
        Leg { name: "fly over the keep", seconds: 2.0, input: FrameInput::idle().with_move(0.2, -1.0).with_look(0.3, 0.0), camera: CameraMode::Free },
        Leg { name: "settle", seconds: 1.0, input: FrameInput::idle(), camera: CameraMode::Orbit },
    ]
}

/// Scatter decorative pickups around the courtyard ring between keep and walls
fn scatter_pickups(scene: &mut Scene, layout: &CastleLayout, rng: &mut StdRng) {
    let inner = layout.keep_base_size * 0.75;
    let outer = layout.width / 2.0 - layout.wall_thickness * 3.0;
    for _ in 0..PICKUP_COUNT {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = rng.gen_range(inner..outer);
        let position = Vec3::new(angle.cos() * distance, 1.0, angle.sin() * distance);
        add_pickup(scene, position, 0.4);
    }
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimulationConfig::load_from_file(&path)?,
        None => SimulationConfig::default(),
    };
    let seed = match args.next() {
        Some(text) => text.parse().map_err(|_| AppError::InvalidSeed(text))?,
        None => DEFAULT_SEED,
    };

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting castle walk (seed {seed})");

    let layout = CastleLayout::default();
    let mut scene = Scene::new();
    CastleBuilder::new(layout.clone()).build(&mut scene);
    let mut rng = StdRng::seed_from_u64(seed);
    scatter_pickups(&mut scene, &layout, &mut rng);

    let mut simulation = Simulation::new(config, scene)?;
    let mut backend = RecordingBackend::new(1280, 720, 4);
    let mut stopwatch = Stopwatch::new();
    let mut next_report = 1.0;

    for leg in tour() {
        log::info!("Leg: {} ({:.1}s, {:?} camera)", leg.name, leg.seconds, leg.camera);
        simulation.set_camera_mode(leg.camera);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let frames = (leg.seconds / FRAME_DT).round() as u32;
        for _ in 0..frames {
            let frame = stopwatch.time(|| simulation.render(FRAME_DT, &leg.input, &mut backend))?;

            if simulation.timer().total_time() >= next_report {
                next_report += 1.0;
                let player = simulation.player();
                let stats = simulation.visibility_stats();
                log::info!(
                    "t={:.1}s pos=({:.2}, {:.2}, {:.2}) facing={:.0}° {:?} drawn={}/{} occluded={}",
                    simulation.timer().total_time(),
                    player.position.x,
                    player.position.y,
                    player.position.z,
                    player.facing_degrees(),
                    player.state,
                    frame.draw_items.len(),
                    stats.tested,
                    simulation.orbit_camera().is_occluded()
                );
            }
        }
    }

    log::info!(
        "Castle walk finished: {} frames, {:.3} ms per frame",
        backend.submitted(),
        stopwatch.mean_lap_millis()
    );
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        log::error!("Castle walk failed: {error}");
        eprintln!("castle_walk: {error}");
        std::process::exit(1);
    }
}
