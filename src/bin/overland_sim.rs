//! Overland Sim - Headless Locomotion Driver
//!
//! Run with: `cargo run --bin overland_sim -- [config.json]`
//! Set `RUST_LOG=debug` to see mode switches, jumps and landings, or
//! `RUST_LOG=trace` for every frame.
//!
//! Builds a procedural height field, spawns the subject on it and plays a
//! fixed input script through the same key tracker a windowed front end
//! would use:
//! - walk forward, strafe and sprint over the terrain
//! - jump on a timer
//! - switch to the fly camera, look around and fly, then switch back

use std::path::Path;
use std::process::ExitCode;

use log::{error, info};

use overland_engine::config::SimConfig;
use overland_engine::debug::Inspectable;
use overland_engine::input::{IntentState, KeyCode};
use overland_engine::player::SubjectController;

/// One scripted key press or release.
struct ScriptEvent {
    /// Fraction of the run at which the event fires
    at: f32,
    key: KeyCode,
    pressed: bool,
}

impl ScriptEvent {
    const fn press(at: f32, key: KeyCode) -> Self {
        Self {
            at,
            key,
            pressed: true,
        }
    }

    const fn release(at: f32, key: KeyCode) -> Self {
        Self {
            at,
            key,
            pressed: false,
        }
    }
}

const SCRIPT: &[ScriptEvent] = &[
    ScriptEvent::press(0.00, KeyCode::W),
    ScriptEvent::press(0.10, KeyCode::ShiftLeft),
    ScriptEvent::release(0.20, KeyCode::ShiftLeft),
    ScriptEvent::press(0.20, KeyCode::A),
    ScriptEvent::release(0.30, KeyCode::A),
    ScriptEvent::release(0.35, KeyCode::W),
    ScriptEvent::press(0.35, KeyCode::S),
    ScriptEvent::press(0.40, KeyCode::D),
    ScriptEvent::release(0.45, KeyCode::S),
    ScriptEvent::release(0.45, KeyCode::D),
    ScriptEvent::press(0.50, KeyCode::V),
    ScriptEvent::release(0.51, KeyCode::V),
    ScriptEvent::press(0.55, KeyCode::W),
    ScriptEvent::press(0.60, KeyCode::E),
    ScriptEvent::release(0.65, KeyCode::E),
    ScriptEvent::release(0.75, KeyCode::W),
    ScriptEvent::press(0.80, KeyCode::V),
    ScriptEvent::release(0.81, KeyCode::V),
    ScriptEvent::press(0.85, KeyCode::W),
];

/// Frames between scripted jump presses while walking.
const JUMP_INTERVAL: u32 = 90;

fn load_config() -> Result<SimConfig, overland_engine::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("loading config from {path}");
            SimConfig::load(Path::new(&path))
        }
        None => Ok(SimConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let terrain = match config.terrain.build() {
        Ok(field) => field,
        Err(e) => {
            error!("terrain: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "terrain {:?}..{:?}, {} frames at dt={}",
        terrain.min_corner(),
        terrain.max_corner(),
        config.run.frames,
        config.run.delta_time
    );

    let mut subject = SubjectController::new(config.subject, &config.camera, terrain);
    let mut intents = IntentState::new();
    let frames = config.run.frames.max(1);
    let mut next_event = 0;

    for frame in 0..frames {
        let progress = frame as f32 / frames as f32;
        while let Some(event) = SCRIPT.get(next_event).filter(|e| e.at <= progress) {
            intents.handle_key(event.key, event.pressed);
            next_event += 1;
        }

        // Jump on a timer; release right away so the next press is a new edge.
        let jump_now = frame % JUMP_INTERVAL == JUMP_INTERVAL - 1;
        if jump_now {
            intents.handle_key(KeyCode::Space, true);
        }
        // Slow pan while flying.
        if (0.6..0.75).contains(&progress) {
            intents.handle_look_delta(0.002, -0.0005);
        }

        subject.update(config.run.delta_time, &intents.frame());
        intents.end_frame();
        if jump_now {
            intents.handle_key(KeyCode::Space, false);
        }

        let report = config.run.report_every;
        if (report > 0 && frame % report == 0) || frame + 1 == frames {
            let state = subject.state();
            let camera = subject.camera();
            info!(
                "frame {frame:5} mode={} pos={:.2} grounded={} vy={:.2} speed={:.3} cam={:.2}",
                camera.mode(),
                state.position.current,
                state.is_grounded,
                state.vertical_velocity,
                state.speed,
                camera.position()
            );
        }
    }

    for property in subject.properties() {
        if let Ok(value) = subject.get(property.name) {
            info!("{} = {value}", property.name);
        }
    }

    ExitCode::SUCCESS
}
