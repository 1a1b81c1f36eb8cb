use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use glam::{Vec2, Vec3};

use arbor_core::{FrameInput, PointerState, Scene, SceneConfig, SceneEvent};

/// Headless driver: ticks the scene at a fixed rate with a scripted gesture
/// session and logs what happens. Stands in for the render loop.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of ticks to run (defaults to one full scripted session)
    #[arg(long)]
    ticks: Option<u32>,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Layout seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Override the foliage point count
    #[arg(long)]
    foliage: Option<usize>,

    /// Override the number of photo frames
    #[arg(long)]
    photos: Option<usize>,
}

// Scripted session timeline (seconds)
const ASSEMBLE_END: f32 = 4.0;
const SCATTER_END: f32 = 8.0;
const PINCH_END: f32 = 11.0;
const RELEASE_END: f32 = 12.0;
const SESSION_END: f32 = 16.0;

const HAND_CLOSED: f32 = 0.08;
const HAND_OPEN: f32 = 0.35;

/// What a hand tracker might report at time `t`.
fn scripted_input(t: f32) -> FrameInput {
    let sweep = || Some(Vec2::new(0.5 + 0.35 * (t * 0.9).sin(), 0.45));
    if t < ASSEMBLE_END {
        FrameInput {
            pointer: PointerState::default(),
            mode_signal: Some(HAND_CLOSED),
        }
    } else if t < SCATTER_END {
        FrameInput {
            pointer: PointerState {
                position: sweep(),
                pinching: false,
            },
            mode_signal: Some(HAND_OPEN),
        }
    } else if t < PINCH_END {
        // pointer keeps drifting; the lock must not follow it
        FrameInput {
            pointer: PointerState {
                position: sweep(),
                pinching: true,
            },
            mode_signal: None,
        }
    } else if t < RELEASE_END {
        FrameInput {
            pointer: PointerState {
                position: sweep(),
                pinching: false,
            },
            mode_signal: None,
        }
    } else {
        FrameInput {
            pointer: PointerState::default(),
            mode_signal: Some(HAND_CLOSED),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.fps > 0.0, "fps must be positive, got {}", cli.fps);

    let mut config = SceneConfig {
        seed: cli.seed,
        ..SceneConfig::default()
    };
    if let Some(n) = cli.foliage {
        config.foliage.count = n;
    }
    if let Some(n) = cli.photos {
        config.frames.count = n;
    }
    let mut scene = Scene::new(config).context("invalid scene configuration")?;

    let dt = Duration::from_secs_f32(1.0 / cli.fps);
    let ticks = cli
        .ticks
        .unwrap_or_else(|| (SESSION_END * cli.fps).ceil() as u32);
    let ticks_per_report = cli.fps.round().max(1.0) as u32;

    let mut events = Vec::new();
    let mut foliage_positions = Vec::new();
    let mut instances = Vec::new();
    let started = Instant::now();

    for i in 0..ticks {
        let t = i as f32 / cli.fps;
        events.clear();
        scene.tick(dt, &scripted_input(t), &mut events);
        for ev in &events {
            match ev {
                SceneEvent::ModeChanged(mode) => log::info!("[t={t:5.2}] mode -> {mode:?}"),
                SceneEvent::ZoomStarted(id) => log::info!("[t={t:5.2}] zoom on frame {}", id.0),
                SceneEvent::ZoomEnded(id) => log::info!("[t={t:5.2}] release frame {}", id.0),
            }
        }

        // the renderer would upload these every frame
        scene.instances(&mut instances);
        if (i + 1) % ticks_per_report == 0 {
            scene.foliage_positions(&mut foliage_positions);
            let (lo, hi) = bounds(&foliage_positions);
            log::info!(
                "[t={t:5.2}] progress={:.3} ornament_err={:.3} locked={:?} foliage={:.1}..{:.1}",
                scene.progress(),
                scene.ornament_settle_error(),
                scene.locked_frame().map(|id| id.0),
                lo,
                hi
            );
        }
    }

    let elapsed = started.elapsed();
    log::info!(
        "[native] {} ticks in {:.1} ms ({:.3} ms/tick), {} instances, {} foliage points",
        ticks,
        elapsed.as_secs_f64() * 1e3,
        elapsed.as_secs_f64() * 1e3 / ticks.max(1) as f64,
        instances.len(),
        scene.foliage().len()
    );
    Ok(())
}

fn bounds(points: &[Vec3]) -> (Vec3, Vec3) {
    if points.is_empty() {
        return (Vec3::ZERO, Vec3::ZERO);
    }
    points.iter().fold(
        (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
        |(lo, hi), p| (lo.min(*p), hi.max(*p)),
    )
}
