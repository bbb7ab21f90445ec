#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Ward Replay viewer.

mod run_log;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ward_replay_core::{InitialCensus, PlaybackSpeed, Tick};
use ward_replay_rendering::{
    palette, populate_scene, FacilityLayout, PlaybackHud, Presentation, RenderingBackend,
};
use ward_replay_rendering_macroquad::MacroquadBackend;
use ward_replay_system_playback::PlaybackController;
use ward_replay_system_snapshot::build_snapshot_with_census;

/// Playback cadence preset selectable from the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum SpeedArg {
    /// One tick per second.
    Slow,
    /// One tick every half second.
    #[default]
    Normal,
    /// Ten ticks per second.
    Fast,
    /// As fast as the frame loop allows.
    Max,
}

impl From<SpeedArg> for PlaybackSpeed {
    fn from(value: SpeedArg) -> Self {
        match value {
            SpeedArg::Slow => Self::Slow,
            SpeedArg::Normal => Self::Normal,
            SpeedArg::Fast => Self::Fast,
            SpeedArg::Max => Self::Max,
        }
    }
}

/// Command-line arguments accepted by the viewer.
#[derive(Debug, Parser)]
#[command(name = "ward-replay", about = "Animated playback of ward simulation run logs")]
struct Args {
    /// JSON run log produced by the simulation engine; a built-in demo run
    /// plays when omitted.
    #[arg(long)]
    run: Option<PathBuf>,
    /// Initial playback cadence.
    #[arg(long, value_enum, default_value_t = SpeedArg::Normal)]
    speed: SpeedArg,
    /// Render as fast as possible instead of synchronising with the display.
    #[arg(long)]
    no_vsync: bool,
}

/// Entry point for the Ward Replay command-line viewer.
fn main() -> Result<()> {
    let args = Args::parse();

    let run = match &args.run {
        Some(path) => run_log::load(path)
            .with_context(|| format!("failed to load run log {}", path.display()))?,
        None => run_log::demo_run(),
    };

    let layout = FacilityLayout::default();
    let census = InitialCensus::default();
    let events = run.events;

    let mut controller = PlaybackController::new();
    controller.load_run(run.max_ticks);
    controller.set_speed(args.speed.into());

    let snapshot = build_snapshot_with_census(&events, Tick::ZERO, &census);
    let scene = populate_scene(&layout, &snapshot, hud_of(&controller));
    let presentation = Presentation::new("Ward Replay", palette::BACKGROUND, scene);

    let mut last_rendered = Tick::ZERO;
    let backend = MacroquadBackend::new().with_vsync(!args.no_vsync);
    backend.run(presentation, move |dt, input, scene| {
        if input.toggle_playback {
            controller.toggle();
        }
        if let Some(tick) = input.scrub_to {
            controller.seek(tick);
        }
        if let Some(speed) = input.speed_selected {
            controller.set_speed(speed);
        }

        let _ = controller.advance(dt);

        // Snapshots are rebuilt only when the viewed tick moved; the HUD is
        // refreshed every frame so the transport readouts stay live.
        if controller.current_tick() != last_rendered {
            last_rendered = controller.current_tick();
            let snapshot = build_snapshot_with_census(&events, last_rendered, &census);
            *scene = populate_scene(&layout, &snapshot, hud_of(&controller));
        } else {
            scene.hud = hud_of(&controller);
        }
    })
}

fn hud_of(controller: &PlaybackController) -> PlaybackHud {
    PlaybackHud {
        current_tick: controller.current_tick(),
        max_ticks: controller.max_ticks(),
        playing: controller.is_playing(),
        speed: controller.speed(),
    }
}
