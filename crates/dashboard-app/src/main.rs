//! Rover dashboard host.
//!
//! Runs the simulation loop and reads `MissionCommand` JSON objects from
//! stdin, one per line, until EOF or `--duration-secs` elapses.
//!
//! Usage:
//!   rover-dashboard --autostart --frames-out frames.jsonl --duration-secs 10
//!   echo '{"type":"SetSpeed","speed":30}' | rover-dashboard --autostart

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use dashboard_app::control;
use dashboard_app::host_loop::{HostOptions, DEFAULT_DIAL_SIZE, DEFAULT_MAP_SIZE};
use dashboard_app::sink::FrameSink;
use dashboard_app::state::AppState;
use dashboard_core::commands::MissionCommand;
use dashboard_core::config::DashboardConfig;
use dashboard_render::surface::SurfaceSize;

#[derive(Parser, Debug)]
#[command(name = "rover-dashboard")]
#[command(about = "Run the rover operator dashboard simulation headless")]
struct Args {
    /// JSON config file; omitted sections keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the map speckle texture
    #[arg(long)]
    seed: Option<u64>,

    /// Write every rendered frame to this file as JSON lines
    #[arg(long)]
    frames_out: Option<PathBuf>,

    /// Stop after this many seconds instead of waiting for stdin EOF
    #[arg(long)]
    duration_secs: Option<f64>,

    /// Start the mission timer immediately
    #[arg(long)]
    autostart: bool,

    #[arg(long, default_value_t = DEFAULT_MAP_SIZE.width)]
    map_width: f64,

    #[arg(long, default_value_t = DEFAULT_MAP_SIZE.height)]
    map_height: f64,

    /// Side length of the square gauge and radar canvases
    #[arg(long, default_value_t = DEFAULT_DIAL_SIZE.width)]
    dial_size: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    let duration = args
        .duration_secs
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("--duration-secs must be a non-negative number")?;

    let sink = args
        .frames_out
        .as_ref()
        .map(FrameSink::create)
        .transpose()
        .context("opening --frames-out")?;

    let options = HostOptions {
        config,
        seed: args.seed,
        map_size: SurfaceSize::new(args.map_width, args.map_height),
        dial_size: SurfaceSize::new(args.dial_size, args.dial_size),
        duration,
        autostart: args.autostart,
    };

    let state = AppState::new();
    control::start(&state, options, sink)?;

    if duration.is_some() {
        control::wait(&state)?;
    } else {
        forward_stdin(&state)?;
        control::shutdown(&state)?;
    }

    if let Some(frame) = control::get_frame(&state)? {
        tracing::info!(
            frame = frame.frame,
            timer = %frame.status.timer_display,
            waypoints_remaining = frame.status.waypoints_remaining,
            "final state"
        );
    }
    Ok(())
}

/// Forward stdin commands until EOF. Malformed lines are logged and skipped.
fn forward_stdin(state: &AppState) -> anyhow::Result<()> {
    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<MissionCommand>(line) {
            Ok(command) => control::send_command(state, command)?,
            Err(err) => tracing::warn!(%err, line, "ignoring malformed command"),
        }
    }
    Ok(())
}
