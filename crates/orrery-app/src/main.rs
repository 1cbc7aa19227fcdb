//! Headless orrery: runs a built-in system through the fixed-timestep loop
//! and logs where every body ended up.
//!
//! Run with: `cargo run -p orrery-app -- --system trappist-1 --frames 600`

use std::process::ExitCode;

use clap::Parser;
use orrery_app::catalog;
use orrery_app::frame_loop::{FIXED_DT, FrameLoop};
use orrery_app::platform::PlatformDirs;
use orrery_app::session::{self, AppError};
use orrery_config::{CliArgs, Config};
use orrery_core::Simulation;
use tracing::{debug, error, info, warn};

/// Frames between checks of `config.ron` for edits.
const RELOAD_INTERVAL_FRAMES: u64 = 120;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => PlatformDirs::under(dir),
        None => PlatformDirs::resolve().unwrap_or_else(|e| {
            eprintln!("{e}; using the working directory");
            PlatformDirs::under(std::path::Path::new("."))
        }),
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
    }

    let file_config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e}");
        Config::default()
    });
    let mut config = file_config.clone();
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match run(&args, file_config, config, &dirs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    args: &CliArgs,
    mut file_config: Config,
    mut config: Config,
    dirs: &PlatformDirs,
) -> Result<(), AppError> {
    let system = catalog::lookup(&args.system).ok_or_else(|| AppError::UnknownSystem {
        name: args.system.clone(),
    })?;
    let mut sim = Simulation::new(system, session::options_from_config(&config)?)?;
    report_zone(&sim);

    let mut frame_loop = FrameLoop::new();
    for frame in 1..=args.frames {
        frame_loop.advance(
            FIXED_DT,
            |_, _| {
                sim.tick(1.0);
            },
            |_| {},
        );

        if frame % RELOAD_INTERVAL_FRAMES == 0 {
            match file_config.reload(&dirs.config_dir) {
                Ok(Some(reloaded)) => {
                    let mut next = reloaded.clone();
                    next.apply_cli_overrides(args);
                    session::apply_config_changes(&mut sim, &config, &next)?;
                    file_config = reloaded;
                    config = next;
                }
                Ok(None) => {}
                Err(e) => warn!("Config reload skipped: {e}"),
            }
            debug!(frame, elapsed_days = sim.elapsed_days(), "Progress");
        }
    }

    report_positions(&sim);
    info!(
        frames = frame_loop.frame_count(),
        steps = frame_loop.update_count(),
        elapsed_days = sim.elapsed_days(),
        nonconverged = sim.nonconverged_solves(),
        "Run complete"
    );
    Ok(())
}

fn report_zone(sim: &Simulation) {
    let info = sim.habitable_zone_info();
    let star = sim.star();
    info!(
        "{} (R={} R☉, T={} K): L={:.5} L☉",
        star.name, star.radius_solar, star.temperature_k, info.zone.luminosity
    );
    info!(
        "Habitable zone {:.4} - {:.4} AU ({:.1} - {:.1} px)",
        info.zone.inner_au, info.zone.outer_au, info.inner_px, info.outer_px
    );
    let names: Vec<&str> = info.habitable_bodies.iter().map(|b| b.name.as_str()).collect();
    if names.is_empty() {
        info!("No body orbits inside the habitable zone");
    } else {
        info!("Habitable: {}", names.join(", "));
    }
}

fn report_positions(sim: &Simulation) {
    for (body, frame) in sim.bodies().iter().zip(sim.frames()) {
        let label = sim
            .habitability(&body.id)
            .map_or("unknown", |h| h.label());
        info!(
            body = %body.id,
            "{}: r={:.4} AU θ={:.1}° at ({:.1}, {:.1}) px, {}",
            body.name,
            frame.state.radius_au,
            frame.state.true_anomaly.to_degrees(),
            frame.position_px.x,
            frame.position_px.y,
            label,
        );
    }
}
