//! Command-line argument parsing for the orrery.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Animated orbital diagram engine")]
pub struct CliArgs {
    /// Viewport width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Animation speed multiplier.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Time-scale multiplier.
    #[arg(long)]
    pub time_scale: Option<f64>,

    /// Built-in system to load (sol, trappist-1, proxima, kepler-452).
    #[arg(long, default_value = "sol")]
    pub system: String,

    /// Number of frames to simulate before exiting.
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Start with trails disabled.
    #[arg(long)]
    pub no_trails: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.viewport.width = w;
        }
        if let Some(h) = args.height {
            self.viewport.height = h;
        }
        if let Some(speed) = args.speed {
            self.simulation.animation_speed = speed;
        }
        if let Some(scale) = args.time_scale {
            self.simulation.time_scale = scale;
        }
        if args.no_trails {
            self.simulation.enable_trails = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
