//! Configuration for the orrery.
//!
//! Settings persist to disk as a RON file, with every section falling back
//! to defaults when missing. CLI flags parsed with clap override whatever
//! was loaded, and [`Config::reload`] detects edits made while running.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, SimulationConfig, SolverConfig, ViewportConfig, ZoomConfig,
};
pub use error::ConfigError;
