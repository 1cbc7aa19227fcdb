//! Glue between the persisted [`Config`] and a running [`Simulation`].

use orrery_config::Config;
use orrery_core::{Simulation, SimulationOptions, SystemError, ZoomLimits};
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::SYSTEM_NAMES;

/// Anything that stops the binary from running a session.
///
/// Config and directory failures are not listed: the binary logs them and
/// carries on with defaults.
#[derive(Debug, Error)]
pub enum AppError {
    /// The requested system is not in the catalog.
    #[error("unknown system {name:?}, expected one of: {known}", known = SYSTEM_NAMES.join(", "))]
    UnknownSystem { name: String },
    /// The system or options were rejected.
    #[error(transparent)]
    System(#[from] SystemError),
}

/// Build validated session options from `config`.
pub fn options_from_config(config: &Config) -> Result<SimulationOptions, SystemError> {
    let sim = &config.simulation;
    let zoom = config.zoom.enabled.then_some(ZoomLimits {
        min: config.zoom.min,
        max: config.zoom.max,
    });
    let mut builder = SimulationOptions::builder()
        .animation_speed(sim.animation_speed)
        .time_scale(sim.time_scale)
        .trail_capacity(sim.trail_capacity)
        .enable_trails(sim.enable_trails)
        .fade_trails(sim.fade_trails)
        .viewport(
            f64::from(config.viewport.width),
            f64::from(config.viewport.height),
        )
        .size_range_px(sim.size_range_px[0], sim.size_range_px[1])
        .zoom(zoom)
        .solver(config.solver.tolerance, config.solver.max_iterations);
    if let Some([min, max]) = sim.distance_range_px {
        builder = builder.distance_range_px(min, max);
    }
    builder.build()
}

/// Push the runtime-adjustable parts of a reloaded config into `sim`.
///
/// Settings fixed at construction (trail capacity, pixel ranges, zoom
/// limits, solver) are reported and left alone until the next start.
pub fn apply_config_changes(
    sim: &mut Simulation,
    old: &Config,
    new: &Config,
) -> Result<(), SystemError> {
    let (was, now) = (&old.simulation, &new.simulation);
    if was.animation_speed != now.animation_speed {
        sim.set_speed(now.animation_speed)?;
    }
    if was.time_scale != now.time_scale {
        sim.set_time_scale(now.time_scale)?;
    }
    if was.enable_trails != now.enable_trails {
        sim.set_trails(now.enable_trails);
    }
    if was.fade_trails != now.fade_trails {
        sim.set_fade_trails(now.fade_trails);
    }
    if old.viewport.width != new.viewport.width || old.viewport.height != new.viewport.height {
        sim.set_viewport(
            f64::from(new.viewport.width),
            f64::from(new.viewport.height),
        )?;
    }
    if old.zoom.enabled != new.zoom.enabled {
        sim.set_zoom_enabled(new.zoom.enabled);
    }

    let needs_restart = was.trail_capacity != now.trail_capacity
        || was.distance_range_px != now.distance_range_px
        || was.size_range_px != now.size_range_px
        || old.zoom.min != new.zoom.min
        || old.zoom.max != new.zoom.max
        || old.solver != new.solver;
    if needs_restart {
        warn!("Some changed settings only take effect after a restart");
    }
    info!(
        speed = sim.clock().animation_speed(),
        time_scale = sim.clock().time_scale(),
        trails = sim.trails_enabled(),
        "Applied reloaded config"
    );
    Ok(())
}
