//! Immutable session options and their validating builder.

use crate::clock::BASE_RATE_DAYS_PER_FRAME;
use crate::error::SystemError;
use crate::kepler::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::scale::{DEFAULT_SIZE_RANGE_PX, Viewport};
use crate::trail::DEFAULT_TRAIL_CAPACITY;
use crate::zoom::ZoomLimits;

/// Validated options for one simulation session.
///
/// Built once through [`SimulationOptions::builder`]; runtime changes go
/// through the [`Simulation`](crate::Simulation) control surface instead.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOptions {
    pub(crate) animation_speed: f64,
    pub(crate) time_scale: f64,
    pub(crate) base_rate: f64,
    pub(crate) trail_capacity: usize,
    pub(crate) enable_trails: bool,
    pub(crate) fade_trails: bool,
    pub(crate) viewport: Viewport,
    pub(crate) distance_range_px: Option<(f64, f64)>,
    pub(crate) size_range_px: (f64, f64),
    pub(crate) zoom: Option<ZoomLimits>,
    pub(crate) solver_tolerance: f64,
    pub(crate) solver_max_iterations: u32,
}

impl SimulationOptions {
    /// Start from defaults.
    pub fn builder() -> SimulationOptionsBuilder {
        SimulationOptionsBuilder::default()
    }

    /// Initial animation speed.
    pub fn animation_speed(&self) -> f64 {
        self.animation_speed
    }

    /// Initial time-scale multiplier.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Simulated days per frame at speed 1 and time scale 1.
    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    /// Points kept per trail.
    pub fn trail_capacity(&self) -> usize {
        self.trail_capacity
    }

    /// Whether trails start enabled.
    pub fn enable_trails(&self) -> bool {
        self.enable_trails
    }

    /// Whether trails start faded.
    pub fn fade_trails(&self) -> bool {
        self.fade_trails
    }

    /// Viewport size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Orbit radius range in pixels; derived from the viewport unless set.
    pub fn distance_range_px(&self) -> (f64, f64) {
        self.distance_range_px
            .unwrap_or_else(|| self.viewport.default_distance_range())
    }

    /// Body size range in pixels.
    pub fn size_range_px(&self) -> (f64, f64) {
        self.size_range_px
    }

    /// Zoom limits, or `None` when zoom is disabled.
    pub fn zoom(&self) -> Option<ZoomLimits> {
        self.zoom
    }

    /// Kepler residual tolerance.
    pub fn solver_tolerance(&self) -> f64 {
        self.solver_tolerance
    }

    /// Kepler iteration budget.
    pub fn solver_max_iterations(&self) -> u32 {
        self.solver_max_iterations
    }
}

impl Default for SimulationOptions {
    fn default() -> Self {
        SimulationOptionsBuilder::default().unchecked()
    }
}

/// Builder for [`SimulationOptions`]. Nothing is checked until
/// [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct SimulationOptionsBuilder {
    animation_speed: f64,
    time_scale: f64,
    base_rate: f64,
    trail_capacity: usize,
    enable_trails: bool,
    fade_trails: bool,
    viewport: Viewport,
    distance_range_px: Option<(f64, f64)>,
    size_range_px: (f64, f64),
    zoom: Option<ZoomLimits>,
    solver_tolerance: f64,
    solver_max_iterations: u32,
}

impl Default for SimulationOptionsBuilder {
    fn default() -> Self {
        Self {
            animation_speed: 1.0,
            time_scale: 1.0,
            base_rate: BASE_RATE_DAYS_PER_FRAME,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            enable_trails: true,
            fade_trails: true,
            viewport: Viewport::default(),
            distance_range_px: None,
            size_range_px: DEFAULT_SIZE_RANGE_PX,
            zoom: Some(ZoomLimits::default()),
            solver_tolerance: DEFAULT_TOLERANCE,
            solver_max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SimulationOptionsBuilder {
    /// Animation speed multiplier (>= 0).
    pub fn animation_speed(mut self, speed: f64) -> Self {
        self.animation_speed = speed;
        self
    }

    /// Time-scale multiplier (> 0).
    pub fn time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }

    /// Simulated days per frame at unit speed (> 0).
    pub fn base_rate(mut self, days_per_frame: f64) -> Self {
        self.base_rate = days_per_frame;
        self
    }

    /// Points kept per trail (>= 1).
    pub fn trail_capacity(mut self, capacity: usize) -> Self {
        self.trail_capacity = capacity;
        self
    }

    /// Record trails from the first tick.
    pub fn enable_trails(mut self, enable: bool) -> Self {
        self.enable_trails = enable;
        self
    }

    /// Fade trails toward their oldest point.
    pub fn fade_trails(mut self, fade: bool) -> Self {
        self.fade_trails = fade;
        self
    }

    /// Viewport size in pixels.
    pub fn viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    /// Explicit orbit radius range in pixels.
    pub fn distance_range_px(mut self, min: f64, max: f64) -> Self {
        self.distance_range_px = Some((min, max));
        self
    }

    /// Rendered body size range in pixels.
    pub fn size_range_px(mut self, min: f64, max: f64) -> Self {
        self.size_range_px = (min, max);
        self
    }

    /// Zoom limits; `None` disables zoom.
    pub fn zoom(mut self, limits: Option<ZoomLimits>) -> Self {
        self.zoom = limits;
        self
    }

    /// Kepler solver tolerance and iteration budget.
    pub fn solver(mut self, tolerance: f64, max_iterations: u32) -> Self {
        self.solver_tolerance = tolerance;
        self.solver_max_iterations = max_iterations;
        self
    }

    /// Validate and freeze.
    pub fn build(self) -> Result<SimulationOptions, SystemError> {
        if !(self.animation_speed.is_finite() && self.animation_speed >= 0.0) {
            return Err(SystemError::option(
                "animation_speed",
                format!("must be a finite value >= 0, got {}", self.animation_speed),
            ));
        }
        check_positive("time_scale", self.time_scale)?;
        check_positive("base_rate", self.base_rate)?;
        if self.trail_capacity == 0 {
            return Err(SystemError::option("trail_capacity", "must be at least 1"));
        }
        check_positive("viewport.width", self.viewport.width)?;
        check_positive("viewport.height", self.viewport.height)?;
        check_range("distance_range_px", self.distance_range_px.unwrap_or_else(|| {
            self.viewport.default_distance_range()
        }))?;
        check_range("size_range_px", self.size_range_px)?;
        if let Some(limits) = &self.zoom {
            limits.validate()?;
        }
        check_positive("solver.tolerance", self.solver_tolerance)?;
        if self.solver_max_iterations == 0 {
            return Err(SystemError::option("solver.max_iterations", "must be at least 1"));
        }
        Ok(self.unchecked())
    }

    fn unchecked(self) -> SimulationOptions {
        SimulationOptions {
            animation_speed: self.animation_speed,
            time_scale: self.time_scale,
            base_rate: self.base_rate,
            trail_capacity: self.trail_capacity,
            enable_trails: self.enable_trails,
            fade_trails: self.fade_trails,
            viewport: self.viewport,
            distance_range_px: self.distance_range_px,
            size_range_px: self.size_range_px,
            zoom: self.zoom,
            solver_tolerance: self.solver_tolerance,
            solver_max_iterations: self.solver_max_iterations,
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), SystemError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SystemError::option(name, format!("must be a finite value > 0, got {value}")))
    }
}

pub(crate) fn check_range(name: &'static str, (min, max): (f64, f64)) -> Result<(), SystemError> {
    if min.is_finite() && max.is_finite() && min >= 0.0 && min <= max {
        Ok(())
    } else {
        Err(SystemError::option(
            name,
            format!("must satisfy 0 <= min <= max, got [{min}, {max}]"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = SimulationOptions::builder().build().unwrap();
        assert_eq!(options, SimulationOptions::default());
        assert_eq!(options.trail_capacity(), 50);
        assert_eq!(options.distance_range_px(), (50.0, 250.0));
        assert_eq!(options.size_range_px(), (3.0, 6.0));
        assert!(options.enable_trails());
        assert_eq!(options.zoom(), Some(ZoomLimits { min: 0.5, max: 3.0 }));
    }

    #[test]
    fn test_viewport_drives_distance_range() {
        let options = SimulationOptions::builder().viewport(1200.0, 900.0).build().unwrap();
        assert_eq!(options.distance_range_px(), (50.0, 400.0));
        let options = SimulationOptions::builder()
            .viewport(1200.0, 900.0)
            .distance_range_px(10.0, 20.0)
            .build()
            .unwrap();
        assert_eq!(options.distance_range_px(), (10.0, 20.0));
    }

    #[test]
    fn test_zero_speed_allowed() {
        assert!(SimulationOptions::builder().animation_speed(0.0).build().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            SimulationOptions::builder().animation_speed(-1.0),
            SimulationOptions::builder().time_scale(0.0),
            SimulationOptions::builder().trail_capacity(0),
            SimulationOptions::builder().viewport(0.0, 600.0),
            SimulationOptions::builder().size_range_px(6.0, 3.0),
            SimulationOptions::builder().distance_range_px(-5.0, 100.0),
            SimulationOptions::builder().solver(0.0, 20),
            SimulationOptions::builder().solver(1e-6, 0),
            SimulationOptions::builder().zoom(Some(ZoomLimits { min: 2.0, max: 3.0 })),
            // A tiny viewport leaves no room for the default orbit margins.
            SimulationOptions::builder().viewport(80.0, 80.0),
        ];
        for builder in cases {
            let debug = format!("{builder:?}");
            assert!(
                matches!(builder.build(), Err(SystemError::InvalidOption { .. })),
                "accepted {debug}"
            );
        }
    }
}
