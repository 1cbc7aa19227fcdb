//! One orrery session: a validated system, its derived layout, and the
//! play/pause/trail/zoom control surface.
//!
//! The host drives the session by calling [`Simulation::tick`] once per
//! frame and reading [`Simulation::frames`], trails, and the habitable zone
//! back out for drawing.

use glam::DVec2;
use tracing::{debug, info, warn};

use crate::clock::SimulationClock;
use crate::error::SystemError;
use crate::kepler::KeplerSolver;
use crate::options::{SimulationOptions, check_range};
use crate::orbit::{OrbitalState, state_at};
use crate::scale::{OrbitPath, ScaleMapper, Viewport};
use crate::stellar::{Habitability, HabitableZone};
use crate::system::{Body, PlanetarySystem, Star};
use crate::trail::{TrailBuffer, TrailSegment};
use crate::zoom::ZoomState;

/// Per-body output of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyFrame {
    /// Physical orbital state.
    pub state: OrbitalState,
    /// Position in pixels, star at the origin.
    pub position_px: DVec2,
    /// Rendered radius in pixels before zoom compensation.
    pub size_px: f64,
}

/// Habitable-zone bounds in both unit systems, with the bodies inside.
#[derive(Clone, Debug, PartialEq)]
pub struct HabitableZoneInfo<'a> {
    /// Bounds in AU and the stellar luminosity.
    pub zone: HabitableZone,
    /// Inner edge in pixels.
    pub inner_px: f64,
    /// Outer edge in pixels.
    pub outer_px: f64,
    /// Bodies whose nominal semi-major axis lies inside the zone.
    pub habitable_bodies: Vec<&'a Body>,
}

/// A running orrery session.
pub struct Simulation {
    system: PlanetarySystem,
    options: SimulationOptions,
    solver: KeplerSolver,
    zone: HabitableZone,
    scales: ScaleMapper,
    clock: SimulationClock,
    trails: TrailBuffer,
    trails_enabled: bool,
    fade_trails: bool,
    zoom: ZoomState,
    frames: Vec<BodyFrame>,
    nonconverged_solves: u64,
    warned: Vec<bool>,
}

impl Simulation {
    /// Validate `system` and `options` and compute the `t = 0` frame.
    ///
    /// # Errors
    ///
    /// Any [`SystemError`] raised by system validation, the habitable-zone
    /// computation, or the clock's rate checks.
    pub fn new(system: PlanetarySystem, options: SimulationOptions) -> Result<Self, SystemError> {
        system.validate()?;
        let zone = HabitableZone::for_star(&system.star)?;
        let scales = Self::layout(&system, &options)?;
        let clock = SimulationClock::new(options.animation_speed, options.time_scale)?
            .with_base_rate(options.base_rate);
        let zoom = options.zoom.map_or_else(ZoomState::disabled, ZoomState::new);

        info!(
            star = %system.star.name,
            bodies = system.bodies.len(),
            luminosity = zone.luminosity,
            "Habitable zone {:.4} - {:.4} AU",
            zone.inner_au,
            zone.outer_au,
        );

        let body_count = system.bodies.len();
        let mut sim = Self {
            solver: KeplerSolver::new(options.solver_tolerance, options.solver_max_iterations),
            trails: TrailBuffer::new(options.trail_capacity),
            trails_enabled: options.enable_trails,
            fade_trails: options.fade_trails,
            system,
            options,
            zone,
            scales,
            clock,
            zoom,
            frames: Vec::with_capacity(body_count),
            nonconverged_solves: 0,
            warned: vec![false; body_count],
        };
        sim.refresh_frames(false);
        Ok(sim)
    }

    fn layout(
        system: &PlanetarySystem,
        options: &SimulationOptions,
    ) -> Result<ScaleMapper, SystemError> {
        ScaleMapper::for_bodies(
            &system.bodies,
            options.distance_range_px(),
            options.size_range_px,
        )
        .ok_or_else(|| SystemError::EmptySystem(system.star.name.clone()))
    }

    /// Advance the clock by `delta_frames` nominal frames and recompute every
    /// body. While paused, or for a negative or non-finite delta, nothing
    /// changes and the previous frame is returned.
    pub fn tick(&mut self, delta_frames: f64) -> &[BodyFrame] {
        let ticks = self.clock.ticks();
        self.clock.tick(delta_frames);
        if self.clock.ticks() == ticks {
            return &self.frames;
        }
        self.refresh_frames(self.trails_enabled);
        &self.frames
    }

    fn refresh_frames(&mut self, record_trails: bool) {
        let t = self.clock.elapsed_days();
        self.frames.clear();
        for (i, body) in self.system.bodies.iter().enumerate() {
            let state = state_at(&body.elements, t, &self.solver);
            if !state.converged {
                self.nonconverged_solves += 1;
                if !self.warned[i] {
                    self.warned[i] = true;
                    warn!(
                        body = %body.id,
                        eccentricity = body.elements.eccentricity,
                        "Kepler solver did not converge within {} iterations; using best estimate",
                        self.solver.max_iterations(),
                    );
                }
            }
            let position_px = self.scales.project(&state);
            if record_trails {
                self.trails.push(&body.id, position_px);
            }
            self.frames.push(BodyFrame {
                state,
                position_px,
                size_px: self.scales.size_px(body.radius_earth),
            });
        }
    }

    // --- Playback ---

    /// Resume advancing time.
    pub fn play(&mut self) {
        self.clock.play();
        debug!(t = self.clock.elapsed_days(), "Playback resumed");
    }

    /// Freeze time. Takes effect before the next tick.
    pub fn pause(&mut self) {
        self.clock.pause();
        debug!(t = self.clock.elapsed_days(), "Playback paused");
    }

    /// Whether ticks advance time.
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    /// Back to `t = 0` with empty trails. The play state is kept.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.trails.clear(None);
        self.refresh_frames(false);
        debug!("Simulation reset");
    }

    /// Change the animation speed. Zero freezes motion without pausing.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), SystemError> {
        self.clock.set_speed(speed)
    }

    /// Change the time-scale multiplier.
    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<(), SystemError> {
        self.clock.set_time_scale(time_scale)
    }

    /// The session clock.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Elapsed simulated time in days.
    pub fn elapsed_days(&self) -> f64 {
        self.clock.elapsed_days()
    }

    // --- Trails ---

    /// Flip trail recording. Returns the new state.
    pub fn toggle_trails(&mut self) -> bool {
        self.set_trails(!self.trails_enabled);
        self.trails_enabled
    }

    /// Enable or disable trail recording; disabling clears every trail.
    pub fn set_trails(&mut self, enabled: bool) {
        self.trails_enabled = enabled;
        if !enabled {
            self.trails.clear(None);
        }
    }

    /// Whether trails are being recorded.
    pub fn trails_enabled(&self) -> bool {
        self.trails_enabled
    }

    /// Flip trail fading. Returns the new state.
    pub fn toggle_fade_trails(&mut self) -> bool {
        self.fade_trails = !self.fade_trails;
        self.fade_trails
    }

    /// Set trail fading.
    pub fn set_fade_trails(&mut self, fade: bool) {
        self.fade_trails = fade;
    }

    /// Whether trails should be drawn faded.
    pub fn fade_trails(&self) -> bool {
        self.fade_trails
    }

    /// Trail points for `body_id`, oldest first.
    pub fn trail(&self, body_id: &str) -> impl Iterator<Item = DVec2> + '_ {
        self.trails.points(body_id)
    }

    /// Faded trail segments for `body_id`.
    pub fn trail_segments(&self, body_id: &str) -> Vec<TrailSegment> {
        self.trails.faded_segments(body_id)
    }

    /// All trails.
    pub fn trails(&self) -> &TrailBuffer {
        &self.trails
    }

    // --- Zoom ---

    /// Current zoom state.
    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    /// Set the zoom level (clamped). Returns the applied level.
    pub fn set_zoom(&mut self, level: f64) -> f64 {
        self.zoom.set(level)
    }

    /// Zoom in one step.
    pub fn zoom_in(&mut self) -> f64 {
        self.zoom.zoom_in()
    }

    /// Zoom out one step.
    pub fn zoom_out(&mut self) -> f64 {
        self.zoom.zoom_out()
    }

    /// Back to zoom 1.
    pub fn reset_zoom(&mut self) -> f64 {
        self.zoom.reset()
    }

    /// Turn zoom support on or off.
    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.zoom.set_enabled(enabled);
    }

    // --- System and layout ---

    /// The loaded system.
    pub fn system(&self) -> &PlanetarySystem {
        &self.system
    }

    /// Session options as built.
    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Bodies in display order; aligned with [`frames`](Self::frames).
    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    /// Latest per-body output, aligned with [`bodies`](Self::bodies).
    pub fn frames(&self) -> &[BodyFrame] {
        &self.frames
    }

    /// Latest output for one body.
    pub fn frame(&self, body_id: &str) -> Option<&BodyFrame> {
        self.index_of(body_id).map(|i| &self.frames[i])
    }

    fn index_of(&self, body_id: &str) -> Option<usize> {
        self.system.bodies.iter().position(|b| b.id == body_id)
    }

    /// Current scale pair.
    pub fn scales(&self) -> &ScaleMapper {
        &self.scales
    }

    /// Pixel ellipse of a body's orbit.
    pub fn orbit_path(&self, body_id: &str) -> Option<OrbitPath> {
        self.system
            .body(body_id)
            .map(|b| self.scales.orbit_path(&b.elements))
    }

    /// Rendered radius of a body at the current zoom.
    pub fn body_radius_px(&self, body_id: &str) -> Option<f64> {
        self.frame(body_id).map(|f| self.zoom.body_radius_px(f.size_px))
    }

    /// Body under `point_px`, if any. A body is hit within its rendered
    /// radius plus `slop_px`; the closest hit wins.
    pub fn body_at(&self, point_px: DVec2, slop_px: f64) -> Option<&Body> {
        self.system
            .bodies
            .iter()
            .zip(&self.frames)
            .filter_map(|(body, frame)| {
                let distance = frame.position_px.distance(point_px);
                let reach = self.zoom.body_radius_px(frame.size_px) + slop_px;
                (distance <= reach).then_some((body, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(body, _)| body)
    }

    /// Change the viewport. Scales are rebuilt and trails cleared since
    /// their points were recorded in the old scale.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Result<(), SystemError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SystemError::option(
                "viewport",
                format!("must be positive, got {width}x{height}"),
            ));
        }
        let mut options = self.options.clone();
        options.viewport = Viewport::new(width, height);
        check_range("distance_range_px", options.distance_range_px())?;
        self.scales = Self::layout(&self.system, &options)?;
        self.options = options;
        self.trails.clear(None);
        self.refresh_frames(false);
        debug!(width, height, "Viewport changed");
        Ok(())
    }

    // --- Habitable zone ---

    /// Host star.
    pub fn star(&self) -> &Star {
        &self.system.star
    }

    /// Replace the star and recompute the habitable zone. The old star is
    /// kept if the new one is invalid.
    pub fn set_star(&mut self, star: Star) -> Result<(), SystemError> {
        let zone = HabitableZone::for_star(&star)?;
        info!(
            star = %star.name,
            luminosity = zone.luminosity,
            "Habitable zone {:.4} - {:.4} AU",
            zone.inner_au,
            zone.outer_au,
        );
        self.system.star = star;
        self.zone = zone;
        Ok(())
    }

    /// Habitable zone in AU.
    pub fn habitable_zone(&self) -> HabitableZone {
        self.zone
    }

    /// Zone bounds in AU and pixels, plus the bodies classified habitable by
    /// nominal semi-major axis.
    pub fn habitable_zone_info(&self) -> HabitableZoneInfo<'_> {
        HabitableZoneInfo {
            zone: self.zone,
            inner_px: self.scales.distance_px(self.zone.inner_au).max(0.0),
            outer_px: self.scales.distance_px(self.zone.outer_au).max(0.0),
            habitable_bodies: self
                .system
                .bodies
                .iter()
                .filter(|b| self.zone.contains(b.elements.semi_major_axis_au))
                .collect(),
        }
    }

    /// Habitability of one body.
    pub fn habitability(&self, body_id: &str) -> Option<Habitability> {
        self.system
            .body(body_id)
            .map(|b| self.zone.classify(b.elements.semi_major_axis_au))
    }

    /// Kepler solves that ran out of iterations this session.
    pub fn nonconverged_solves(&self) -> u64 {
        self.nonconverged_solves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::OrbitalElements;

    fn planet(id: &str, radius_earth: f64, a: f64, period_days: f64, e: f64) -> Body {
        let elements = OrbitalElements {
            semi_major_axis_au: a,
            period_days,
            eccentricity: e,
        };
        Body::new(id, id, radius_earth, elements)
    }

    fn inner_system() -> PlanetarySystem {
        let star = Star::new("Sun", 1.0, 1.0, 5778.0);
        let bodies = vec![
            planet("venus", 0.949, 0.723, 224.70, 0.007),
            planet("earth", 1.0, 1.0, 365.25, 0.017),
            planet("mars", 0.532, 1.524, 686.98, 0.093),
        ];
        PlanetarySystem::new(star, bodies)
    }

    fn sim() -> Simulation {
        Simulation::new(inner_system(), SimulationOptions::default()).unwrap()
    }

    #[test]
    fn test_initial_frame_at_periapsis() {
        let sim = sim();
        assert_eq!(sim.frames().len(), 3);
        for frame in sim.frames() {
            assert_eq!(frame.state.true_anomaly, 0.0);
            assert!(frame.position_px.x > 0.0);
            assert!(frame.position_px.y.abs() < 1e-12);
        }
        assert!(sim.trails().is_empty());
    }

    #[test]
    fn test_tick_records_trails() {
        let mut sim = sim();
        for _ in 0..60 {
            sim.tick(1.0);
        }
        assert_eq!(sim.trail("earth").count(), 50);
        let last = sim.trail("earth").last().unwrap();
        assert_eq!(last, sim.frame("earth").unwrap().position_px);
    }

    #[test]
    fn test_invalid_delta_leaves_frame_untouched() {
        let mut sim = sim();
        for _ in 0..10 {
            sim.tick(1.0);
        }
        let t = sim.elapsed_days();
        let before = sim.frames().to_vec();

        sim.tick(-5.0);
        sim.tick(f64::NAN);
        assert_eq!(sim.elapsed_days(), t);
        assert_eq!(sim.frames(), before.as_slice());
        assert_eq!(sim.trail("earth").count(), 10);

        sim.tick(1.0);
        assert!(sim.elapsed_days() > t);
        assert!(sim.frames().iter().all(|f| f.position_px.is_finite()));
    }

    #[test]
    fn test_eccentric_periapsis_drawn_on_correct_side() {
        let system = PlanetarySystem::new(
            Star::new("Sun", 1.0, 1.0, 5778.0),
            vec![planet("comet", 0.5, 1.0, 365.25, 0.9), planet("outer", 1.0, 1.2, 480.0, 0.0)],
        );
        let sim = Simulation::new(system, SimulationOptions::default()).unwrap();
        let comet = sim.frame("comet").unwrap();
        assert_eq!(comet.state.true_anomaly, 0.0);
        assert!(comet.position_px.x > 0.0);
        assert!(comet.position_px.x < sim.scales().distance_px(1.0));
    }

    #[test]
    fn test_paused_tick_is_a_no_op() {
        let mut sim = sim();
        sim.tick(1.0);
        let before = sim.frames().to_vec();
        sim.pause();
        for _ in 0..10 {
            sim.tick(1.0);
        }
        assert_eq!(sim.frames(), before.as_slice());
        assert_eq!(sim.trail("mars").count(), 1);
    }

    #[test]
    fn test_toggle_trails_clears() {
        let mut sim = sim();
        sim.tick(1.0);
        assert!(!sim.toggle_trails());
        assert!(sim.trails().is_empty());
        sim.tick(1.0);
        assert!(sim.trails().is_empty());
        assert!(sim.toggle_trails());
        sim.tick(1.0);
        assert_eq!(sim.trail("venus").count(), 1);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut sim = sim();
        for _ in 0..20 {
            sim.tick(1.0);
        }
        sim.reset();
        assert_eq!(sim.elapsed_days(), 0.0);
        assert!(sim.trails().is_empty());
        assert_eq!(sim.frame("earth").unwrap().state.true_anomaly, 0.0);
    }

    #[test]
    fn test_habitable_zone_info() {
        let sim = sim();
        let info = sim.habitable_zone_info();
        let ids: Vec<_> = info.habitable_bodies.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["earth", "mars"]);
        assert!(info.inner_px < info.outer_px);
        assert!((info.inner_px - sim.scales().distance_px(info.zone.inner_au)).abs() < 1e-9);
        assert_eq!(sim.habitability("venus"), Some(Habitability::TooHot));
        assert_eq!(sim.habitability("pluto"), None);
    }

    #[test]
    fn test_set_star_recomputes_zone() {
        let mut sim = sim();
        let before = sim.habitable_zone();
        sim.set_star(Star::new("Big Sun", 2.0, 1.5, 5778.0)).unwrap();
        assert!((sim.habitable_zone().inner_au / before.inner_au - 2.0).abs() < 1e-9);
        assert_eq!(sim.habitability("earth"), Some(Habitability::TooHot));

        assert!(sim.set_star(Star::new("Bad", 0.0, 1.0, 5000.0)).is_err());
        assert_eq!(sim.star().name, "Big Sun");
    }

    #[test]
    fn test_set_viewport_rescales() {
        let mut sim = sim();
        sim.tick(1.0);
        sim.set_viewport(1200.0, 900.0).unwrap();
        assert!(sim.trails().is_empty());
        let mars = sim.frame("mars").unwrap();
        let expected = sim.scales().radial_px(mars.state.radius_au);
        assert!((mars.position_px.length() - expected).abs() < 1e-9);
        assert_eq!(sim.scales().distance().range(), (50.0, 400.0));
        assert!(sim.set_viewport(60.0, 60.0).is_err());
        assert_eq!(sim.scales().distance().range(), (50.0, 400.0));
    }

    #[test]
    fn test_body_at_hit_test() {
        let sim = sim();
        let earth = sim.frame("earth").unwrap().position_px;
        assert_eq!(sim.body_at(earth, 0.0).map(|b| b.id.as_str()), Some("earth"));
        let nearby = earth + DVec2::new(0.0, 2.0);
        assert_eq!(sim.body_at(nearby, 0.0).map(|b| b.id.as_str()), Some("earth"));
        assert!(sim.body_at(DVec2::new(-500.0, -500.0), 5.0).is_none());
    }

    #[test]
    fn test_zoom_controls() {
        let mut sim = sim();
        assert_eq!(sim.zoom_in(), 1.5);
        let size = sim.frame("earth").unwrap().size_px;
        assert_eq!(sim.body_radius_px("earth"), Some((size / 1.5).max(1.0)));
        sim.set_zoom_enabled(false);
        assert_eq!(sim.zoom_in(), 1.0);
        assert_eq!(sim.reset_zoom(), 1.0);
    }

    #[test]
    fn test_nonconvergence_is_absorbed() {
        let options = SimulationOptions::builder().solver(1e-15, 1).build().unwrap();
        let mut system = inner_system();
        system.bodies[2].elements.eccentricity = 0.95;
        let mut sim = Simulation::new(system, options).unwrap();
        for _ in 0..100 {
            sim.tick(100.0);
        }
        assert!(sim.nonconverged_solves() > 0);
        assert!(sim.frames().iter().all(|f| f.position_px.is_finite()));
    }

    #[test]
    fn test_invalid_system_rejected() {
        let mut system = inner_system();
        system.bodies[0].elements.eccentricity = 1.2;
        assert!(matches!(
            Simulation::new(system, SimulationOptions::default()),
            Err(SystemError::InvalidOrbitalElements { .. })
        ));
    }
}
