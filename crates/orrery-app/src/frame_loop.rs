//! Fixed-timestep frame loop.
//!
//! Decouples simulation steps (fixed 60 Hz) from the host's frame rate using
//! an accumulator, and reports an interpolation alpha for drawing between
//! steps. The simulation itself never schedules anything; the loop calls
//! into it once per step.

use std::time::Instant;

use tracing::warn;

/// Fixed simulation step: 60 Hz (16.666… ms per step).
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time honored. Longer frames are clamped so a stall is
/// accepted as slowdown rather than a burst of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator state of the loop.
///
/// Call [`tick`](Self::tick) once per host frame, or [`advance`](Self::advance)
/// with an explicit frame time when there is no wall clock to measure.
pub struct FrameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
    clamped_frames: u64,
}

impl FrameLoop {
    /// Creates a loop starting from the current instant.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
            clamped_frames: 0,
        }
    }

    /// Measure wall-clock time since the previous call and [`advance`](Self::advance).
    pub fn tick(&mut self, update_fn: impl FnMut(f64, f64), render_fn: impl FnMut(f64)) {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        self.advance(frame_time, update_fn, render_fn);
    }

    /// Run one frame of `frame_time` seconds.
    ///
    /// - `update_fn(fixed_dt, total_sim_time)` runs zero or more times at the
    ///   fixed rate.
    /// - `render_fn(alpha)` runs exactly once with alpha in `[0.0, 1.0)`.
    pub fn advance(
        &mut self,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        mut render_fn: impl FnMut(f64),
    ) {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
            self.clamped_frames += 1;
        }

        self.accumulator += frame_time;

        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(self.alpha());
        self.frame_count += 1;
    }

    /// Interpolation alpha without running a frame.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fixed steps run so far.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Wall time simulated in seconds (`update_count · FIXED_DT`).
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }

    /// Frames whose time exceeded [`MAX_FRAME_TIME`].
    pub fn clamped_frames(&self) -> u64 {
        self.clamped_frames
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use orrery_core::{Simulation, SimulationOptions};

    use super::*;

    #[test]
    fn test_accumulator_single_step() {
        let mut loop_ = FrameLoop::new();
        let mut updates = 0u32;
        loop_.advance(FIXED_DT, |_, _| updates += 1, |_| {});
        assert_eq!(updates, 1);
        assert!(loop_.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_multiple_steps() {
        let mut loop_ = FrameLoop::new();
        let mut sim_times = Vec::new();
        loop_.advance(3.0 * FIXED_DT + 1e-9, |_, t| sim_times.push(t), |_| {});
        assert_eq!(sim_times.len(), 3);
        assert!((sim_times[2] - 2.0 * FIXED_DT).abs() < 1e-12);
        assert!((loop_.total_sim_time() - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_partial_frame_only_renders() {
        let mut loop_ = FrameLoop::new();
        let mut updates = 0u32;
        let mut alpha_received = -1.0;
        loop_.advance(0.25 * FIXED_DT, |_, _| updates += 1, |a| alpha_received = a);
        assert_eq!(updates, 0);
        assert!((alpha_received - 0.25).abs() < 1e-10);
        assert!((0.0..1.0).contains(&alpha_received));
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut loop_ = FrameLoop::new();
        let mut updates = 0u32;
        loop_.advance(1.0, |_, _| updates += 1, |_| {});
        let max_updates = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(updates > 0 && updates <= max_updates, "got {updates} updates");
        assert_eq!(loop_.clamped_frames(), 1);
    }

    #[test]
    fn test_negative_and_zero_frame_time() {
        let mut loop_ = FrameLoop::new();
        let mut updates = 0u32;
        loop_.advance(0.0, |_, _| updates += 1, |_| {});
        loop_.advance(-1.0, |_, _| updates += 1, |_| {});
        assert_eq!(updates, 0);
        assert_eq!(loop_.alpha(), 0.0);
        assert_eq!(loop_.frame_count(), 2);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        let mut loop_a = FrameLoop::new();
        let mut loop_b = FrameLoop::new();
        for &ft in &frame_times {
            loop_a.advance(ft, |_, _| {}, |_| {});
            loop_b.advance(ft, |_, _| {}, |_| {});
            assert!((loop_a.alpha() - loop_b.alpha()).abs() < 1e-15);
        }
        assert_eq!(loop_a.update_count(), loop_b.update_count());
        let expected = loop_a.update_count() as f64 * FIXED_DT;
        assert!((loop_a.total_sim_time() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_one_simulation_tick_per_step() {
        let mut sim = Simulation::new(crate::catalog::sol(), SimulationOptions::default()).unwrap();
        let mut loop_ = FrameLoop::new();
        for _ in 0..60 {
            loop_.advance(
                FIXED_DT,
                |_, _| {
                    sim.tick(1.0);
                },
                |_| {},
            );
        }
        assert_eq!(loop_.update_count(), 60);
        assert_eq!(sim.clock().ticks(), 60);
        assert!((sim.elapsed_days() - 60.0 * sim.clock().step_days()).abs() < 1e-12);
    }

    #[test]
    fn test_wall_clock_tick_renders_once_per_call() {
        let mut loop_ = FrameLoop::new();
        let mut updates = 0u32;
        let mut renders = 0u32;
        let mut alphas = Vec::new();
        for _ in 0..2 {
            loop_.tick(
                |_, _| updates += 1,
                |a| {
                    renders += 1;
                    alphas.push(a);
                },
            );
        }
        assert_eq!(loop_.frame_count(), 2);
        assert_eq!(renders, 2);
        assert_eq!(loop_.update_count(), u64::from(updates));
        let max_updates = 2 * (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(updates <= max_updates, "got {updates} updates");
        assert!(alphas.iter().all(|a| (0.0..1.0).contains(a)));
    }

    #[test]
    fn test_default() {
        let loop_ = FrameLoop::default();
        assert_eq!(loop_.frame_count(), 0);
        assert_eq!(loop_.update_count(), 0);
        assert_eq!(loop_.total_sim_time(), 0.0);
    }
}
