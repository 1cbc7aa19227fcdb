//! Simulation clock: elapsed simulated time in days, advanced once per frame.
//!
//! The clock never schedules itself. The host calls [`SimulationClock::tick`]
//! once per frame (or per fixed step) and the clock decides whether time
//! moves.

use tracing::warn;

use crate::error::SystemError;

/// Simulated days that pass in one nominal frame at speed 1 and time scale 1.
pub const BASE_RATE_DAYS_PER_FRAME: f64 = 0.01;

/// Play/pause state and elapsed simulated time.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    elapsed_days: f64,
    playing: bool,
    animation_speed: f64,
    time_scale: f64,
    base_rate: f64,
    ticks: u64,
}

impl SimulationClock {
    /// A playing clock at `t = 0`.
    ///
    /// # Errors
    ///
    /// [`SystemError::InvalidOption`] if the speed is negative or the time
    /// scale is not strictly positive.
    pub fn new(animation_speed: f64, time_scale: f64) -> Result<Self, SystemError> {
        let mut clock = Self {
            elapsed_days: 0.0,
            playing: true,
            animation_speed: 1.0,
            time_scale: 1.0,
            base_rate: BASE_RATE_DAYS_PER_FRAME,
            ticks: 0,
        };
        clock.set_speed(animation_speed)?;
        clock.set_time_scale(time_scale)?;
        Ok(clock)
    }

    /// Override the days-per-frame base rate.
    pub fn with_base_rate(mut self, base_rate: f64) -> Self {
        self.base_rate = base_rate;
        self
    }

    /// Advance by `delta_frames` nominal frames if playing. Returns the new
    /// elapsed time.
    ///
    /// Elapsed time never decreases: a negative or non-finite delta is
    /// dropped and the tick does not count.
    pub fn tick(&mut self, delta_frames: f64) -> f64 {
        if !self.playing {
            return self.elapsed_days;
        }
        if !(delta_frames.is_finite() && delta_frames >= 0.0) {
            warn!(delta_frames, "Ignoring invalid tick delta");
            return self.elapsed_days;
        }
        self.elapsed_days += self.step_days() * delta_frames;
        self.ticks += 1;
        self.elapsed_days
    }

    /// Simulated days one frame currently advances.
    pub fn step_days(&self) -> f64 {
        self.base_rate * self.animation_speed * self.time_scale
    }

    /// Resume without touching elapsed time.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Freeze elapsed time until [`play`](Self::play).
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Return to `t = 0`. The play state is kept.
    pub fn reset(&mut self) {
        self.elapsed_days = 0.0;
        self.ticks = 0;
    }

    /// Change the animation speed for subsequent ticks. Zero freezes motion
    /// without pausing.
    pub fn set_speed(&mut self, animation_speed: f64) -> Result<(), SystemError> {
        if !(animation_speed.is_finite() && animation_speed >= 0.0) {
            return Err(SystemError::option(
                "animation_speed",
                format!("must be a finite value >= 0, got {animation_speed}"),
            ));
        }
        self.animation_speed = animation_speed;
        Ok(())
    }

    /// Change the time-scale multiplier for subsequent ticks.
    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<(), SystemError> {
        if !(time_scale.is_finite() && time_scale > 0.0) {
            return Err(SystemError::option(
                "time_scale",
                format!("must be a finite value > 0, got {time_scale}"),
            ));
        }
        self.time_scale = time_scale;
        Ok(())
    }

    /// Elapsed simulated time in days.
    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    /// Whether ticks currently advance time.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current animation speed.
    pub fn animation_speed(&self) -> f64 {
        self.animation_speed
    }

    /// Current time-scale multiplier.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Ticks that advanced time since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            elapsed_days: 0.0,
            playing: true,
            animation_speed: 1.0,
            time_scale: 1.0,
            base_rate: BASE_RATE_DAYS_PER_FRAME,
            ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_by_base_rate() {
        let mut clock = SimulationClock::default();
        let t = clock.tick(1.0);
        assert!((t - 0.01).abs() < 1e-15);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_speed_and_time_scale_multiply() {
        let mut clock = SimulationClock::new(2.0, 5.0).unwrap();
        clock.tick(1.0);
        assert!((clock.elapsed_days() - 0.1).abs() < 1e-12);
        clock.tick(0.5);
        assert!((clock.elapsed_days() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut clock = SimulationClock::default();
        for _ in 0..10 {
            clock.tick(1.0);
        }
        let after_ten = clock.elapsed_days();

        clock.pause();
        for _ in 0..10 {
            clock.tick(1.0);
        }
        assert_eq!(clock.elapsed_days(), after_ten);

        clock.play();
        for _ in 0..5 {
            clock.tick(1.0);
        }
        let expected = after_ten + 5.0 * clock.step_days();
        assert!((clock.elapsed_days() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_reset_keeps_play_state() {
        let mut clock = SimulationClock::default();
        clock.tick(1.0);
        clock.pause();
        clock.reset();
        assert_eq!(clock.elapsed_days(), 0.0);
        assert!(!clock.is_playing());
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_zero_speed_freezes_without_pausing() {
        let mut clock = SimulationClock::default();
        clock.set_speed(0.0).unwrap();
        clock.tick(1.0);
        assert!(clock.is_playing());
        assert_eq!(clock.elapsed_days(), 0.0);
    }

    #[test]
    fn test_speed_change_applies_to_next_tick() {
        let mut clock = SimulationClock::default();
        clock.tick(1.0);
        clock.set_speed(10.0).unwrap();
        clock.tick(1.0);
        assert!((clock.elapsed_days() - 0.11).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let mut clock = SimulationClock::default();
        assert!(clock.set_speed(-1.0).is_err());
        assert!(clock.set_speed(f64::NAN).is_err());
        assert!(clock.set_time_scale(0.0).is_err());
        assert!(SimulationClock::new(1.0, -2.0).is_err());
        assert_eq!(clock.animation_speed(), 1.0);
    }

    #[test]
    fn test_invalid_delta_is_ignored() {
        let mut clock = SimulationClock::default();
        for _ in 0..10 {
            clock.tick(1.0);
        }
        let before = clock.elapsed_days();

        assert_eq!(clock.tick(-5.0), before);
        assert_eq!(clock.tick(f64::NAN), before);
        assert_eq!(clock.tick(f64::INFINITY), before);
        assert_eq!(clock.ticks(), 10);

        clock.tick(1.0);
        assert!((clock.elapsed_days() - (before + clock.step_days())).abs() < 1e-12);
    }

    #[test]
    fn test_custom_base_rate() {
        let mut clock = SimulationClock::default().with_base_rate(1.0);
        clock.tick(3.0);
        assert_eq!(clock.elapsed_days(), 3.0);
    }
}
