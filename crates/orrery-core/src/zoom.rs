//! Zoom level for the diagram, with compensation for on-screen sizes.

use crate::error::SystemError;

/// Multiplier applied by one zoom-in or zoom-out step.
pub const ZOOM_STEP: f64 = 1.5;

/// Smallest rendered body radius regardless of zoom.
const MIN_BODY_RADIUS_PX: f64 = 1.0;

/// Trail stroke width at zoom 1, and its floor.
const TRAIL_WIDTH_PX: f64 = 2.0;
const MIN_TRAIL_WIDTH_PX: f64 = 0.5;

/// Allowed zoom interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    /// Smallest zoom factor.
    pub min: f64,
    /// Largest zoom factor.
    pub max: f64,
}

impl ZoomLimits {
    /// Check `0 < min ≤ 1 ≤ max`, so the identity zoom is always reachable.
    pub fn validate(&self) -> Result<(), SystemError> {
        let ok = self.min.is_finite()
            && self.max.is_finite()
            && self.min > 0.0
            && self.min <= 1.0
            && self.max >= 1.0;
        if ok {
            Ok(())
        } else {
            Err(SystemError::option(
                "zoom",
                format!(
                    "limits must satisfy 0 < min <= 1 <= max, got [{}, {}]",
                    self.min, self.max
                ),
            ))
        }
    }

    fn clamp(&self, level: f64) -> f64 {
        level.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.5, max: 3.0 }
    }
}

/// Current zoom level. When disabled every operation is a no-op and the
/// level reads as 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomState {
    limits: ZoomLimits,
    level: f64,
    enabled: bool,
}

impl ZoomState {
    /// Enabled zoom at level 1.
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            limits,
            level: 1.0,
            enabled: true,
        }
    }

    /// Zoom that ignores every request.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(ZoomLimits::default())
        }
    }

    /// Effective zoom factor.
    pub fn level(&self) -> f64 {
        if self.enabled { self.level } else { 1.0 }
    }

    /// Zoom limits.
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Whether zoom requests are honored.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn zoom on or off. Disabling drops back to level 1.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.level = 1.0;
        }
    }

    /// Set the zoom, clamped to the limits. Returns the applied level.
    pub fn set(&mut self, level: f64) -> f64 {
        if self.enabled && level.is_finite() {
            self.level = self.limits.clamp(level);
        }
        self.level()
    }

    /// Zoom in one step.
    pub fn zoom_in(&mut self) -> f64 {
        self.set(self.level * ZOOM_STEP)
    }

    /// Zoom out one step.
    pub fn zoom_out(&mut self) -> f64 {
        self.set(self.level / ZOOM_STEP)
    }

    /// Back to level 1.
    pub fn reset(&mut self) -> f64 {
        self.set(1.0)
    }

    /// Body radius that keeps bodies legible when zoomed in.
    pub fn body_radius_px(&self, base_px: f64) -> f64 {
        (base_px / self.level()).max(MIN_BODY_RADIUS_PX)
    }

    /// Trail stroke width at the current zoom.
    pub fn trail_width_px(&self) -> f64 {
        (TRAIL_WIDTH_PX / self.level()).max(MIN_TRAIL_WIDTH_PX)
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_and_clamping() {
        let mut zoom = ZoomState::default();
        assert_eq!(zoom.zoom_in(), 1.5);
        assert_eq!(zoom.zoom_in(), 2.25);
        assert_eq!(zoom.zoom_in(), 3.0);
        assert_eq!(zoom.zoom_in(), 3.0);
        assert_eq!(zoom.reset(), 1.0);
        assert!((zoom.zoom_out() - 1.0 / 1.5).abs() < 1e-12);
        assert_eq!(zoom.zoom_out(), 0.5);
        assert_eq!(zoom.set(100.0), 3.0);
        assert_eq!(zoom.set(f64::NAN), 3.0);
    }

    #[test]
    fn test_disabled_zoom_is_inert() {
        let mut zoom = ZoomState::disabled();
        assert_eq!(zoom.zoom_in(), 1.0);
        assert_eq!(zoom.set(2.0), 1.0);
        assert_eq!(zoom.body_radius_px(6.0), 6.0);

        zoom.set_enabled(true);
        assert_eq!(zoom.set(2.0), 2.0);
        zoom.set_enabled(false);
        assert_eq!(zoom.level(), 1.0);
    }

    #[test]
    fn test_size_compensation() {
        let mut zoom = ZoomState::default();
        zoom.set(3.0);
        assert_eq!(zoom.body_radius_px(6.0), 2.0);
        assert_eq!(zoom.body_radius_px(2.0), 1.0);
        assert_eq!(zoom.trail_width_px(), 2.0 / 3.0);
        zoom.set(0.5);
        assert_eq!(zoom.trail_width_px(), 4.0);
    }

    #[test]
    fn test_limit_validation() {
        assert!(ZoomLimits::default().validate().is_ok());
        assert!(ZoomLimits { min: 0.0, max: 2.0 }.validate().is_err());
        assert!(ZoomLimits { min: 1.5, max: 2.0 }.validate().is_err());
        assert!(ZoomLimits { min: 0.5, max: 0.9 }.validate().is_err());
    }
}
