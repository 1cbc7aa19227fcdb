//! Physical-to-pixel scale mapping.
//!
//! Two independent affine maps: orbital distance (AU) to radius in pixels,
//! and body radius (R⊕) to rendered size in pixels. Both are recomputed
//! whenever the body set or the viewport changes.

use glam::DVec2;

use crate::orbit::OrbitalState;
use crate::system::{Body, OrbitalElements};

/// Domain spans below this are treated as a single point.
const DEGENERATE_SPAN: f64 = 1e-12;

/// Margin between the viewport edge and the outermost orbit, and the pixel
/// radius of the innermost orbit.
pub const DEFAULT_ORBIT_MARGIN_PX: f64 = 50.0;

/// Default rendered body size range in pixels.
pub const DEFAULT_SIZE_RANGE_PX: (f64, f64) = (3.0, 6.0);

/// Unclamped affine map from `domain` onto `range`.
///
/// A degenerate domain (both ends equal) maps every input to the midpoint
/// of the range instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale whose domain is the extent of `values`. Returns `None` for an
    /// empty iterator.
    pub fn from_extent(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Option<Self> {
        let (lo, hi) = values
            .into_iter()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        Some(Self::new((lo, hi), range))
    }

    /// Input domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Whether the domain collapses to a point.
    pub fn is_degenerate(&self) -> bool {
        (self.domain.1 - self.domain.0).abs() < DEGENERATE_SPAN
    }

    /// Map a domain value into the range.
    pub fn map(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return (r0 + r1) / 2.0;
        }
        let (d0, d1) = self.domain;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a range value back into the domain. A degenerate scale returns
    /// the domain's single value; a degenerate range returns the domain
    /// midpoint.
    pub fn invert(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return d0;
        }
        if (r1 - r0).abs() < DEGENERATE_SPAN {
            return (d0 + d1) / 2.0;
        }
        d0 + (value - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Viewport dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Default orbit radius range: `[50, min(w, h)/2 - 50]`.
    pub fn default_distance_range(&self) -> (f64, f64) {
        (
            DEFAULT_ORBIT_MARGIN_PX,
            self.width.min(self.height) / 2.0 - DEFAULT_ORBIT_MARGIN_PX,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Pixel-space ellipse of an orbit, with the star (focus) at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPath {
    /// Ellipse center; offset along -x so the focus sits at the origin.
    pub center: DVec2,
    /// Semi-major radius in pixels.
    pub radius_x: f64,
    /// Semi-minor radius in pixels.
    pub radius_y: f64,
}

/// The pair of scales used to lay out one system in one viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleMapper {
    distance: LinearScale,
    size: LinearScale,
}

impl ScaleMapper {
    /// Build both scales from the extents of `bodies`. Returns `None` when
    /// there are no bodies.
    pub fn for_bodies(
        bodies: &[Body],
        distance_range_px: (f64, f64),
        size_range_px: (f64, f64),
    ) -> Option<Self> {
        let distance = LinearScale::from_extent(
            bodies.iter().map(|b| b.elements.semi_major_axis_au),
            distance_range_px,
        )?;
        let size = LinearScale::from_extent(bodies.iter().map(|b| b.radius_earth), size_range_px)?;
        Some(Self { distance, size })
    }

    /// Build from explicit scales.
    pub fn new(distance: LinearScale, size: LinearScale) -> Self {
        Self { distance, size }
    }

    /// AU → pixel radius scale.
    pub fn distance(&self) -> &LinearScale {
        &self.distance
    }

    /// R⊕ → pixel size scale.
    pub fn size(&self) -> &LinearScale {
        &self.size
    }

    /// Orbital distance in AU to pixel radius.
    pub fn distance_px(&self, au: f64) -> f64 {
        self.distance.map(au)
    }

    /// Pixel radius back to AU, for pointer inspection.
    pub fn distance_au(&self, px: f64) -> f64 {
        self.distance.invert(px)
    }

    /// Body radius in Earth radii to rendered size in pixels.
    pub fn size_px(&self, radius_earth: f64) -> f64 {
        self.size.map(radius_earth)
    }

    /// Pixel radius of an instantaneous focus distance.
    ///
    /// Follows the distance scale inside and beyond its domain. Below the
    /// innermost semi-major axis (eccentric bodies near periapsis) the
    /// radius shrinks proportionally toward the star so it never crosses
    /// the origin.
    pub fn radial_px(&self, au: f64) -> f64 {
        let (d0, d1) = self.distance.domain();
        let inner = d0.min(d1);
        let px = if au < inner && inner > 0.0 {
            self.distance.map(inner) * au / inner
        } else {
            self.distance.map(au)
        };
        px.max(0.0)
    }

    /// Pixel position of an orbital state: the radial distance goes through
    /// [`radial_px`](Self::radial_px), the direction is kept.
    pub fn project(&self, state: &OrbitalState) -> DVec2 {
        state.direction() * self.radial_px(state.radius_au)
    }

    /// Orbit ellipse in pixel space.
    pub fn orbit_path(&self, elements: &OrbitalElements) -> OrbitPath {
        let e = elements.eccentricity;
        let radius_x = self.distance_px(elements.semi_major_axis_au);
        OrbitPath {
            center: DVec2::new(-radius_x * e, 0.0),
            radius_x,
            radius_y: radius_x * (1.0 - e * e).sqrt(),
        }
    }
}
