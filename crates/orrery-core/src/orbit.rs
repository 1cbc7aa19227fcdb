//! Keplerian orbital state: time → anomalies → focus-relative position.
//!
//! Positions are planar and expressed in AU with the star at the origin
//! (one focus of the ellipse) and periapsis on the +x axis.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::kepler::KeplerSolver;
use crate::system::{Body, OrbitalElements};

/// Instantaneous state of a body on its orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalState {
    /// Mean anomaly in `[0, 2π)`.
    pub mean_anomaly: f64,
    /// Eccentric anomaly in radians.
    pub eccentric_anomaly: f64,
    /// True anomaly in `[0, 2π]`, measured from periapsis.
    pub true_anomaly: f64,
    /// Distance from the focus in AU.
    pub radius_au: f64,
    /// Focus-relative position in AU.
    pub position_au: DVec2,
    /// Whether the Kepler solve reached tolerance.
    pub converged: bool,
}

impl OrbitalState {
    /// Unit vector from the focus toward the body.
    pub fn direction(&self) -> DVec2 {
        DVec2::new(self.true_anomaly.cos(), self.true_anomaly.sin())
    }
}

/// Mean anomaly at `time_days`, wrapped into `[0, 2π)`.
pub fn mean_anomaly(period_days: f64, time_days: f64) -> f64 {
    ((time_days / period_days) * TAU).rem_euclid(TAU)
}

/// True anomaly from the eccentric anomaly, using the half-angle form that
/// keeps the correct quadrant.
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// Distance from the focus at a given true anomaly: `a(1 - e²) / (1 + e·cos θ)`.
pub fn radius_at(elements: &OrbitalElements, true_anomaly: f64) -> f64 {
    let e = elements.eccentricity;
    elements.semi_major_axis_au * (1.0 - e * e) / (1.0 + e * true_anomaly.cos())
}

/// Full orbital state of `elements` at `time_days`.
pub fn state_at(elements: &OrbitalElements, time_days: f64, solver: &KeplerSolver) -> OrbitalState {
    let e = elements.eccentricity;
    let m = mean_anomaly(elements.period_days, time_days);
    let solution = solver.solve(m, e);
    let theta = true_anomaly(solution.eccentric_anomaly, e);
    let r = radius_at(elements, theta);

    OrbitalState {
        mean_anomaly: m,
        eccentric_anomaly: solution.eccentric_anomaly,
        true_anomaly: theta,
        radius_au: r,
        position_au: DVec2::new(r * theta.cos(), r * theta.sin()),
        converged: solution.converged,
    }
}

/// Focus-relative position of `body` at `time_days`, using the default solver.
pub fn position_of(body: &Body, time_days: f64) -> DVec2 {
    state_at(&body.elements, time_days, &KeplerSolver::default()).position_au
}
