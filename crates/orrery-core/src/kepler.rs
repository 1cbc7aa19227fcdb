//! Newton-Raphson solver for Kepler's equation `E - e·sin(E) = M`.

/// Default convergence tolerance on the Kepler residual.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default cap on Newton updates.
pub const DEFAULT_MAX_ITERATIONS: u32 = 20;

/// Result of a single solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly in radians. Best available estimate even when
    /// `converged` is false.
    pub eccentric_anomaly: f64,
    /// Number of Newton updates applied.
    pub iterations: u32,
    /// `|E - e·sin(E) - M|` at the returned `E`.
    pub residual: f64,
    /// Whether `residual` dropped below the tolerance.
    pub converged: bool,
}

/// Iterative solver with a fixed tolerance and iteration budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolver {
    tolerance: f64,
    max_iterations: u32,
}

impl KeplerSolver {
    /// Create a solver. Callers are expected to have validated
    /// `tolerance > 0` and `max_iterations > 0` (see
    /// [`SimulationOptionsBuilder`](crate::SimulationOptionsBuilder)).
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Residual tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Maximum number of Newton updates.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Solve for the eccentric anomaly, starting from `E₀ = M`.
    ///
    /// Never fails: if the budget runs out the last iterate is returned with
    /// `converged == false`.
    pub fn solve(&self, mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
        let mut e_anom = mean_anomaly;
        let mut iterations = 0;

        loop {
            let residual = kepler_residual(e_anom, eccentricity, mean_anomaly);
            if residual.abs() < self.tolerance {
                return KeplerSolution {
                    eccentric_anomaly: e_anom,
                    iterations,
                    residual: residual.abs(),
                    converged: true,
                };
            }
            if iterations >= self.max_iterations {
                return KeplerSolution {
                    eccentric_anomaly: e_anom,
                    iterations,
                    residual: residual.abs(),
                    converged: false,
                };
            }
            let derivative = 1.0 - eccentricity * e_anom.cos();
            e_anom -= residual / derivative;
            iterations += 1;
        }
    }
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

/// Solve with the default tolerance and iteration budget, returning only `E`.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    KeplerSolver::default()
        .solve(mean_anomaly, eccentricity)
        .eccentric_anomaly
}

#[inline]
fn kepler_residual(e_anom: f64, eccentricity: f64, mean_anomaly: f64) -> f64 {
    e_anom - eccentricity * e_anom.sin() - mean_anomaly
}
