//! Load-time validation errors.
//!
//! Everything here is reported synchronously before a session starts
//! ticking. Numerical trouble during a tick (solver non-convergence) is not
//! an error; see [`crate::kepler::KeplerSolution::converged`].

/// Which orbital element failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementFault {
    /// Semi-major axis is zero, negative, or not finite.
    SemiMajorAxis,
    /// Orbital period is zero, negative, or not finite.
    Period,
    /// Eccentricity is outside `[0, 1)`.
    Eccentricity,
}

impl std::fmt::Display for ElementFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SemiMajorAxis => write!(f, "semi-major axis must be > 0"),
            Self::Period => write!(f, "orbital period must be > 0"),
            Self::Eccentricity => write!(f, "eccentricity must lie in [0, 1)"),
        }
    }
}

/// Errors raised while validating a planetary system or session options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SystemError {
    /// A body's `(a, e, P)` cannot describe a closed orbit.
    #[error("invalid orbital elements for `{body}`: {fault} (got {value})")]
    InvalidOrbitalElements {
        /// Id of the offending body.
        body: String,
        /// The element that failed.
        fault: ElementFault,
        /// The rejected value.
        value: f64,
    },

    /// Stellar radius or temperature is not strictly positive.
    #[error(
        "invalid stellar parameters for `{star}`: radius={radius} R☉, temperature={temperature} K"
    )]
    InvalidStellarParameters {
        /// Star name.
        star: String,
        /// Radius in solar radii.
        radius: f64,
        /// Effective temperature in Kelvin.
        temperature: f64,
    },

    /// A body radius is not strictly positive.
    #[error("invalid radius for `{body}`: {radius} R⊕")]
    InvalidBodyRadius {
        /// Id of the offending body.
        body: String,
        /// The rejected radius in Earth radii.
        radius: f64,
    },

    /// Two bodies share the same id.
    #[error("duplicate body id `{0}`")]
    DuplicateBodyId(String),

    /// The system has no bodies to lay out.
    #[error("system `{0}` has no bodies")]
    EmptySystem(String),

    /// A session option or control-surface argument is out of range.
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption {
        /// Option name as it appears in the configuration.
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

impl SystemError {
    pub(crate) fn option(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}
