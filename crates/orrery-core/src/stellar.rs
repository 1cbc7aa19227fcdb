//! Stellar luminosity and the habitable zone it implies.

use crate::error::SystemError;
use crate::system::Star;

/// Stefan-Boltzmann constant, W·m⁻²·K⁻⁴.
pub const STEFAN_BOLTZMANN: f64 = 5.670374419e-8;

/// Nominal solar radius in meters (IAU 2015).
pub const SOLAR_RADIUS_M: f64 = 6.957e8;

/// Nominal solar luminosity in watts (IAU 2015).
pub const SOLAR_LUMINOSITY_W: f64 = 3.828e26;

/// Inner habitable-zone edge at 1 L☉, in AU.
pub const HZ_INNER_COEFFICIENT: f64 = 0.75;

/// Outer habitable-zone edge at 1 L☉, in AU.
pub const HZ_OUTER_COEFFICIENT: f64 = 1.77;

/// Luminosity in solar luminosities, `L = 4πR²σT⁴ / L☉`.
///
/// # Errors
///
/// [`SystemError::InvalidStellarParameters`] if either input is not a
/// positive finite number.
pub fn luminosity(radius_solar: f64, temperature_k: f64) -> Result<f64, SystemError> {
    Star::new("", radius_solar, 1.0, temperature_k).validate()?;
    Ok(luminosity_unchecked(radius_solar, temperature_k))
}

fn luminosity_unchecked(radius_solar: f64, temperature_k: f64) -> f64 {
    let radius_m = radius_solar * SOLAR_RADIUS_M;
    let area = 4.0 * std::f64::consts::PI * radius_m.powi(2);
    let watts = area * STEFAN_BOLTZMANN * temperature_k.powi(4);
    watts / SOLAR_LUMINOSITY_W
}

/// Where a body sits relative to the habitable zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Habitability {
    /// Inside the inner edge.
    TooHot,
    /// Between the edges, inclusive.
    Habitable,
    /// Beyond the outer edge.
    TooCold,
}

impl Habitability {
    /// Short label for tooltips and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Habitability::TooHot => "too close to the star",
            Habitability::Habitable => "in the habitable zone",
            Habitability::TooCold => "too far from the star",
        }
    }
}

/// Conservative habitable-zone annulus around a star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HabitableZone {
    /// Inner edge in AU.
    pub inner_au: f64,
    /// Outer edge in AU.
    pub outer_au: f64,
    /// Stellar luminosity in L☉.
    pub luminosity: f64,
}

impl HabitableZone {
    /// Zone for a star of the given radius (R☉) and temperature (K).
    pub fn new(radius_solar: f64, temperature_k: f64) -> Result<Self, SystemError> {
        Ok(Self::from_luminosity(luminosity(radius_solar, temperature_k)?))
    }

    /// Zone for `star`, naming it in the error on bad input.
    pub fn for_star(star: &Star) -> Result<Self, SystemError> {
        star.validate()?;
        Ok(Self::from_luminosity(luminosity_unchecked(
            star.radius_solar,
            star.temperature_k,
        )))
    }

    fn from_luminosity(luminosity: f64) -> Self {
        let root = luminosity.sqrt();
        Self {
            inner_au: HZ_INNER_COEFFICIENT * root,
            outer_au: HZ_OUTER_COEFFICIENT * root,
            luminosity,
        }
    }

    /// Classify an orbit by its nominal semi-major axis.
    pub fn classify(&self, semi_major_axis_au: f64) -> Habitability {
        if semi_major_axis_au < self.inner_au {
            Habitability::TooHot
        } else if semi_major_axis_au > self.outer_au {
            Habitability::TooCold
        } else {
            Habitability::Habitable
        }
    }

    /// `inner ≤ a ≤ outer`.
    pub fn contains(&self, semi_major_axis_au: f64) -> bool {
        self.classify(semi_major_axis_au) == Habitability::Habitable
    }

    /// Width of the annulus in AU.
    pub fn width_au(&self) -> f64 {
        self.outer_au - self.inner_au
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_like_star() {
        let zone = HabitableZone::new(1.0, 5778.0).unwrap();
        assert!((zone.luminosity - 1.0).abs() < 0.01, "L = {}", zone.luminosity);
        assert!((zone.inner_au - 0.75).abs() < 0.01, "inner = {}", zone.inner_au);
        assert!((zone.outer_au - 1.77).abs() < 0.01, "outer = {}", zone.outer_au);
    }

    #[test]
    fn test_red_dwarf_zone_is_close_in() {
        // TRAPPIST-1
        let zone = HabitableZone::new(0.121, 2511.0).unwrap();
        assert!(zone.luminosity < 0.001);
        assert!(zone.inner_au < 0.03);
        assert!(zone.contains(0.02925), "TRAPPIST-1e should be habitable");
        assert_eq!(zone.classify(0.01154), Habitability::TooHot);
        assert_eq!(zone.classify(0.06193), Habitability::TooCold);
    }

    #[test]
    fn test_zone_scales_with_sqrt_luminosity() {
        let one = HabitableZone::new(1.0, 5778.0).unwrap();
        // Doubling the radius quadruples L and doubles both edges.
        let big = HabitableZone::new(2.0, 5778.0).unwrap();
        assert!((big.luminosity / one.luminosity - 4.0).abs() < 1e-9);
        assert!((big.inner_au / one.inner_au - 2.0).abs() < 1e-9);
        assert!((big.outer_au / one.outer_au - 2.0).abs() < 1e-9);
        assert!(big.inner_au < big.outer_au);
    }

    #[test]
    fn test_edges_are_inclusive() {
        let zone = HabitableZone::new(1.0, 5778.0).unwrap();
        assert!(zone.contains(zone.inner_au));
        assert!(zone.contains(zone.outer_au));
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(matches!(
            luminosity(0.0, 5778.0),
            Err(SystemError::InvalidStellarParameters { .. })
        ));
        assert!(HabitableZone::new(1.0, -10.0).is_err());
        assert!(HabitableZone::new(f64::INFINITY, 5000.0).is_err());
    }

    #[test]
    fn test_for_star_names_star_in_error() {
        let star = Star::new("Broken", 1.0, 1.0, 0.0);
        match HabitableZone::for_star(&star) {
            Err(SystemError::InvalidStellarParameters { star, .. }) => assert_eq!(star, "Broken"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
