//! Built-in reference systems.
//!
//! Values are the published nominal parameters; bodies without a measured
//! eccentricity are treated as circular.

use orrery_core::{Body, Color, OrbitalElements, PlanetarySystem, Star};

/// Names accepted by [`lookup`].
pub const SYSTEM_NAMES: &[&str] = &["sol", "trappist-1", "proxima", "kepler-452"];

/// Find a built-in system by name, ignoring case.
pub fn lookup(name: &str) -> Option<PlanetarySystem> {
    match name.to_ascii_lowercase().as_str() {
        "sol" | "solar" | "sun" => Some(sol()),
        "trappist-1" | "trappist" => Some(trappist_1()),
        "proxima" | "proxima-centauri" => Some(proxima()),
        "kepler-452" => Some(kepler_452()),
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
fn planet(
    id: &str,
    name: &str,
    radius_earth: f64,
    semi_major_axis_au: f64,
    period_days: f64,
    eccentricity: f64,
    mass_earth: f64,
    temperature_k: f64,
    color: u32,
) -> Body {
    Body::new(
        id,
        name,
        radius_earth,
        OrbitalElements {
            semi_major_axis_au,
            period_days,
            eccentricity,
        },
    )
    .with_mass(mass_earth)
    .with_temperature(temperature_k)
    .with_color(Color::from_hex(color))
}

/// The Sun and its eight planets.
pub fn sol() -> PlanetarySystem {
    let star = Star::new("Sun", 1.0, 1.0, 5778.0).with_color(Color::from_hex(0xFFD700));
    PlanetarySystem::new(
        star,
        vec![
            planet("mercury", "Mercury", 0.383, 0.387, 87.97, 0.205, 0.055, 440.0, 0xB2B2B2),
            planet("venus", "Venus", 0.949, 0.723, 224.70, 0.007, 0.815, 737.0, 0xE1C699),
            planet("earth", "Earth", 1.0, 1.0, 365.25, 0.017, 1.0, 288.0, 0x3399FF),
            planet("mars", "Mars", 0.532, 1.524, 686.98, 0.093, 0.107, 210.0, 0xC1440E),
            planet("jupiter", "Jupiter", 11.21, 5.203, 4332.59, 0.049, 317.8, 165.0, 0xF4E2D8),
            planet("saturn", "Saturn", 9.45, 9.537, 10759.22, 0.057, 95.2, 134.0, 0xFFE5B4),
            planet("uranus", "Uranus", 4.01, 19.191, 30685.4, 0.046, 14.5, 76.0, 0xB0E0E6),
            planet("neptune", "Neptune", 3.88, 30.07, 60190.03, 0.010, 17.1, 72.0, 0x4166F5),
        ],
    )
}

/// Circular TRAPPIST-1 planet identified by its letter.
fn trappist_planet(
    letter: char,
    radius_earth: f64,
    semi_major_axis_au: f64,
    period_days: f64,
    mass_earth: f64,
    temperature_k: f64,
    color: u32,
) -> Body {
    let name = format!("TRAPPIST-1{letter}");
    planet(
        &name.to_ascii_lowercase(),
        &name,
        radius_earth,
        semi_major_axis_au,
        period_days,
        0.0,
        mass_earth,
        temperature_k,
        color,
    )
}

/// The ultracool dwarf TRAPPIST-1 and its seven rocky planets.
pub fn trappist_1() -> PlanetarySystem {
    let star = Star::new("TRAPPIST-1", 0.121, 0.089, 2511.0).with_color(Color::from_hex(0xFF6B35));
    PlanetarySystem::new(
        star,
        vec![
            trappist_planet('b', 1.116, 0.01154, 1.51087, 1.374, 400.0, 0xE74C3C),
            trappist_planet('c', 1.097, 0.01580, 2.42182, 1.308, 342.0, 0xF39C12),
            trappist_planet('d', 0.784, 0.02228, 4.04961, 0.388, 288.0, 0x27AE60),
            trappist_planet('e', 0.910, 0.02925, 6.09962, 0.692, 251.0, 0x3498DB),
            trappist_planet('f', 1.046, 0.03853, 9.20669, 1.039, 219.0, 0x9B59B6),
            trappist_planet('g', 1.148, 0.04688, 12.35294, 1.321, 198.0, 0xE67E22),
            trappist_planet('h', 0.773, 0.06193, 18.767, 0.326, 173.0, 0x95A5A6),
        ],
    )
}

/// Proxima Centauri and Proxima b.
pub fn proxima() -> PlanetarySystem {
    let star = Star::new("Proxima Centauri", 0.1542, 0.1221, 3042.0).with_spectral_type("M");
    PlanetarySystem::new(
        star,
        vec![planet("proxima-b", "Proxima b", 1.07, 0.0485, 11.2, 0.0, 1.17, 234.0, 0x4FA3FF)],
    )
}

/// Kepler-452 and its super-Earth.
pub fn kepler_452() -> PlanetarySystem {
    let star = Star::new("Kepler-452", 1.11, 1.04, 5757.0).with_spectral_type("G");
    PlanetarySystem::new(
        star,
        vec![planet("kepler-452b", "Kepler-452b", 1.6, 1.05, 385.0, 0.02, 5.0, 265.0, 0x7EC850)],
    )
}
