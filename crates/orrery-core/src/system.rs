//! Star and body records for one planetary system, plus load-time validation.

use std::collections::HashSet;

use crate::error::{ElementFault, SystemError};

/// An sRGB color, stored as plain data so nothing downstream has to look
/// colors up from a presentation environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Fallback star color when neither a color nor a spectral type is given.
    pub const DEFAULT_STAR: Color = Color::from_hex(0xFFF5B7);
    /// Star color for a spectral designation outside O/B/A/F/G/K/M.
    pub const UNKNOWN_SPECTRAL: Color = Color::from_hex(0xFFFFFF);
    /// Fallback body color.
    pub const DEFAULT_BODY: Color = Color::from_hex(0x4FACFE);

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Linear `[0, 1]` channels, convenient for GPU-side consumers.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Harvard spectral classification of a star.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpectralClass {
    /// O-type: blue.
    O,
    /// B-type: blue-white.
    B,
    /// A-type: white.
    A,
    /// F-type: yellow-white.
    F,
    /// G-type: yellow, Sol-like.
    G,
    /// K-type: orange.
    K,
    /// M-type: red dwarf.
    M,
}

impl SpectralClass {
    /// Parse the class from a designation such as `"G2V"` or `"m"`. Only the
    /// leading letter is significant.
    pub fn from_designation(designation: &str) -> Option<Self> {
        match designation.chars().next()?.to_ascii_uppercase() {
            'O' => Some(Self::O),
            'B' => Some(Self::B),
            'A' => Some(Self::A),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'K' => Some(Self::K),
            'M' => Some(Self::M),
            _ => None,
        }
    }

    /// Display color for stars of this class.
    pub fn color(&self) -> Color {
        match self {
            SpectralClass::O => Color::from_hex(0x6B8EFF),
            SpectralClass::B => Color::from_hex(0xA1C8FF),
            SpectralClass::A => Color::from_hex(0xFFFFFF),
            SpectralClass::F => Color::from_hex(0xFFF9EC),
            SpectralClass::G => Color::from_hex(0xFFFA42),
            SpectralClass::K => Color::from_hex(0xFF9E40),
            SpectralClass::M => Color::from_hex(0xFF694D),
        }
    }
}

/// Host star of a system.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// Display name.
    pub name: String,
    /// Radius in solar radii.
    pub radius_solar: f64,
    /// Mass in solar masses.
    pub mass_solar: f64,
    /// Effective temperature in Kelvin.
    pub temperature_k: f64,
    /// Display color.
    pub color: Color,
    /// Spectral class, when known.
    pub spectral_class: Option<SpectralClass>,
}

impl Star {
    /// Create a star with the default color and no spectral class.
    pub fn new(
        name: impl Into<String>,
        radius_solar: f64,
        mass_solar: f64,
        temperature_k: f64,
    ) -> Self {
        Self {
            name: name.into(),
            radius_solar,
            mass_solar,
            temperature_k,
            color: Color::DEFAULT_STAR,
            spectral_class: None,
        }
    }

    /// Set an explicit color. A spectral class set later takes precedence.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the spectral class from a designation. Any non-empty designation
    /// resolves the display color; unrecognised classes render white. An
    /// empty designation leaves the star untouched.
    pub fn with_spectral_type(mut self, designation: &str) -> Self {
        if designation.is_empty() {
            return self;
        }
        self.spectral_class = SpectralClass::from_designation(designation);
        self.color = self
            .spectral_class
            .map_or(Color::UNKNOWN_SPECTRAL, |class| class.color());
        self
    }

    /// Reject non-positive or non-finite radius and temperature.
    pub fn validate(&self) -> Result<(), SystemError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if positive(self.radius_solar) && positive(self.temperature_k) {
            Ok(())
        } else {
            Err(SystemError::InvalidStellarParameters {
                star: self.name.clone(),
                radius: self.radius_solar,
                temperature: self.temperature_k,
            })
        }
    }
}

/// Planar Keplerian elements, all the engine needs to place a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis in AU.
    pub semi_major_axis_au: f64,
    /// Orbital period in days.
    pub period_days: f64,
    /// Eccentricity in `[0, 1)`. 0 = circular orbit.
    pub eccentricity: f64,
}

impl OrbitalElements {
    /// Elements for a circular orbit.
    pub fn circular(semi_major_axis_au: f64, period_days: f64) -> Self {
        Self {
            semi_major_axis_au,
            period_days,
            eccentricity: 0.0,
        }
    }

    /// Semi-minor axis `a·√(1 - e²)` in AU.
    pub fn semi_minor_axis_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Closest approach to the focus, `a(1 - e)`.
    pub fn periapsis_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the focus, `a(1 + e)`.
    pub fn apoapsis_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 + self.eccentricity)
    }

    /// Check the elements describe a closed orbit. `body` names the owner in
    /// the error.
    pub fn validate(&self, body: &str) -> Result<(), SystemError> {
        let fail = |fault, value| SystemError::InvalidOrbitalElements {
            body: body.to_string(),
            fault,
            value,
        };
        if !(self.semi_major_axis_au.is_finite() && self.semi_major_axis_au > 0.0) {
            return Err(fail(ElementFault::SemiMajorAxis, self.semi_major_axis_au));
        }
        if !(self.period_days.is_finite() && self.period_days > 0.0) {
            return Err(fail(ElementFault::Period, self.period_days));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(fail(ElementFault::Eccentricity, self.eccentricity));
        }
        Ok(())
    }
}

/// A planet or other orbiting body.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Unique id within the system.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Radius in Earth radii.
    pub radius_earth: f64,
    /// Orbit.
    pub elements: OrbitalElements,
    /// Mass in Earth masses, when known.
    pub mass_earth: Option<f64>,
    /// Equilibrium temperature in Kelvin, when known.
    pub temperature_k: Option<f64>,
    /// Display color.
    pub color: Color,
}

impl Body {
    /// Create a body with the default color and no optional data.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        radius_earth: f64,
        elements: OrbitalElements,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            radius_earth,
            elements,
            mass_earth: None,
            temperature_k: None,
            color: Color::DEFAULT_BODY,
        }
    }

    /// Set the mass in Earth masses.
    pub fn with_mass(mut self, mass_earth: f64) -> Self {
        self.mass_earth = Some(mass_earth);
        self
    }

    /// Set the equilibrium temperature in Kelvin.
    pub fn with_temperature(mut self, temperature_k: f64) -> Self {
        self.temperature_k = Some(temperature_k);
        self
    }

    /// Set the display color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Validate radius and orbital elements.
    pub fn validate(&self) -> Result<(), SystemError> {
        if !(self.radius_earth.is_finite() && self.radius_earth > 0.0) {
            return Err(SystemError::InvalidBodyRadius {
                body: self.id.clone(),
                radius: self.radius_earth,
            });
        }
        self.elements.validate(&self.id)
    }
}

/// A star with its bodies. Read-only for the lifetime of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetarySystem {
    /// Host star.
    pub star: Star,
    /// Orbiting bodies in display order.
    pub bodies: Vec<Body>,
}

impl PlanetarySystem {
    /// Bundle a star with its bodies. No validation happens here; see
    /// [`validate`](Self::validate).
    pub fn new(star: Star, bodies: Vec<Body>) -> Self {
        Self { star, bodies }
    }

    /// Validate the star, every body, and id uniqueness. The first problem
    /// found is returned.
    pub fn validate(&self) -> Result<(), SystemError> {
        self.star.validate()?;
        if self.bodies.is_empty() {
            return Err(SystemError::EmptySystem(self.star.name.clone()));
        }
        let mut seen = HashSet::with_capacity(self.bodies.len());
        for body in &self.bodies {
            body.validate()?;
            if !seen.insert(body.id.as_str()) {
                return Err(SystemError::DuplicateBodyId(body.id.clone()));
            }
        }
        Ok(())
    }

    /// Look up a body by id.
    pub fn body(&self, id: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }
}
