//! Orbital-mechanics and time-stepping engine for an animated orrery.
//!
//! Computes Keplerian positions for every body of a planetary system each
//! frame, the habitable zone of the host star, and the mapping from
//! physical units to viewport pixels. Rendering is left to the host, which
//! reads [`Simulation`] state back after each [`Simulation::tick`].

mod clock;
mod error;
pub mod kepler;
mod options;
pub mod orbit;
pub mod scale;
mod simulation;
pub mod stellar;
mod system;
mod trail;
mod zoom;

pub use clock::{BASE_RATE_DAYS_PER_FRAME, SimulationClock};
pub use error::{ElementFault, SystemError};
pub use kepler::{KeplerSolution, KeplerSolver, solve_kepler};
pub use options::{SimulationOptions, SimulationOptionsBuilder};
pub use orbit::{OrbitalState, position_of, state_at};
pub use scale::{LinearScale, OrbitPath, ScaleMapper, Viewport};
pub use simulation::{BodyFrame, HabitableZoneInfo, Simulation};
pub use stellar::{Habitability, HabitableZone, luminosity};
pub use system::{Body, Color, OrbitalElements, PlanetarySystem, SpectralClass, Star};
pub use trail::{DEFAULT_TRAIL_CAPACITY, SOLID_TRAIL_OPACITY, TrailBuffer, TrailSegment};
pub use zoom::{ZoomLimits, ZoomState};
