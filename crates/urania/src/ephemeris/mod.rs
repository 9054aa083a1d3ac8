pub mod adapter;
pub mod ingest;
pub mod kepler;
pub mod lunar;
pub mod solar;
pub mod types;

pub use adapter::EphemerisAdapter;
pub use ingest::{equatorial_to_ecliptic, parse_horizons, EphemerisIngestor, EphemerisRow};
pub use kepler::{solve_kepler, KeplerSolution, KeplerianPlanetEngine, OrbitalElements};
pub use lunar::LunarEngine;
pub use solar::SolarEngine;
pub use types::*;
