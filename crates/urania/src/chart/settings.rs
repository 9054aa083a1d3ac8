use crate::aspects::AspectTable;
use crate::ephemeris::types::{Body, EphemerisMode};
use crate::houses::HouseSystem;
use serde::{Deserialize, Serialize};

/// Defaults applied when a request leaves a field out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    /// Bodies computed when the request names none, in output order
    pub bodies: Vec<Body>,
    pub ephemeris: EphemerisMode,
    /// Apply nutation and aberration to closed-form positions
    pub apparent: bool,
    pub aspects: AspectTable,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
            bodies: Body::ALL.to_vec(),
            ephemeris: EphemerisMode::Keplerian,
            apparent: true,
            aspects: AspectTable::default(),
        }
    }
}
