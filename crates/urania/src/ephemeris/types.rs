use crate::error::ChartError;
use crate::math::norm360;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bodies the engine can place on a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
}

impl Body {
    pub const ALL: [Body; 12] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
        Body::SouthNode,
    ];

    /// Lowercase identifier, e.g. `north_node`.
    pub fn id(&self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::NorthNode => "north_node",
            Body::SouthNode => "south_node",
        }
    }

    /// Display name, e.g. `North Node`.
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
        }
    }

    /// Bodies that orbit the Sun and go through the Keplerian engine.
    pub fn is_planet(&self) -> bool {
        !matches!(
            self,
            Body::Sun | Body::Moon | Body::NorthNode | Body::SouthNode
        )
    }

    /// Whether two bodies are always exactly opposite (the lunar nodes).
    pub fn is_antipode_of(&self, other: Body) -> bool {
        matches!(
            (self, other),
            (Body::NorthNode, Body::SouthNode) | (Body::SouthNode, Body::NorthNode)
        )
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.id().replace('_', "") == key)
            .ok_or_else(|| ChartError::UnknownBody {
                name: s.to_string(),
                valid: Body::ALL.iter().map(|b| b.id().to_string()).collect(),
            })
    }
}

/// Ecliptic-of-date coordinates in degrees. Longitude is always in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    pub longitude: f64,
    pub latitude: f64,
}

impl EclipticPosition {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: norm360(longitude),
            latitude,
        }
    }

    pub fn on_ecliptic(longitude: f64) -> Self {
        Self::new(longitude, 0.0)
    }

    /// The diametrically opposite point on the ecliptic.
    pub fn antipode(&self) -> Self {
        Self::new(self.longitude + 180.0, -self.latitude)
    }
}

/// Position of one body on the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub body: Body,
    pub position: EclipticPosition,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    /// Whether the body is retrograde
    pub retrograde: bool,
}

/// Named lunar phase, bucketed by Sun–Moon elongation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonPhase {
    #[serde(rename = "New Moon")]
    New,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    Full,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl MoonPhase {
    /// Bucket a signed elongation (Moon − Sun, in (-180, 180]).
    pub fn from_elongation(elongation: f64) -> Self {
        let waxing = elongation >= 0.0;
        let abs = elongation.abs();
        match (abs, waxing) {
            (a, _) if a < 22.5 => MoonPhase::New,
            (a, true) if a < 67.5 => MoonPhase::WaxingCrescent,
            (a, false) if a < 67.5 => MoonPhase::WaningCrescent,
            (a, true) if a < 112.5 => MoonPhase::FirstQuarter,
            (a, false) if a < 112.5 => MoonPhase::LastQuarter,
            (a, true) if a < 157.5 => MoonPhase::WaxingGibbous,
            (a, false) if a < 157.5 => MoonPhase::WaningGibbous,
            _ => MoonPhase::Full,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lunar phase derived from the Sun–Moon elongation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseInfo {
    /// Moon − Sun longitude in (-180, 180]; positive while waxing
    pub elongation: f64,
    /// Illuminated fraction in [0, 1]
    pub phase: f64,
    /// Illumination percentage in [0, 100]
    pub illumination: f64,
    pub name: MoonPhase,
}

/// Where planetary positions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EphemerisMode {
    /// Closed-form series and Keplerian propagation
    #[default]
    Keplerian,
    /// Externally supplied RA/Dec rows, falling back to Keplerian per body
    Ingested,
}

impl FromStr for EphemerisMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keplerian" | "kepler" | "builtin" => Ok(EphemerisMode::Keplerian),
            "ingested" | "external" | "horizons" => Ok(EphemerisMode::Ingested),
            other => Err(ChartError::invalid(format!(
                "unknown ephemeris mode '{other}' (expected keplerian or ingested)"
            ))),
        }
    }
}

/// Settings for ephemeris calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSettings {
    pub mode: EphemerisMode,
    /// Bodies to compute, in output order
    pub include_objects: Vec<Body>,
    /// Apply aberration and nutation to closed-form positions
    pub apparent: bool,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            mode: EphemerisMode::Keplerian,
            include_objects: Body::ALL.to_vec(),
            apparent: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_names_parse_loosely() {
        assert_eq!("Sun".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!("north_node".parse::<Body>().unwrap(), Body::NorthNode);
        assert_eq!("North Node".parse::<Body>().unwrap(), Body::NorthNode);
        assert!(matches!(
            "vulcan".parse::<Body>(),
            Err(ChartError::UnknownBody { .. })
        ));
    }

    #[test]
    fn phase_buckets() {
        assert_eq!(MoonPhase::from_elongation(0.0), MoonPhase::New);
        assert_eq!(MoonPhase::from_elongation(45.0), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_elongation(-45.0), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::from_elongation(90.0), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_elongation(-90.0), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_elongation(135.0), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::from_elongation(-135.0), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::from_elongation(180.0), MoonPhase::Full);
    }

    #[test]
    fn antipode_is_normalized() {
        let p = EclipticPosition::new(270.0, 1.5).antipode();
        assert_eq!(p.longitude, 90.0);
        assert_eq!(p.latitude, -1.5);
    }
}
