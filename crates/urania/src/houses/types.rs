use crate::ephemeris::types::EclipticPosition;
use crate::error::ChartError;
use crate::math::norm360;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported house systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
}

/// House system name mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem)] = &[
    ("placidus", HouseSystem::Placidus),
    ("koch", HouseSystem::Koch),
    ("equal", HouseSystem::Equal),
    ("whole_sign", HouseSystem::WholeSign),
];

impl HouseSystem {
    pub fn name(&self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, sys)| sys == self)
            .map(|(name, _)| *name)
            .unwrap_or("placidus")
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        let key = if key == "wholesign" { "whole_sign".to_string() } else { key };
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, sys)| *sys)
            .ok_or_else(|| ChartError::UnknownHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
            })
    }
}

/// The four chart angles plus the quantities they were derived from.
///
/// Built once per chart and passed by value to every house system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Angles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
    /// Right ascension of the MC (local apparent sidereal time), degrees
    pub armc: f64,
    /// True obliquity used for the angles, degrees
    pub obliquity: f64,
    /// Geographic latitude, degrees
    pub latitude: f64,
}

/// Twelve cusps, the angles and the system that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCuspSet {
    pub system: HouseSystem,
    /// Cusp longitudes for houses 1..=12, index 0 is house 1
    pub cusps: [f64; 12],
    pub angles: Angles,
}

impl HouseCuspSet {
    pub(crate) fn from_longitudes(system: HouseSystem, cusps: [f64; 12], angles: Angles) -> Self {
        Self {
            system,
            cusps: cusps.map(norm360),
            angles,
        }
    }

    /// Cusp of house `house` (1..=12).
    pub fn cusp(&self, house: u8) -> Option<EclipticPosition> {
        let idx = usize::from(house).checked_sub(1)?;
        self.cusps.get(idx).map(|&lon| EclipticPosition::on_ecliptic(lon))
    }

    /// House (1..=12) containing an ecliptic longitude.
    pub fn house_of(&self, longitude: f64) -> u8 {
        let lon = norm360(longitude);
        for i in 0..12 {
            let start = self.cusps[i];
            let span = norm360(self.cusps[(i + 1) % 12] - start);
            if norm360(lon - start) < span {
                return i as u8 + 1;
            }
        }
        1
    }
}
