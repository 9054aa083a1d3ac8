use crate::aspects::AspectRecord;
use crate::ephemeris::types::{PhaseInfo, PlanetPosition};
use crate::houses::HouseCuspSet;
use crate::time::TimeFrame;
use crate::zodiac::{OrbDms, ZodiacPosition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A longitude together with its zodiac projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPoint {
    pub longitude: f64,
    #[serde(flatten)]
    pub zodiac: ZodiacPosition,
}

impl From<f64> for ZodiacPoint {
    fn from(longitude: f64) -> Self {
        Self {
            longitude,
            zodiac: ZodiacPosition::from_longitude(longitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyRecord {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub speed: f64,
    pub retrograde: bool,
    pub zodiac: ZodiacPosition,
}

impl From<&PlanetPosition> for BodyRecord {
    fn from(p: &PlanetPosition) -> Self {
        Self {
            name: p.body.name().to_string(),
            longitude: p.position.longitude,
            latitude: p.position.latitude,
            speed: p.speed_lon,
            retrograde: p.retrograde,
            zodiac: ZodiacPosition::from_longitude(p.position.longitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnglesRecord {
    pub ascendant: ZodiacPoint,
    pub midheaven: ZodiacPoint,
    pub descendant: ZodiacPoint,
    pub imum_coeli: ZodiacPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCuspRecord {
    pub house: u8,
    #[serde(flatten)]
    pub point: ZodiacPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousesRecord {
    pub system: String,
    pub cusps: Vec<HouseCuspRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectOutput {
    pub body_a: String,
    pub body_b: String,
    pub aspect_name: String,
    pub exact_angle: f64,
    pub orb: OrbDms,
}

impl From<&AspectRecord> for AspectOutput {
    fn from(a: &AspectRecord) -> Self {
        Self {
            body_a: a.body_a.name().to_string(),
            body_b: a.body_b.name().to_string(),
            aspect_name: a.aspect_name.clone(),
            exact_angle: a.exact_angle,
            orb: OrbDms::from_orb(a.orb),
        }
    }
}

/// Time quantities reported alongside a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRecord {
    pub utc: DateTime<Utc>,
    pub julian_day_ut: f64,
    pub julian_day_tt: f64,
    pub delta_t_seconds: f64,
    pub true_obliquity: f64,
    pub local_sidereal_time: f64,
}

/// The complete response for one chart request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    pub time: TimeRecord,
    pub bodies: Vec<BodyRecord>,
    pub angles: AnglesRecord,
    pub houses: HousesRecord,
    pub aspects: Vec<AspectOutput>,
    pub moon_phase: PhaseInfo,
}

impl ChartRecord {
    pub fn assemble(
        utc: DateTime<Utc>,
        frame: &TimeFrame,
        positions: &[PlanetPosition],
        houses: &HouseCuspSet,
        aspects: &[AspectRecord],
        moon_phase: PhaseInfo,
    ) -> Self {
        let a = &houses.angles;
        Self {
            time: TimeRecord {
                utc,
                julian_day_ut: frame.julian_day_ut,
                julian_day_tt: frame.julian_day_tt,
                delta_t_seconds: frame.delta_t_seconds,
                true_obliquity: frame.true_obliquity,
                local_sidereal_time: frame.local_sidereal_time,
            },
            bodies: positions.iter().map(BodyRecord::from).collect(),
            angles: AnglesRecord {
                ascendant: a.ascendant.into(),
                midheaven: a.midheaven.into(),
                descendant: a.descendant.into(),
                imum_coeli: a.imum_coeli.into(),
            },
            houses: HousesRecord {
                system: houses.system.name().to_string(),
                cusps: houses
                    .cusps
                    .iter()
                    .enumerate()
                    .map(|(i, &lon)| HouseCuspRecord {
                        house: i as u8 + 1,
                        point: lon.into(),
                    })
                    .collect(),
            },
            aspects: aspects.iter().map(AspectOutput::from).collect(),
            moon_phase,
        }
    }

    pub fn body(&self, name: &str) -> Option<&BodyRecord> {
        self.bodies.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
