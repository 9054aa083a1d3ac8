use crate::ephemeris::types::Body;
use crate::error::Result;
use crate::houses::HouseSystem;
use crate::time::{parse_date, parse_time, GeoLocation};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A chart request as it arrives from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`, 24h local civil time
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    /// UTC offset or IANA zone name; when absent the engine's resolver decides
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub bodies: Option<Vec<String>>,
    #[serde(default)]
    pub house_system: Option<String>,
}

/// A request whose fields have all been parsed and range-checked
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub local: NaiveDateTime,
    pub location: GeoLocation,
    pub bodies: Option<Vec<Body>>,
    pub house_system: Option<HouseSystem>,
}

impl ChartRequest {
    pub fn new(date: &str, time: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            latitude,
            longitude,
            zone: None,
            bodies: None,
            house_system: None,
        }
    }

    pub fn with_zone(mut self, zone: &str) -> Self {
        self.zone = Some(zone.to_string());
        self
    }

    pub fn with_bodies<S: AsRef<str>>(mut self, bodies: &[S]) -> Self {
        self.bodies = Some(bodies.iter().map(|b| b.as_ref().to_string()).collect());
        self
    }

    pub fn with_house_system(mut self, system: &str) -> Self {
        self.house_system = Some(system.to_string());
        self
    }

    /// Parse and range-check every field before any computation runs.
    pub fn validate(&self) -> Result<ValidatedRequest> {
        let location = GeoLocation::new(self.latitude, self.longitude)?;
        let date = parse_date(&self.date)?;
        let time = parse_time(&self.time)?;
        let bodies = self
            .bodies
            .as_ref()
            .map(|names| names.iter().map(|n| n.parse::<Body>()).collect::<Result<Vec<_>>>())
            .transpose()?;
        let house_system = self
            .house_system
            .as_deref()
            .map(str::parse::<HouseSystem>)
            .transpose()?;

        Ok(ValidatedRequest {
            local: date.and_time(time),
            location,
            bodies,
            house_system,
        })
    }
}
