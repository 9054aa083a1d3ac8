use crate::error::{ChartError, Result};
use crate::time::zone::ZoneResolver;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive
    pub lat: f64,
    /// Longitude in degrees, east positive
    pub lon: f64,
}

impl GeoLocation {
    /// Validated constructor: latitude must lie in [-90, 90], longitude in [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ChartError::invalid(format!(
                "latitude {lat} is outside [-90, 90]"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ChartError::invalid(format!(
                "longitude {lon} is outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lon })
    }
}

/// A birth moment: civil date/time at a place, resolved once to UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct Moment {
    local: NaiveDateTime,
    utc: DateTime<Utc>,
    location: GeoLocation,
}

impl Moment {
    /// Resolve a local civil time at `location` through a zone resolver.
    pub fn resolve(
        local: NaiveDateTime,
        location: GeoLocation,
        zone: &dyn ZoneResolver,
    ) -> Result<Self> {
        let location = GeoLocation::new(location.lat, location.lon)?;
        let utc = zone.to_utc(local, &location)?;
        Ok(Self {
            local,
            utc,
            location,
        })
    }

    /// Build a moment from an instant that is already in UTC.
    pub fn from_utc(utc: DateTime<Utc>, location: GeoLocation) -> Result<Self> {
        let location = GeoLocation::new(location.lat, location.lon)?;
        Ok(Self {
            local: utc.naive_utc(),
            utc,
            location,
        })
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| ChartError::invalid(format!("date '{date}' is not YYYY-MM-DD: {e}")))
}

/// Parse a 24h `HH:MM` or `HH:MM:SS` time.
pub fn parse_time(time: &str) -> Result<NaiveTime> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|e| ChartError::invalid(format!("time '{time}' is not HH:MM (24h): {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::zone::FixedZone;

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(GeoLocation::new(90.5, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -180.5).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn parses_request_date_and_time() {
        assert!(parse_date("1984-08-18").is_ok());
        assert!(parse_date("1984-13-01").is_err());
        assert!(parse_date("18/08/1984").is_err());
        assert_eq!(parse_time("08:03").unwrap(), NaiveTime::from_hms_opt(8, 3, 0).unwrap());
        assert_eq!(parse_time("23:59:30").unwrap(), NaiveTime::from_hms_opt(23, 59, 30).unwrap());
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("8h03").is_err());
    }

    #[test]
    fn resolve_applies_offset() {
        let local = parse_date("2000-01-01")
            .unwrap()
            .and_time(parse_time("12:00").unwrap());
        let loc = GeoLocation::new(0.0, 15.0).unwrap();
        let zone = FixedZone::from_hours(1.0).unwrap();
        let moment = Moment::resolve(local, loc, &zone).unwrap();
        assert_eq!(moment.utc().naive_utc().time(), NaiveTime::from_hms_opt(11, 0, 0).unwrap());
        assert_eq!(moment.local(), local);
    }
}
