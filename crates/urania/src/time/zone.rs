//! Local civil time → UTC resolution.
//!
//! Resolving a place to its time zone is an external concern; the engine only
//! defines the [`ZoneResolver`] seam and ships the two resolvers that need no
//! lookup service: an explicit UTC offset and a named IANA zone.

use crate::error::{ChartError, Result};
use crate::time::moment::GeoLocation;
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Converts a local civil time at a location into UTC.
pub trait ZoneResolver: Send + Sync {
    fn to_utc(&self, local: NaiveDateTime, location: &GeoLocation) -> Result<DateTime<Utc>>;
}

fn location_error(local: NaiveDateTime, location: &GeoLocation, message: String) -> ChartError {
    ChartError::LocationTime {
        local: local.to_string(),
        latitude: location.lat,
        longitude: location.lon,
        message,
    }
}

/// Pick the earlier instant for ambiguous (DST fall-back) local times.
fn pick_instant<T: TimeZone>(
    result: LocalResult<DateTime<T>>,
    local: NaiveDateTime,
    location: &GeoLocation,
) -> Result<DateTime<Utc>> {
    match result {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(location_error(
            local,
            location,
            "local time does not exist in this zone (DST gap)".to_string(),
        )),
    }
}

/// Explicit UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedZone(pub FixedOffset);

impl FixedZone {
    pub fn utc() -> Self {
        FixedZone(Utc.fix())
    }

    /// Offset in (possibly fractional) hours east of Greenwich.
    pub fn from_hours(hours: f64) -> Result<Self> {
        let secs = (hours * 3600.0).round();
        if !secs.is_finite() || secs.abs() >= 86_400.0 {
            return Err(ChartError::invalid(format!("UTC offset {hours}h is out of range")));
        }
        FixedOffset::east_opt(secs as i32)
            .map(FixedZone)
            .ok_or_else(|| ChartError::invalid(format!("UTC offset {hours}h is out of range")))
    }
}

impl ZoneResolver for FixedZone {
    fn to_utc(&self, local: NaiveDateTime, location: &GeoLocation) -> Result<DateTime<Utc>> {
        pick_instant(self.0.from_local_datetime(&local), local, location)
    }
}

/// Named IANA time zone, e.g. `America/New_York`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedZone(pub Tz);

impl ZoneResolver for NamedZone {
    fn to_utc(&self, local: NaiveDateTime, location: &GeoLocation) -> Result<DateTime<Utc>> {
        pick_instant(self.0.from_local_datetime(&local), local, location)
    }
}

/// Resolver used when no zone was supplied and no lookup service is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoZone;

impl ZoneResolver for NoZone {
    fn to_utc(&self, local: NaiveDateTime, location: &GeoLocation) -> Result<DateTime<Utc>> {
        Err(location_error(
            local,
            location,
            "no time zone supplied and no coordinate lookup configured".to_string(),
        ))
    }
}

/// Parse `UTC`, `Z`, `+05:30`, `-0800`, `+2` or an IANA zone name.
pub fn parse_zone(text: &str) -> Result<Box<dyn ZoneResolver>> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("utc") || text.eq_ignore_ascii_case("z") {
        return Ok(Box::new(FixedZone::utc()));
    }
    if let Some(rest) = text.strip_prefix('+').or_else(|| text.strip_prefix('-')) {
        let sign = if text.starts_with('-') { -1.0 } else { 1.0 };
        let (h, m) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None if rest.len() == 4 => rest.split_at(2),
            None => (rest, "0"),
        };
        let hours: u32 = h
            .parse()
            .map_err(|_| ChartError::invalid(format!("malformed UTC offset '{text}'")))?;
        let minutes: u32 = m
            .parse()
            .map_err(|_| ChartError::invalid(format!("malformed UTC offset '{text}'")))?;
        if minutes >= 60 {
            return Err(ChartError::invalid(format!("malformed UTC offset '{text}'")));
        }
        let zone = FixedZone::from_hours(sign * (hours as f64 + minutes as f64 / 60.0))?;
        return Ok(Box::new(zone));
    }
    text.parse::<Tz>()
        .map(|tz| Box::new(NamedZone(tz)) as Box<dyn ZoneResolver>)
        .map_err(|e| ChartError::invalid(format!("unknown time zone '{text}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn named_zone_handles_daylight_saving() {
        let loc = GeoLocation::new(28.0786111, -80.6027778).unwrap();
        let zone = parse_zone("America/New_York").unwrap();
        let utc = zone.to_utc(at(1984, 8, 18, 8, 3), &loc).unwrap();
        assert_eq!(utc.naive_utc(), at(1984, 8, 18, 12, 3));
    }

    #[test]
    fn dst_gap_is_a_location_time_error() {
        let loc = GeoLocation::new(40.7, -74.0).unwrap();
        let zone = parse_zone("America/New_York").unwrap();
        let err = zone.to_utc(at(2021, 3, 14, 2, 30), &loc).unwrap_err();
        assert!(matches!(err, ChartError::LocationTime { .. }));
    }

    #[test]
    fn parses_offsets() {
        let loc = GeoLocation::new(0.0, 0.0).unwrap();
        for (offset, hour) in [("UTC", 12), ("+05:30", 6), ("-0800", 20), ("+2", 10)] {
            let zone = parse_zone(offset).unwrap();
            let utc = zone.to_utc(at(2000, 1, 1, 12, 0), &loc).unwrap();
            let expected_min = if offset == "+05:30" { 30 } else { 0 };
            assert_eq!(utc.naive_utc(), at(2000, 1, 1, hour, expected_min), "{offset}");
        }
        assert!(parse_zone("+05:75").is_err());
        assert!(parse_zone("Mars/Olympus_Mons").is_err());
    }

    #[test]
    fn no_zone_fails_with_location_time() {
        let loc = GeoLocation::new(10.0, 10.0).unwrap();
        assert!(matches!(
            NoZone.to_utc(at(2000, 1, 1, 0, 0), &loc),
            Err(ChartError::LocationTime { .. })
        ));
    }
}
