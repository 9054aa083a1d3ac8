//! Calendar ↔ Julian Day conversions (proleptic Gregorian calendar).

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Day Number at noon of a Gregorian calendar date (Fliegel–Van Flandern).
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let a = (14 - month as i64) / 12;
    let y = year as i64 + 4800 - a;
    let m = month as i64 + 12 * a - 3;
    day as i64 + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Julian Day for a calendar date plus a time of day.
pub fn julian_day(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
    let decimal_hours = hour as f64 + minute as f64 / 60.0 + second / 3600.0;
    julian_day_number(year, month, day) as f64 + (decimal_hours - 12.0) / 24.0
}

/// Julian Day (UT) of a UTC instant.
pub fn julian_day_from_utc(dt: DateTime<Utc>) -> f64 {
    let second = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
    julian_day(dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute(), second)
}

/// Julian centuries elapsed since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Decimal year of a UTC instant, used to select a ΔT era.
pub fn decimal_year(dt: DateTime<Utc>) -> f64 {
    let year = dt.year();
    let start = julian_day(year, 1, 1, 0, 0, 0.0);
    let end = julian_day(year + 1, 1, 1, 0, 0, 0.0);
    year as f64 + (julian_day_from_utc(dt) - start) / (end - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn j2000_noon() {
        assert_eq!(julian_day(2000, 1, 1, 12, 0, 0.0), J2000_JD);
    }

    #[test]
    fn meeus_reference_dates() {
        // Meeus, Astronomical Algorithms, example 7.a and table 7.a
        assert!((julian_day(1957, 10, 4, 19, 26, 24.0) - 2_436_116.31).abs() < 1e-8);
        assert_eq!(julian_day(1987, 1, 27, 0, 0, 0.0), 2_446_822.5);
        assert_eq!(julian_day(1600, 1, 1, 0, 0, 0.0), 2_305_447.5);
    }

    #[test]
    fn proleptic_gregorian_epoch() {
        // JD 0 is -4713-11-24 12:00 in the proleptic Gregorian calendar
        assert_eq!(julian_day(-4713, 11, 24, 12, 0, 0.0), 0.0);
    }

    #[test]
    fn utc_instant_round_trip() {
        let dt = Utc.with_ymd_and_hms(1984, 8, 18, 12, 3, 0).unwrap();
        let jd = julian_day_from_utc(dt);
        assert!((jd - 2_445_931.002_083).abs() < 1e-6);
    }

    #[test]
    fn decimal_year_mid_year() {
        let dt = Utc.with_ymd_and_hms(2001, 7, 2, 12, 0, 0).unwrap();
        assert!((decimal_year(dt) - 2001.5).abs() < 0.002);
    }
}
