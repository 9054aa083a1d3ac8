//! Externally supplied apparent RA/Dec rows, converted to ecliptic of date.

use crate::ephemeris::types::{Body, EclipticPosition};
use crate::error::{ChartError, Result};
use crate::math::{asind, atan2d, cosd, sind};
use crate::time::julian::julian_day_from_utc;
use crate::time::TimeFrame;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rows further than this from the requested instant are still used but logged.
pub const DEFAULT_MAX_GAP_DAYS: f64 = 1.0;

/// Rotate apparent equatorial coordinates into the ecliptic frame.
///
/// All angles in degrees; `obliquity` should be the true obliquity of date.
pub fn equatorial_to_ecliptic(right_ascension: f64, declination: f64, obliquity: f64) -> EclipticPosition {
    let x = cosd(declination) * cosd(right_ascension);
    let y = cosd(declination) * sind(right_ascension);
    let z = sind(declination);

    let (se, ce) = (sind(obliquity), cosd(obliquity));
    let y_ecl = ce * y + se * z;
    let z_ecl = -se * y + ce * z;

    EclipticPosition::new(atan2d(y_ecl, x), asind(z_ecl.clamp(-1.0, 1.0)))
}

/// One externally supplied observation of a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisRow {
    pub body: Body,
    pub instant: DateTime<Utc>,
    /// Apparent right ascension, degrees
    pub right_ascension: f64,
    /// Apparent declination, degrees
    pub declination: f64,
}

impl EphemerisRow {
    pub fn new(body: Body, instant: DateTime<Utc>, right_ascension: f64, declination: f64) -> Result<Self> {
        if !(0.0..360.0).contains(&right_ascension) || !right_ascension.is_finite() {
            return Err(ChartError::EphemerisRow {
                message: format!("right ascension {right_ascension} outside [0, 360)"),
            });
        }
        if !(-90.0..=90.0).contains(&declination) {
            return Err(ChartError::EphemerisRow {
                message: format!("declination {declination} outside [-90, 90]"),
            });
        }
        Ok(Self {
            body,
            instant,
            right_ascension,
            declination,
        })
    }

    pub fn julian_day(&self) -> f64 {
        julian_day_from_utc(self.instant)
    }
}

/// Per-body store of ingested rows
#[derive(Debug, Clone)]
pub struct EphemerisIngestor {
    rows: BTreeMap<Body, Vec<EphemerisRow>>,
    max_gap_days: f64,
}

impl Default for EphemerisIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemerisIngestor {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            max_gap_days: DEFAULT_MAX_GAP_DAYS,
        }
    }

    pub fn with_max_gap_days(mut self, days: f64) -> Self {
        self.max_gap_days = days;
        self
    }

    pub fn add_row(&mut self, row: EphemerisRow) {
        self.rows.entry(row.body).or_default().push(row);
    }

    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = EphemerisRow>) {
        for row in rows {
            self.add_row(row);
        }
    }

    pub fn has_body(&self, body: Body) -> bool {
        self.rows.get(&body).is_some_and(|r| !r.is_empty())
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a HORIZONS observer table and store its rows for `body`.
    ///
    /// Returns the number of rows added.
    pub fn ingest_horizons(&mut self, body: Body, text: &str) -> Result<usize> {
        let rows = parse_horizons(body, text)?;
        let count = rows.len();
        debug!("Ingested {} HORIZONS rows for {}", count, body);
        self.add_rows(rows);
        Ok(count)
    }

    /// Row closest in time to `julian_day_ut`.
    pub fn nearest(&self, body: Body, julian_day_ut: f64) -> Option<&EphemerisRow> {
        self.rows.get(&body)?.iter().min_by(|a, b| {
            let da = (a.julian_day() - julian_day_ut).abs();
            let db = (b.julian_day() - julian_day_ut).abs();
            da.total_cmp(&db)
        })
    }

    /// Ecliptic-of-date position from the nearest row, if any row exists.
    pub fn position(&self, body: Body, frame: &TimeFrame) -> Option<EclipticPosition> {
        let row = self.nearest(body, frame.julian_day_ut)?;
        let gap = (row.julian_day() - frame.julian_day_ut).abs();
        if gap > self.max_gap_days {
            warn!(
                "Nearest ingested row for {} is {:.2} days from the requested instant",
                body, gap
            );
        }
        Some(equatorial_to_ecliptic(
            row.right_ascension,
            row.declination,
            frame.true_obliquity,
        ))
    }
}

fn row_error(line: &str, message: &str) -> ChartError {
    ChartError::EphemerisRow {
        message: format!("{message}: '{}'", line.trim()),
    }
}

fn parse_instant(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let stamp = format!("{date} {time}");
    ["%Y-%b-%d %H:%M:%S%.f", "%Y-%b-%d %H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&stamp, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn sexagesimal(tokens: &[&str]) -> Option<f64> {
    let negative = tokens.first()?.starts_with('-');
    let mut value = 0.0;
    for (i, token) in tokens.iter().enumerate() {
        let part: f64 = token.trim_start_matches(['+', '-']).parse().ok()?;
        value += part / 60f64.powi(i as i32);
    }
    Some(if negative { -value } else { value })
}

/// Parse RA/Dec columns in decimal degrees or `HH MM SS.ff ±DD MM SS.f`.
fn parse_coordinates(line: &str, columns: &str) -> Result<(f64, f64)> {
    let tokens: Vec<&str> = columns.split_whitespace().collect();
    let is_sexagesimal = tokens.len() >= 6 && !tokens[0].contains('.') && !tokens[1].contains('.');

    let (ra, dec) = if is_sexagesimal {
        let ra_hours = sexagesimal(&tokens[0..3]).ok_or_else(|| row_error(line, "bad right ascension"))?;
        let dec = sexagesimal(&tokens[3..6]).ok_or_else(|| row_error(line, "bad declination"))?;
        (ra_hours * 15.0, dec)
    } else if tokens.len() >= 2 {
        let ra: f64 = tokens[0]
            .parse()
            .map_err(|_| row_error(line, "bad right ascension"))?;
        let dec: f64 = tokens[1]
            .parse()
            .map_err(|_| row_error(line, "bad declination"))?;
        (ra, dec)
    } else {
        return Err(row_error(line, "missing RA/Dec columns"));
    };
    Ok((ra, dec))
}

/// Parse the `$$SOE … $$EOE` block of a HORIZONS observer table.
pub fn parse_horizons(body: Body, text: &str) -> Result<Vec<EphemerisRow>> {
    let block_regex = Regex::new(r"(?s)\$\$SOE(.*?)\$\$EOE").map_err(|_| ChartError::EphemerisRow {
        message: "Regex error".to_string(),
    })?;
    let row_regex = Regex::new(
        r"^\s*(?P<date>-?\d{4}-(?:[A-Za-z]{3}|\d{2})-\d{2})\s+(?P<time>\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?)\s+(?:[^\d\s+\-.]+\s+)?(?P<coords>[+\-]?\d.*)$",
    )
    .map_err(|_| ChartError::EphemerisRow {
        message: "Regex error".to_string(),
    })?;

    let block = block_regex
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or_else(|| ChartError::EphemerisRow {
            message: "no $$SOE/$$EOE block found".to_string(),
        })?
        .as_str();

    let mut rows = Vec::new();
    for line in block.lines().filter(|l| !l.trim().is_empty()) {
        let caps = row_regex
            .captures(line)
            .ok_or_else(|| row_error(line, "unrecognised row"))?;
        let instant = parse_instant(&caps["date"], &caps["time"])
            .ok_or_else(|| row_error(line, "bad timestamp"))?;
        let (ra, dec) = parse_coordinates(line, &caps["coords"])?;
        rows.push(EphemerisRow::new(body, instant, ra, dec)?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pollux_meeus_example_13a() {
        // RA 116.328942°, Dec 28.026183°, ε = 23.4392911° → λ 113.215630°, β 6.684170°
        let p = equatorial_to_ecliptic(116.328_942, 28.026_183, 23.439_291_1);
        assert!((p.longitude - 113.215_630).abs() < 1e-5);
        assert!((p.latitude - 6.684_170).abs() < 1e-5);
    }

    #[test]
    fn equinox_points_map_to_themselves() {
        let p = equatorial_to_ecliptic(0.0, 0.0, 23.44);
        assert!(p.longitude.abs() < 1e-12 && p.latitude.abs() < 1e-12);
        let p = equatorial_to_ecliptic(180.0, 0.0, 23.44);
        assert!((p.longitude - 180.0).abs() < 1e-9);
    }

    #[test]
    fn parses_sexagesimal_rows() {
        let text = "header\n$$SOE\n 1984-Aug-18 12:00 *m  09 51 53.85 +12 56 59.1\n 1984-Aug-19 00:00     09 53 43.10 +12 53 01.0\n$$EOE\nfooter";
        let rows = parse_horizons(Body::Sun, text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].instant, Utc.with_ymd_and_hms(1984, 8, 18, 12, 0, 0).unwrap());
        let ra = (9.0 + 51.0 / 60.0 + 53.85 / 3600.0) * 15.0;
        assert!((rows[0].right_ascension - ra).abs() < 1e-9);
        assert!((rows[0].declination - (12.0 + 56.0 / 60.0 + 59.1 / 3600.0)).abs() < 1e-9);
    }

    #[test]
    fn parses_decimal_rows_and_negative_declination() {
        let text = "$$SOE\n2024-01-01 00:00  280.51234 -23.01000\n$$EOE";
        let rows = parse_horizons(Body::Sun, text).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].right_ascension - 280.51234).abs() < 1e-12);
        assert!((rows[0].declination + 23.01).abs() < 1e-12);

        let text = "$$SOE\n2024-01-01 00:00  18 42 03.0 -00 30 00.0\n$$EOE";
        let rows = parse_horizons(Body::Mars, text).unwrap();
        assert!((rows[0].declination + 0.5).abs() < 1e-9);
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(matches!(
            parse_horizons(Body::Sun, "no markers"),
            Err(ChartError::EphemerisRow { .. })
        ));
        assert!(matches!(
            parse_horizons(Body::Sun, "$$SOE\n1984-Aug-18 12:00 n.a. n.a.\n$$EOE"),
            Err(ChartError::EphemerisRow { .. })
        ));
        assert!(matches!(
            parse_horizons(Body::Sun, "$$SOE\n1984-Aug-18 12:00 400.0 10.0\n$$EOE"),
            Err(ChartError::EphemerisRow { .. })
        ));
    }

    #[test]
    fn nearest_row_wins() {
        let mut ingestor = EphemerisIngestor::new();
        let t0 = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2000, 1, 2, 0, 0, 0).unwrap();
        ingestor.add_row(EphemerisRow::new(Body::Mars, t0, 10.0, 0.0).unwrap());
        ingestor.add_row(EphemerisRow::new(Body::Mars, t1, 11.0, 0.0).unwrap());
        let jd = julian_day_from_utc(t1) - 0.2;
        assert_eq!(ingestor.nearest(Body::Mars, jd).unwrap().right_ascension, 11.0);
        assert!(ingestor.nearest(Body::Venus, jd).is_none());
        assert!(ingestor.has_body(Body::Mars));
        assert_eq!(ingestor.len(), 2);
    }
}
