//! Low-precision solar theory (Meeus ch. 25), good to about 0.01°.

use crate::ephemeris::types::EclipticPosition;
use crate::math::{cosd, norm360, poly, sind};
use crate::time::TimeFrame;

/// Intermediate quantities of the solar series, all in degrees except
/// `eccentricity` and `radius` (AU).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTerms {
    pub mean_longitude: f64,
    pub mean_anomaly: f64,
    pub eccentricity: f64,
    pub equation_of_center: f64,
    pub true_longitude: f64,
    pub radius: f64,
}

impl SolarTerms {
    /// Evaluate the series at `t` Julian centuries TT from J2000.
    pub fn at(t: f64) -> Self {
        let l0 = norm360(poly(t, &[280.46646, 36000.76983, 0.0003032]));
        let m = norm360(poly(t, &[357.52911, 35999.05029, -0.0001537]));
        let e = poly(t, &[0.016708634, -0.000042037, -0.0000001267]);

        let c = poly(t, &[1.914602, -0.004817, -0.000014]) * sind(m)
            + (0.019993 - 0.000101 * t) * sind(2.0 * m)
            + 0.000289 * sind(3.0 * m);

        let true_anomaly = m + c;
        let radius = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * cosd(true_anomaly));

        Self {
            mean_longitude: l0,
            mean_anomaly: m,
            eccentricity: e,
            equation_of_center: c,
            true_longitude: norm360(l0 + c),
            radius,
        }
    }
}

/// Geocentric Sun from the closed-form series
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarEngine;

impl SolarEngine {
    pub fn new() -> Self {
        Self
    }

    /// Geometric longitude referred to the mean equinox of date.
    pub fn true_position(&self, frame: &TimeFrame) -> EclipticPosition {
        EclipticPosition::on_ecliptic(SolarTerms::at(frame.centuries).true_longitude)
    }

    /// Apparent longitude: nutation in longitude plus annual aberration.
    pub fn apparent_position(&self, frame: &TimeFrame) -> EclipticPosition {
        let terms = SolarTerms::at(frame.centuries);
        let aberration = -20.4898 / 3600.0 / terms.radius;
        EclipticPosition::on_ecliptic(
            terms.true_longitude + frame.nutation_longitude + aberration,
        )
    }

    pub fn position(&self, frame: &TimeFrame, apparent: bool) -> EclipticPosition {
        if apparent {
            self.apparent_position(frame)
        } else {
            self.true_position(frame)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::GeoLocation;

    #[test]
    fn meeus_example_25a() {
        // 1992-10-13 0h TD: true longitude 199.90988°, R = 0.99766 AU
        let terms = SolarTerms::at(-0.072_183_436);
        assert!((terms.true_longitude - 199.909_88).abs() < 1e-4);
        assert!((terms.radius - 0.997_66).abs() < 1e-4);
        assert!((terms.eccentricity - 0.016_711_668).abs() < 1e-8);
    }

    #[test]
    fn apparent_trails_true_longitude() {
        let loc = GeoLocation::new(0.0, 0.0).unwrap();
        let frame = TimeFrame::from_julian_day(2_448_908.5, 59.0, loc);
        let engine = SolarEngine::new();
        let geometric = engine.true_position(&frame).longitude;
        let apparent = engine.apparent_position(&frame).longitude;
        // Meeus 25.a apparent longitude 199.90895°
        assert!((apparent - 199.908_95).abs() < 2e-3, "{apparent}");
        assert!(apparent < geometric);
    }

    #[test]
    fn longitude_is_normalized() {
        for t in [-20.0, -1.0, 0.0, 0.5, 10.0] {
            let lon = SolarTerms::at(t).true_longitude;
            assert!((0.0..360.0).contains(&lon));
        }
    }
}
