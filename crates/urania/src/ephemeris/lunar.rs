//! Truncated lunar theory (Meeus ch. 47): the largest periodic terms in
//! longitude and latitude, plus the mean lunar node and phase.

use crate::ephemeris::types::{EclipticPosition, MoonPhase, PhaseInfo};
use crate::math::{cosd, norm180, norm360, poly, sind};
use crate::time::nutation::moon_mean_node;
use crate::time::TimeFrame;

/// Multipliers of (D, M, M′, F) and the sine coefficient in 1e-6 degrees.
type Term = (i8, i8, i8, i8, f64);

const LONGITUDE_TERMS: [Term; 25] = [
    (0, 0, 1, 0, 6_288_774.0),
    (2, 0, -1, 0, 1_274_027.0),
    (2, 0, 0, 0, 658_314.0),
    (0, 0, 2, 0, 213_618.0),
    (0, 1, 0, 0, -185_116.0),
    (0, 0, 0, 2, -114_332.0),
    (2, 0, -2, 0, 58_793.0),
    (2, -1, -1, 0, 57_066.0),
    (2, 0, 1, 0, 53_322.0),
    (2, -1, 0, 0, 45_758.0),
    (0, 1, -1, 0, -40_923.0),
    (1, 0, 0, 0, -34_720.0),
    (0, 1, 1, 0, -30_383.0),
    (2, 0, 0, -2, 15_327.0),
    (0, 0, 1, 2, -12_528.0),
    (0, 0, 1, -2, 10_980.0),
    (4, 0, -1, 0, 10_675.0),
    (0, 0, 3, 0, 10_034.0),
    (4, 0, -2, 0, 8_548.0),
    (2, 1, -1, 0, -7_888.0),
    (2, 1, 0, 0, -6_766.0),
    (1, 0, -1, 0, -5_163.0),
    (1, 1, 0, 0, 4_987.0),
    (2, -1, 1, 0, 4_036.0),
    (2, 0, 2, 0, 3_994.0),
];

const LATITUDE_TERMS: [Term; 13] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
];

/// Fundamental arguments of the lunar theory, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarArguments {
    /// Mean longitude L′
    pub mean_longitude: f64,
    /// Mean elongation D
    pub elongation: f64,
    /// Sun's mean anomaly M
    pub sun_anomaly: f64,
    /// Moon's mean anomaly M′
    pub moon_anomaly: f64,
    /// Argument of latitude F
    pub latitude_argument: f64,
    /// Eccentricity damping factor for terms in M
    pub eccentricity: f64,
}

impl LunarArguments {
    pub fn at(t: f64) -> Self {
        Self {
            mean_longitude: norm360(poly(
                t,
                &[
                    218.316_447_7,
                    481_267.881_234_21,
                    -0.001_578_6,
                    1.0 / 538_841.0,
                    -1.0 / 65_194_000.0,
                ],
            )),
            elongation: norm360(poly(
                t,
                &[
                    297.850_192_1,
                    445_267.111_403_4,
                    -0.001_881_9,
                    1.0 / 545_868.0,
                    -1.0 / 113_065_000.0,
                ],
            )),
            sun_anomaly: norm360(poly(
                t,
                &[357.529_109_2, 35_999.050_290_9, -0.000_153_6, 1.0 / 24_490_000.0],
            )),
            moon_anomaly: norm360(poly(
                t,
                &[
                    134.963_396_4,
                    477_198.867_505_5,
                    0.008_741_4,
                    1.0 / 69_699.0,
                    -1.0 / 14_712_000.0,
                ],
            )),
            latitude_argument: norm360(poly(
                t,
                &[
                    93.272_095_0,
                    483_202.017_523_3,
                    -0.003_653_9,
                    -1.0 / 3_526_000.0,
                    1.0 / 863_310_000.0,
                ],
            )),
            eccentricity: poly(t, &[1.0, -0.002_516, -0.000_007_4]),
        }
    }

    fn sum(&self, terms: &[Term]) -> f64 {
        terms
            .iter()
            .map(|&(d, m, mp, f, coeff)| {
                let arg = f64::from(d) * self.elongation
                    + f64::from(m) * self.sun_anomaly
                    + f64::from(mp) * self.moon_anomaly
                    + f64::from(f) * self.latitude_argument;
                coeff * self.eccentricity.powi(i32::from(m.abs())) * sind(arg)
            })
            .sum()
    }
}

/// Geocentric Moon from the truncated series
#[derive(Debug, Clone, Copy, Default)]
pub struct LunarEngine;

impl LunarEngine {
    pub fn new() -> Self {
        Self
    }

    /// Geometric position referred to the mean equinox of date.
    pub fn true_position(&self, frame: &TimeFrame) -> EclipticPosition {
        let t = frame.centuries;
        let args = LunarArguments::at(t);
        let a1 = 119.75 + 131.849 * t;
        let a2 = 53.09 + 479_264.290 * t;
        let a3 = 313.45 + 481_266.484 * t;
        let lp = args.mean_longitude;
        let f = args.latitude_argument;
        let mp = args.moon_anomaly;

        let sigma_l = args.sum(&LONGITUDE_TERMS)
            + 3958.0 * sind(a1)
            + 1962.0 * sind(lp - f)
            + 318.0 * sind(a2);
        let sigma_b = args.sum(&LATITUDE_TERMS) - 2235.0 * sind(lp)
            + 382.0 * sind(a3)
            + 175.0 * sind(a1 - f)
            + 175.0 * sind(a1 + f)
            + 127.0 * sind(lp - mp)
            - 115.0 * sind(lp + mp);

        EclipticPosition::new(lp + sigma_l / 1e6, sigma_b / 1e6)
    }

    /// Apparent position: adds nutation in longitude.
    pub fn apparent_position(&self, frame: &TimeFrame) -> EclipticPosition {
        let geometric = self.true_position(frame);
        EclipticPosition::new(
            geometric.longitude + frame.nutation_longitude,
            geometric.latitude,
        )
    }

    pub fn position(&self, frame: &TimeFrame, apparent: bool) -> EclipticPosition {
        if apparent {
            self.apparent_position(frame)
        } else {
            self.true_position(frame)
        }
    }

    /// Mean ascending node of the lunar orbit.
    pub fn mean_node(&self, frame: &TimeFrame) -> EclipticPosition {
        EclipticPosition::on_ecliptic(moon_mean_node(frame.centuries))
    }

    /// Phase from Sun and Moon longitudes.
    pub fn phase(&self, moon_longitude: f64, sun_longitude: f64) -> PhaseInfo {
        let elongation = norm180(moon_longitude - sun_longitude);
        let phase = (1.0 - cosd(elongation)) / 2.0;
        PhaseInfo {
            elongation,
            phase,
            illumination: phase * 100.0,
            name: MoonPhase::from_elongation(elongation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::GeoLocation;

    fn frame_at_tt(jd_tt: f64) -> TimeFrame {
        let loc = GeoLocation::new(0.0, 0.0).unwrap();
        TimeFrame::from_julian_day(jd_tt, 0.0, loc)
    }

    #[test]
    fn meeus_example_47a() {
        // 1992-04-12 0h TD: λ = 133.162655°, β = -3.229126°
        let pos = LunarEngine::new().true_position(&frame_at_tt(2_448_724.5));
        assert!((pos.longitude - 133.162_655).abs() < 0.01, "{}", pos.longitude);
        assert!((pos.latitude - (-3.229_126)).abs() < 0.01, "{}", pos.latitude);
    }

    #[test]
    fn arguments_at_meeus_example() {
        let args = LunarArguments::at(-0.077_221_081_451);
        assert!((args.mean_longitude - 134.290_182).abs() < 1e-5);
        assert!((args.elongation - 113.842_304).abs() < 1e-5);
        assert!((args.eccentricity - 1.000_194).abs() < 1e-6);
    }

    #[test]
    fn new_and_full_moon_phase() {
        let engine = LunarEngine::new();
        let new = engine.phase(100.0, 100.0);
        assert_eq!(new.name, MoonPhase::New);
        assert!(new.illumination.abs() < 1e-9);

        let full = engine.phase(280.0, 100.0);
        assert_eq!(full.name, MoonPhase::Full);
        assert!((full.illumination - 100.0).abs() < 1e-9);
    }

    #[test]
    fn phase_wraps_across_aries() {
        let engine = LunarEngine::new();
        let p = engine.phase(10.0, 320.0);
        assert!((p.elongation - 50.0).abs() < 1e-9);
        assert_eq!(p.name, MoonPhase::WaxingCrescent);
        let p = engine.phase(320.0, 10.0);
        assert_eq!(p.name, MoonPhase::WaningCrescent);
    }
}
