//! Keplerian propagation of mean orbital elements.
//!
//! Elements and rates are the J2000 mean-ecliptic set of Standish
//! (JPL, "Approximate Positions of the Planets", 1800–2050 AD table).
//! Perturbations between planets are ignored.

use crate::ephemeris::types::{Body, EclipticPosition};
use crate::error::{ChartError, Result};
use crate::math::{atan2d, cosd, sind};
use crate::time::TimeFrame;
use log::debug;
use std::f64::consts::PI;

pub const KEPLER_MAX_ITERATIONS: usize = 10;
pub const KEPLER_TOLERANCE: f64 = 1e-10;

/// Six classical elements. Angles in degrees, distance in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub mean_longitude: f64,
    /// Longitude of perihelion ϖ
    pub perihelion: f64,
    /// Longitude of the ascending node Ω
    pub node: f64,
}

/// J2000 elements plus their rates per Julian century.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSet {
    pub epoch: OrbitalElements,
    pub rates: OrbitalElements,
}

const fn elements(a: f64, e: f64, i: f64, l: f64, peri: f64, node: f64) -> OrbitalElements {
    OrbitalElements {
        semi_major_axis: a,
        eccentricity: e,
        inclination: i,
        mean_longitude: l,
        perihelion: peri,
        node,
    }
}

pub const EARTH_MOON_BARYCENTER: ElementSet = ElementSet {
    epoch: elements(1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0),
    rates: elements(0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0),
};

pub const PLANET_ELEMENTS: [(Body, ElementSet); 8] = [
    (
        Body::Mercury,
        ElementSet {
            epoch: elements(0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93),
            rates: elements(0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81),
        },
    ),
    (
        Body::Venus,
        ElementSet {
            epoch: elements(0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55),
            rates: elements(0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18),
        },
    ),
    (
        Body::Mars,
        ElementSet {
            epoch: elements(1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91),
            rates: elements(0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43),
        },
    ),
    (
        Body::Jupiter,
        ElementSet {
            epoch: elements(5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09),
            rates: elements(-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06),
        },
    ),
    (
        Body::Saturn,
        ElementSet {
            epoch: elements(9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48),
            rates: elements(-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94),
        },
    ),
    (
        Body::Uranus,
        ElementSet {
            epoch: elements(19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03),
            rates: elements(-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89),
        },
    ),
    (
        Body::Neptune,
        ElementSet {
            epoch: elements(30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74),
            rates: elements(0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64),
        },
    ),
    (
        Body::Pluto,
        ElementSet {
            epoch: elements(39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84),
            rates: elements(-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82),
        },
    ),
];

impl ElementSet {
    /// Elements of date: epoch value plus rate × `t` (centuries TT).
    pub fn at(&self, t: f64) -> OrbitalElements {
        let e = &self.epoch;
        let r = &self.rates;
        OrbitalElements {
            semi_major_axis: e.semi_major_axis + r.semi_major_axis * t,
            eccentricity: e.eccentricity + r.eccentricity * t,
            inclination: e.inclination + r.inclination * t,
            mean_longitude: e.mean_longitude + r.mean_longitude * t,
            perihelion: e.perihelion + r.perihelion * t,
            node: e.node + r.node * t,
        }
    }
}

/// Look up the element set for a planet.
pub fn element_set(body: Body) -> Option<&'static ElementSet> {
    PLANET_ELEMENTS
        .iter()
        .find(|(b, _)| *b == body)
        .map(|(_, set)| set)
}

/// Outcome of a bounded Newton–Raphson solve of Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly, radians; best estimate even when not converged
    pub eccentric_anomaly: f64,
    pub iterations: usize,
    /// Last Newton step size, radians
    pub residual: f64,
    pub converged: bool,
}

/// Solve E − e·sin E = M for E. `mean_anomaly` in radians.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    let m = (mean_anomaly + PI).rem_euclid(2.0 * PI) - PI;
    let e = eccentricity;
    let mut ecc = if e < 0.8 { m + e * m.sin() } else { PI.copysign(m) };
    let mut residual = f64::INFINITY;

    for i in 1..=KEPLER_MAX_ITERATIONS {
        let step = (ecc - e * ecc.sin() - m) / (1.0 - e * ecc.cos());
        ecc -= step;
        residual = step.abs();
        if residual < KEPLER_TOLERANCE {
            return KeplerSolution {
                eccentric_anomaly: ecc,
                iterations: i,
                residual,
                converged: true,
            };
        }
    }

    KeplerSolution {
        eccentric_anomaly: ecc,
        iterations: KEPLER_MAX_ITERATIONS,
        residual,
        converged: false,
    }
}

impl OrbitalElements {
    /// Heliocentric rectangular coordinates on the J2000 ecliptic, AU.
    pub fn heliocentric(&self) -> Result<[f64; 3]> {
        let e = self.eccentricity;
        let mean_anomaly = (self.mean_longitude - self.perihelion).to_radians();
        let solution = solve_kepler(mean_anomaly, e);
        if !solution.converged {
            return Err(ChartError::NumericalNonConvergence {
                what: "Kepler equation".to_string(),
                iterations: solution.iterations,
                residual: solution.residual,
            });
        }
        debug!(
            "Kepler solve converged in {} iterations (e = {:.5})",
            solution.iterations, e
        );

        let ecc = solution.eccentric_anomaly;
        let nu = 2.0
            * ((1.0 + e).sqrt() * (ecc / 2.0).sin()).atan2((1.0 - e).sqrt() * (ecc / 2.0).cos());
        let r = self.semi_major_axis * (1.0 - e * ecc.cos());
        let xp = r * nu.cos();
        let yp = r * nu.sin();

        let w = self.perihelion - self.node;
        let (sw, cw) = (sind(w), cosd(w));
        let (so, co) = (sind(self.node), cosd(self.node));
        let (si, ci) = (sind(self.inclination), cosd(self.inclination));

        Ok([
            (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
            (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
            (sw * si) * xp + (cw * si) * yp,
        ])
    }
}

/// General precession in longitude from J2000 to date, degrees.
pub fn precession_since_j2000(t: f64) -> f64 {
    (5029.0966 * t + 1.11113 * t * t) / 3600.0
}

fn to_ecliptic_of_date(v: [f64; 3], t: f64) -> EclipticPosition {
    let [x, y, z] = v;
    let longitude = atan2d(y, x) + precession_since_j2000(t);
    let latitude = atan2d(z, x.hypot(y));
    EclipticPosition::new(longitude, latitude)
}

/// Geocentric planets from mean Keplerian elements
#[derive(Debug, Clone, Copy, Default)]
pub struct KeplerianPlanetEngine;

impl KeplerianPlanetEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn heliocentric(&self, body: Body, t: f64) -> Result<[f64; 3]> {
        let set = element_set(body).ok_or_else(|| {
            ChartError::invalid(format!("{} has no Keplerian elements", body.name()))
        })?;
        set.at(t).heliocentric()
    }

    /// Geocentric ecliptic-of-date position of a planet.
    pub fn position(&self, body: Body, frame: &TimeFrame, apparent: bool) -> Result<EclipticPosition> {
        let t = frame.centuries;
        let planet = self.heliocentric(body, t)?;
        let earth = EARTH_MOON_BARYCENTER.at(t).heliocentric()?;
        let geo = [
            planet[0] - earth[0],
            planet[1] - earth[1],
            planet[2] - earth[2],
        ];
        let pos = to_ecliptic_of_date(geo, t);
        Ok(if apparent {
            EclipticPosition::new(pos.longitude + frame.nutation_longitude, pos.latitude)
        } else {
            pos
        })
    }

    /// Geocentric Sun as the reflection of the Earth's heliocentric vector.
    pub fn sun_position(&self, frame: &TimeFrame) -> Result<EclipticPosition> {
        let t = frame.centuries;
        let [x, y, z] = EARTH_MOON_BARYCENTER.at(t).heliocentric()?;
        Ok(to_ecliptic_of_date([-x, -y, -z], t))
    }
}

/// Distance in AU of a heliocentric vector, for diagnostics.
pub fn radius(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
