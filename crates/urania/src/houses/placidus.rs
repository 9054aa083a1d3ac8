//! Placidus intermediate cusps.
//!
//! A cusp λ in the upper quadrants satisfies RA(λ) = ARMC + f·SDA(λ), and in
//! the lower quadrants RA(λ) = ARMC + 180° − f·SNA(λ), where the semi-arcs
//! depend on the declination of λ itself. Each cusp is found by a Newton
//! iteration on λ over the full residual RA(λ) − target(λ), with a secant
//! fallback where that derivative vanishes.

use crate::error::{ChartError, Result};
use crate::houses::types::Angles;
use crate::math::{asind, atan2d, cosd, norm180, norm360, round_to_arcsec, sind, tand};
use log::debug;

const RESIDUAL_TOLERANCE: f64 = 1e-12;
const STEP_TOLERANCE: f64 = 1e-12;
pub const MAX_ITERATIONS: usize = 40;
const DERIVATIVE_MIN: f64 = 1e-6;
/// Largest single correction to λ, degrees
const MAX_STEP: f64 = 30.0;
const CIRCUMPOLAR_LIMIT: f64 = 1.0 - 1e-15;
/// Output precision in arcseconds
const CUSP_ROUNDING_ARCSEC: f64 = 0.01;

/// Which half of the chart a cusp belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    /// Between MC and Ascendant (houses 11, 12); diurnal semi-arc
    Upper,
    /// Between Ascendant and IC (houses 2, 3); nocturnal semi-arc
    Lower,
}

impl Sector {
    fn sign(self) -> f64 {
        match self {
            Sector::Upper => 1.0,
            Sector::Lower => -1.0,
        }
    }
}

/// Right ascension of an ecliptic longitude (zero latitude).
pub fn ra_from_lambda(lambda: f64, obliquity: f64) -> f64 {
    norm360(atan2d(sind(lambda) * cosd(obliquity), cosd(lambda)))
}

pub fn declination(lambda: f64, obliquity: f64) -> f64 {
    asind(sind(obliquity) * sind(lambda))
}

/// dRA/dλ for a point on the ecliptic.
fn dra_dlambda(lambda: f64, obliquity: f64) -> f64 {
    let cos_dec = cosd(declination(lambda, obliquity));
    cosd(obliquity) / (cos_dec * cos_dec)
}

/// d(AD)/dλ where AD = asin(tan φ · tan δ(λ)) is the ascensional difference.
fn dad_dlambda(lambda: f64, obliquity: f64, tan_lat: f64) -> f64 {
    let dec = declination(lambda, obliquity);
    let cos_dec = cosd(dec);
    let k = tan_lat * tand(dec);
    let ddec = sind(obliquity) * cosd(lambda) / cos_dec;
    tan_lat / (cos_dec * cos_dec) * ddec / (1.0 - k * k).sqrt()
}

/// Whether some ecliptic points never rise or set at this latitude.
fn beyond_polar_circle(latitude: f64, obliquity: f64) -> bool {
    (tand(latitude) * tand(obliquity)).abs() >= 1.0
}

/// Solve one intermediate cusp.
///
/// `armc` is the reference right ascension of the quadrant: ARMC for the
/// upper sector, ARMC + 180° for the lower sector. `fraction` is 1/3 or 2/3.
pub fn solve_cusp(
    house: u8,
    armc: f64,
    fraction: f64,
    sector: Sector,
    latitude: f64,
    obliquity: f64,
) -> Result<f64> {
    let sign = sector.sign();
    let tan_lat = tand(latitude);
    let mut lambda = norm360(armc + sign * fraction * 90.0);
    let mut previous: Option<(f64, f64)> = None;
    let mut residual = f64::INFINITY;

    for iteration in 1..=MAX_ITERATIONS {
        let dec = declination(lambda, obliquity);
        let k = tan_lat * tand(dec);
        if k.abs() >= CIRCUMPOLAR_LIMIT {
            return Err(ChartError::CircumpolarHouse {
                house,
                latitude,
                declination: dec,
            });
        }
        let ascensional_difference = asind(k);
        let semi_arc = match sector {
            Sector::Upper => 90.0 + ascensional_difference,
            Sector::Lower => 90.0 - ascensional_difference,
        };
        let target = norm360(armc + sign * fraction * semi_arc);
        residual = norm180(ra_from_lambda(lambda, obliquity) - target);

        if residual.abs() < RESIDUAL_TOLERANCE {
            debug!("Placidus cusp {} converged in {} iterations", house, iteration);
            return Ok(finish(lambda));
        }

        // target moves by f·AD′ in both sectors
        let derivative = dra_dlambda(lambda, obliquity) - fraction * dad_dlambda(lambda, obliquity, tan_lat);
        let raw_step = if derivative.is_finite() && derivative.abs() >= DERIVATIVE_MIN {
            residual / derivative
        } else {
            match previous {
                Some((prev_lambda, prev_residual)) if residual != prev_residual => {
                    residual * norm180(lambda - prev_lambda) / (residual - prev_residual)
                }
                _ => residual,
            }
        };
        let step = raw_step.clamp(-MAX_STEP, MAX_STEP);

        previous = Some((lambda, residual));
        lambda = norm360(lambda - step);

        if step.abs() < STEP_TOLERANCE {
            debug!("Placidus cusp {} stalled at step {:e} after {} iterations", house, step, iteration);
            return Ok(finish(lambda));
        }
    }

    // Past the polar circle the iteration can cycle between points with no
    // cusp between them; there is no Placidus cusp to find.
    if beyond_polar_circle(latitude, obliquity) {
        return Err(ChartError::CircumpolarHouse {
            house,
            latitude,
            declination: declination(lambda, obliquity),
        });
    }
    Err(ChartError::NumericalNonConvergence {
        what: format!("Placidus cusp {house}"),
        iterations: MAX_ITERATIONS,
        residual,
    })
}

fn finish(lambda: f64) -> f64 {
    norm360(round_to_arcsec(lambda, CUSP_ROUNDING_ARCSEC))
}

/// Placidus cusps 1..=12. Houses 5, 6, 8, 9 are antipodes of 11, 12, 2, 3.
pub fn placidus_cusps(angles: &Angles) -> Result<[f64; 12]> {
    let lat = angles.latitude;
    let eps = angles.obliquity;
    let armc = angles.armc;
    let ric = norm360(armc + 180.0);

    let c11 = solve_cusp(11, armc, 1.0 / 3.0, Sector::Upper, lat, eps)?;
    let c12 = solve_cusp(12, armc, 2.0 / 3.0, Sector::Upper, lat, eps)?;
    let c2 = solve_cusp(2, ric, 2.0 / 3.0, Sector::Lower, lat, eps)?;
    let c3 = solve_cusp(3, ric, 1.0 / 3.0, Sector::Lower, lat, eps)?;

    let opp = |x: f64| norm360(x + 180.0);
    Ok([
        angles.ascendant,
        c2,
        c3,
        angles.imum_coeli,
        opp(c11),
        opp(c12),
        angles.descendant,
        opp(c2),
        opp(c3),
        angles.midheaven,
        c11,
        c12,
    ])
}
