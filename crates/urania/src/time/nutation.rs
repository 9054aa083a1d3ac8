//! Obliquity of the ecliptic and low-precision nutation.
//!
//! Mean obliquity: IAU 2006 polynomial. Nutation: the four dominant terms of
//! the IAU 1980 series (Meeus ch. 22), good to about 0.5″ in longitude and
//! 0.1″ in obliquity.

use crate::math::{cosd, norm360, poly, sind};

/// Nutation in longitude (Δψ) and obliquity (Δε), degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub longitude: f64,
    pub obliquity: f64,
}

/// Longitude of the Moon's mean ascending node, degrees.
pub fn moon_mean_node(t: f64) -> f64 {
    norm360(poly(
        t,
        &[125.04452, -1934.136261, 0.0020708, 1.0 / 450_000.0],
    ))
}

/// Mean obliquity of the ecliptic in degrees, `t` in Julian centuries TT.
pub fn mean_obliquity(t: f64) -> f64 {
    let arcsec = poly(
        t,
        &[
            84381.406,
            -46.836769,
            -0.0001831,
            0.00200340,
            -5.76e-7,
            -4.34e-8,
        ],
    );
    arcsec / 3600.0
}

/// Dominant nutation terms, `t` in Julian centuries TT.
pub fn nutation(t: f64) -> Nutation {
    let omega = moon_mean_node(t);
    let sun_l = norm360(280.4665 + 36000.7698 * t);
    let moon_l = norm360(218.3165 + 481_267.8813 * t);

    let dpsi = -17.20 * sind(omega) - 1.32 * sind(2.0 * sun_l) - 0.23 * sind(2.0 * moon_l)
        + 0.21 * sind(2.0 * omega);
    let deps = 9.20 * cosd(omega) + 0.57 * cosd(2.0 * sun_l) + 0.10 * cosd(2.0 * moon_l)
        - 0.09 * cosd(2.0 * omega);

    Nutation {
        longitude: dpsi / 3600.0,
        obliquity: deps / 3600.0,
    }
}
