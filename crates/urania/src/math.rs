//! Degree-based angle helpers shared by every engine.

/// Normalize an angle to [0, 360).
pub fn norm360(deg: f64) -> f64 {
    let v = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if v >= 360.0 {
        0.0
    } else {
        v
    }
}

/// Normalize an angle difference to (-180, 180].
pub fn norm180(deg: f64) -> f64 {
    let v = norm360(deg);
    if v > 180.0 {
        v - 360.0
    } else {
        v
    }
}

pub fn sind(deg: f64) -> f64 {
    deg.to_radians().sin()
}

pub fn cosd(deg: f64) -> f64 {
    deg.to_radians().cos()
}

pub fn tand(deg: f64) -> f64 {
    deg.to_radians().tan()
}

pub fn asind(x: f64) -> f64 {
    x.asin().to_degrees()
}

pub fn atan2d(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Round an angle in degrees to a multiple of `arcsec` arcseconds.
pub fn round_to_arcsec(deg: f64, arcsec: f64) -> f64 {
    let k = 3600.0 / arcsec;
    (deg * k).round() / k
}

/// Minimal separation between two longitudes, in [0, 180].
pub fn separation(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Evaluate a polynomial with coefficients in ascending power order.
pub fn poly(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
