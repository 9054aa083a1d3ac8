//! ΔT = TT − UT in seconds.
//!
//! Piecewise polynomials of Espenak & Meeus (NASA eclipse canon), one per
//! era, selected by decimal year. Eras are not blended; adjacent polynomials
//! can disagree by a few seconds at their shared boundary year.

use crate::math::poly;

/// First and last year covered by a fitted (non-extrapolated) polynomial.
pub const FITTED_RANGE: (f64, f64) = (-500.0, 2050.0);

/// Long-term parabola used outside the fitted eras.
fn long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// ΔT in seconds for a decimal year.
pub fn delta_t_seconds(year: f64) -> f64 {
    if year < -500.0 {
        long_term(year)
    } else if year < 500.0 {
        let u = year / 100.0;
        poly(
            u,
            &[
                10583.6,
                -1014.41,
                33.78311,
                -5.952053,
                -0.1798452,
                0.022174192,
                0.0090316521,
            ],
        )
    } else if year < 1600.0 {
        let u = (year - 1000.0) / 100.0;
        poly(
            u,
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
        )
    } else if year < 1700.0 {
        let t = year - 1600.0;
        poly(t, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0])
    } else if year < 1800.0 {
        let t = year - 1700.0;
        poly(t, &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0])
    } else if year < 1860.0 {
        let t = year - 1800.0;
        poly(
            t,
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
        )
    } else if year < 1900.0 {
        let t = year - 1860.0;
        poly(
            t,
            &[7.62, 0.5737, -0.251754, 0.01680668, -0.0004473624, 1.0 / 233_174.0],
        )
    } else if year < 1920.0 {
        let t = year - 1900.0;
        poly(t, &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197])
    } else if year < 1941.0 {
        let t = year - 1920.0;
        poly(t, &[21.20, 0.84493, -0.076100, 0.0020936])
    } else if year < 1961.0 {
        let t = year - 1950.0;
        poly(t, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
    } else if year < 1986.0 {
        let t = year - 1975.0;
        poly(t, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
    } else if year < 2005.0 {
        let t = year - 2000.0;
        poly(
            t,
            &[63.86, 0.3345, -0.060374, 0.0017275, 0.000651814, 0.00002373599],
        )
    } else if year < 2050.0 {
        let t = year - 2000.0;
        poly(t, &[62.92, 0.32217, 0.005589])
    } else if year < 2150.0 {
        long_term(year) - 0.5628 * (2150.0 - year)
    } else {
        long_term(year)
    }
}

/// Whether a year falls outside the fitted eras (accuracy degrades, no error).
pub fn is_extrapolated(year: f64) -> bool {
    year < FITTED_RANGE.0 || year >= FITTED_RANGE.1
}
