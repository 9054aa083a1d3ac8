//! Greenwich and local sidereal time, in degrees.

use crate::math::{cosd, norm360};
use crate::time::julian::{centuries_since_j2000, J2000_JD};

/// Greenwich Mean Sidereal Time from JD(UT), Meeus eq. 12.4.
///
/// Returns degrees in [0, 360).
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let t = centuries_since_j2000(jd_ut);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    norm360(theta)
}

/// Greenwich Apparent Sidereal Time: GMST plus the equation of the equinoxes.
pub fn gast_deg(jd_ut: f64, nutation_longitude: f64, true_obliquity: f64) -> f64 {
    norm360(gmst_deg(jd_ut) + nutation_longitude * cosd(true_obliquity))
}

/// Local sidereal time for an east-positive longitude.
pub fn local_sidereal_deg(greenwich_deg: f64, longitude_east: f64) -> f64 {
    norm360(greenwich_deg + longitude_east)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_12a() {
        // 1987-04-10 0h UT: GMST = 13h10m46.3668s = 197.693195°
        let gmst = gmst_deg(2_446_895.5);
        assert!((gmst - 197.693_195).abs() < 1e-5, "{gmst}");
    }

    #[test]
    fn meeus_example_12b() {
        // 1987-04-10 19:21:00 UT: GMST = 8h34m57.0896s = 128.737_873°
        let gmst = gmst_deg(2_446_896.306_25);
        assert!((gmst - 128.737_873).abs() < 1e-5, "{gmst}");
    }

    #[test]
    fn apparent_adds_equation_of_equinoxes() {
        // Δψ = -3.788″, ε = 23°26′36.85″ → eq. of equinoxes = -0.2317 s of time
        let gast = gast_deg(2_446_895.5, -3.788 / 3600.0, 23.443_57);
        let expected = 197.693_195 - 0.2317 * 15.0 / 3600.0;
        assert!((gast - expected).abs() < 1e-5);
    }

    #[test]
    fn local_wraps() {
        assert_eq!(local_sidereal_deg(350.0, 20.0), 10.0);
        assert_eq!(local_sidereal_deg(10.0, -20.0), 350.0);
    }
}
