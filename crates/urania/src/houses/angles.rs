//! Ascendant and Midheaven from apparent sidereal time and true obliquity.

use crate::houses::types::Angles;
use crate::math::{atan2d, cosd, norm360, sind, tand};
use crate::time::TimeFrame;

/// Ecliptic longitude rising on the eastern horizon.
pub fn ascendant(armc: f64, obliquity: f64, latitude: f64) -> f64 {
    let y = -cosd(armc);
    let x = sind(armc) * cosd(obliquity) + tand(latitude) * sind(obliquity);
    norm360(atan2d(y, x) + 180.0)
}

/// Ecliptic longitude culminating on the meridian.
pub fn midheaven(armc: f64, obliquity: f64) -> f64 {
    norm360(atan2d(sind(armc), cosd(armc) * cosd(obliquity)))
}

impl Angles {
    pub fn new(armc: f64, obliquity: f64, latitude: f64) -> Self {
        let ascendant = ascendant(armc, obliquity, latitude);
        let midheaven = midheaven(armc, obliquity);
        Self {
            ascendant,
            midheaven,
            descendant: norm360(ascendant + 180.0),
            imum_coeli: norm360(midheaven + 180.0),
            armc: norm360(armc),
            obliquity,
            latitude,
        }
    }

    /// Angles for the frame's local apparent sidereal time and true obliquity.
    pub fn from_frame(frame: &TimeFrame) -> Self {
        Self::new(
            frame.local_sidereal_time,
            frame.true_obliquity,
            frame.location.lat,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equator_at_zero_sidereal_time() {
        let a = Angles::new(0.0, 23.44, 0.0);
        assert!(a.midheaven.abs() < 1e-9);
        assert!((a.ascendant - 90.0).abs() < 1e-9);
        assert!((a.descendant - 270.0).abs() < 1e-9);
        assert!((a.imum_coeli - 180.0).abs() < 1e-9);
    }

    #[test]
    fn mid_latitude_table_value() {
        // RAMC 0°, latitude 40°N: Ascendant 18°27′ Cancer
        let a = Angles::new(0.0, 23.44, 40.0);
        assert!((a.ascendant - 108.458).abs() < 0.01, "{}", a.ascendant);
    }

    #[test]
    fn ascendant_runs_ahead_of_midheaven() {
        for lst in (0..360).step_by(15) {
            let a = Angles::new(lst as f64, 23.44, 51.5);
            let arc = norm360(a.ascendant - a.midheaven);
            assert!(arc > 0.0 && arc < 180.0, "lst {lst}: arc {arc}");
        }
    }
}
