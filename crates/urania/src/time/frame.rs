use crate::time::delta_t::{delta_t_seconds, is_extrapolated};
use crate::time::julian::{centuries_since_j2000, decimal_year, julian_day_from_utc};
use crate::time::moment::{GeoLocation, Moment};
use crate::time::nutation::{mean_obliquity, nutation};
use crate::time::sidereal::{gast_deg, gmst_deg, local_sidereal_deg};
use serde::{Deserialize, Serialize};

/// Time scales, obliquity and sidereal time for one moment at one place.
///
/// Computed once per [`Moment`] and read-only afterwards; every engine takes
/// it by reference instead of recomputing from the civil date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub julian_day_ut: f64,
    pub julian_day_tt: f64,
    pub delta_t_seconds: f64,
    /// Julian centuries TT since J2000.0
    pub centuries: f64,
    pub mean_obliquity: f64,
    pub true_obliquity: f64,
    /// Nutation in longitude Δψ, degrees
    pub nutation_longitude: f64,
    /// Nutation in obliquity Δε, degrees
    pub nutation_obliquity: f64,
    pub gmst: f64,
    pub gast: f64,
    /// Local apparent sidereal time, degrees in [0, 360). Equal to ARMC.
    pub local_sidereal_time: f64,
    pub location: GeoLocation,
}

impl TimeFrame {
    pub fn new(moment: &Moment) -> Self {
        let utc = moment.utc();
        let year = decimal_year(utc);
        let delta_t = delta_t_seconds(year);
        if is_extrapolated(year) {
            log::warn!(
                "ΔT for year {:.1} is extrapolated ({:.1}s); positions lose accuracy",
                year,
                delta_t
            );
        }
        Self::from_julian_day(julian_day_from_utc(utc), delta_t, moment.location())
    }

    /// Build a frame directly from JD(UT) and a known ΔT.
    pub fn from_julian_day(julian_day_ut: f64, delta_t_seconds: f64, location: GeoLocation) -> Self {
        let julian_day_tt = julian_day_ut + delta_t_seconds / 86_400.0;
        let t = centuries_since_j2000(julian_day_tt);
        let eps0 = mean_obliquity(t);
        let nut = nutation(t);
        let true_obliquity = eps0 + nut.obliquity;

        let gmst = gmst_deg(julian_day_ut);
        let gast = gast_deg(julian_day_ut, nut.longitude, true_obliquity);
        let lst = local_sidereal_deg(gast, location.lon);

        Self {
            julian_day_ut,
            julian_day_tt,
            delta_t_seconds,
            centuries: t,
            mean_obliquity: eps0,
            true_obliquity,
            nutation_longitude: nut.longitude,
            nutation_obliquity: nut.obliquity,
            gmst,
            gast,
            local_sidereal_time: lst,
            location,
        }
    }

    /// The same place `days` later (negative for earlier), keeping ΔT fixed.
    pub fn shifted(&self, days: f64) -> Self {
        Self::from_julian_day(self.julian_day_ut + days, self.delta_t_seconds, self.location)
    }
}
