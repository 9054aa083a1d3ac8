use crate::error::Result;
use crate::houses::placidus::placidus_cusps;
use crate::houses::types::{Angles, HouseCuspSet, HouseSystem};
use crate::math::norm360;
use crate::time::TimeFrame;

/// Twelve 30° houses from the Ascendant.
pub fn equal_cusps(angles: &Angles) -> [f64; 12] {
    std::array::from_fn(|i| norm360(angles.ascendant + i as f64 * 30.0))
}

/// Twelve 30° houses from the start of the rising sign.
pub fn whole_sign_cusps(angles: &Angles) -> [f64; 12] {
    let first = (angles.ascendant / 30.0).floor() * 30.0;
    std::array::from_fn(|i| norm360(first + i as f64 * 30.0))
}

/// Koch approximated by equal ecliptic thirds of each quadrant.
///
/// Houses 11/12 split MC→Ascendant, houses 2/3 split Ascendant→IC, and the
/// opposite houses are their antipodes. This is not the spherical Koch
/// construction on the birthplace's semi-arcs.
pub fn koch_cusps(angles: &Angles) -> [f64; 12] {
    let upper = norm360(angles.ascendant - angles.midheaven);
    let lower = norm360(angles.imum_coeli - angles.ascendant);
    let c11 = norm360(angles.midheaven + upper / 3.0);
    let c12 = norm360(angles.midheaven + 2.0 * upper / 3.0);
    let c2 = norm360(angles.ascendant + lower / 3.0);
    let c3 = norm360(angles.ascendant + 2.0 * lower / 3.0);
    let opp = |x: f64| norm360(x + 180.0);
    [
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
    ]
}

/// Computes angles and cusps for a selectable house system
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseSolver;

impl HouseSolver {
    pub fn new() -> Self {
        Self
    }

    /// Cusps for precomputed angles.
    pub fn cusps_for(&self, angles: Angles, system: HouseSystem) -> Result<HouseCuspSet> {
        let cusps = match system {
            HouseSystem::Placidus => placidus_cusps(&angles)?,
            HouseSystem::Koch => koch_cusps(&angles),
            HouseSystem::Equal => equal_cusps(&angles),
            HouseSystem::WholeSign => whole_sign_cusps(&angles),
        };
        Ok(HouseCuspSet::from_longitudes(system, cusps, angles))
    }

    /// Calculate house cusps and angles
    pub fn calculate(&self, frame: &TimeFrame, system: HouseSystem) -> Result<HouseCuspSet> {
        self.cusps_for(Angles::from_frame(frame), system)
    }
}
