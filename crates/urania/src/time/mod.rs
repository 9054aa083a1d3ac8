//! Time and coordinate primitives: Julian Day, ΔT, obliquity, nutation and
//! sidereal time, bundled per moment into a [`TimeFrame`].

pub mod delta_t;
pub mod frame;
pub mod julian;
pub mod moment;
pub mod nutation;
pub mod sidereal;
pub mod zone;

pub use frame::TimeFrame;
pub use moment::{parse_date, parse_time, GeoLocation, Moment};
pub use zone::{parse_zone, FixedZone, NamedZone, NoZone, ZoneResolver};
