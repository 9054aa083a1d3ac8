//! Astronomical chart engine: body positions, house cusps and aspects for a
//! civil date, time and place.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod math;
pub mod time;
pub mod zodiac;

pub use chart::{ChartEngine, ChartRecord, ChartRequest, ChartSettings};
pub use error::{ChartError, Result};
