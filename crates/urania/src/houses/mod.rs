//! House cusps and chart angles.

pub mod angles;
pub mod placidus;
pub mod systems;
pub mod types;

pub use systems::HouseSolver;
pub use types::{Angles, HouseCuspSet, HouseSystem};
