pub mod calculator;
pub mod types;

pub use calculator::{AspectCalculator, AspectHit};
pub use types::{AspectDefinition, AspectRecord, AspectTable};
