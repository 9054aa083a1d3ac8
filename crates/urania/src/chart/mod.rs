pub mod data;
pub mod engine;
pub mod request;
pub mod settings;

pub use data::{AnglesRecord, AspectOutput, BodyRecord, ChartRecord, HouseCuspRecord, HousesRecord, ZodiacPoint};
pub use engine::ChartEngine;
pub use request::{ChartRequest, ValidatedRequest};
pub use settings::ChartSettings;
