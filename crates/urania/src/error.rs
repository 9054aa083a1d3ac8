use thiserror::Error;

/// Errors that can occur while building a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
    #[error("Unknown body: {name}. Valid bodies: {valid:?}")]
    UnknownBody { name: String, valid: Vec<String> },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    UnknownHouseSystem { system: String, valid: Vec<String> },
    #[error("Could not resolve local time {local} at ({latitude}, {longitude}): {message}")]
    LocationTime {
        local: String,
        latitude: f64,
        longitude: f64,
        message: String,
    },
    #[error(
        "Placidus cusp of house {house} is undefined at latitude {latitude}° (declination {declination:.4}°)"
    )]
    CircumpolarHouse {
        house: u8,
        latitude: f64,
        declination: f64,
    },
    #[error("{what} did not converge after {iterations} iterations (residual {residual:e})")]
    NumericalNonConvergence {
        what: String,
        iterations: usize,
        residual: f64,
    },
    #[error("Malformed ephemeris row: {message}")]
    EphemerisRow { message: String },
}

impl ChartError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ChartError::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
