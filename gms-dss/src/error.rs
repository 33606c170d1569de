/// Error types for the decision support engine
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DssError {
    /// The well has no readings, so nothing can be derived from it
    #[error("Well series is empty; balance is not computable")]
    EmptySeries,

    /// A scenario parameter is outside its physical range
    #[error("Invalid scenario input {field}: {value}")]
    InvalidInput { field: &'static str, value: f64 },

    /// Forecast horizon outside the supported range
    #[error("Forecast horizon must be between 1 and {max} months, got {months}")]
    InvalidHorizon { months: u32, max: u32 },

    /// Crop, growth stage, soil or irrigation method not in the lookup tables
    #[error("Unsupported irrigation setting: {0}")]
    UnsupportedIrrigation(String),
}

/// Type alias for Results using DssError
pub type Result<T> = std::result::Result<T, DssError>;
