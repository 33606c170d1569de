/// Error types for the groundwater core library
use thiserror::Error;

/// Failure to obtain a well's history from an upstream provider.
///
/// Kept distinct from an empty series: an empty but valid response is `Ok`.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The provider has no well with this identifier
    #[error("Well not found: {0}")]
    NotFound(String),

    /// The provider could not be reached or answered with a failure status
    #[error("Well history unavailable: {0}")]
    Unavailable(String),

    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be interpreted as a well history
    #[error("Malformed well history payload: {0}")]
    Malformed(String),
}

/// Errors raised while loading reference data.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to read a file
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is missing from a CSV header
    #[error("Missing column in CSV header: {0}")]
    MissingColumn(String),
}

/// Type alias for Results using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
