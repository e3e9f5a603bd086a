//! Error types for simgeo

use std::fmt;
use std::io;

/// Result type for simgeo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting coordinates
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Malformed scenario file
    Json(serde_json::Error),

    /// Malformed waypoint CSV
    Csv(csv::Error),

    /// Unusable configuration (unknown reference system, bad correction parameters)
    Configuration(String),

    /// Coordinate outside its valid range or not finite
    InvalidInput(String),

    /// Projection error
    Projection(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Json(e) => write!(f, "Invalid scenario file: {}", e),
            Error::Csv(e) => write!(f, "CSV error: {}", e),
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Projection(msg) => write!(f, "Projection error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error)
    }
}
