//! Error types for trueno-area operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing area chart geometry.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (config files, SVG output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input that cannot be turned into finite, numeric geometry.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A series with no points reached the path generator.
    #[error("Series {0} has no data points")]
    EmptySeries(String),

    /// Scale domain error (e.g., log of non-positive value).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Unrecognized interpolation mode name.
    #[error("Unknown interpolation mode: {0}")]
    UnknownInterpolation(String),

    /// Style or chart configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_yaml_ng::Error> for Error {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Error::Config(err.to_string())
    }
}
