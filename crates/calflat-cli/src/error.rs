//! CLI error types.

use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// Calendar conversion failed.
    Convert(calflat_ical::ConvertError),
    /// CSV serialization failed.
    Csv(csv::Error),
    /// The timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// The expansion window settings are unusable.
    InvalidWindow(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Convert(err) => write!(f, "conversion failed: {}", err),
            Self::Csv(err) => write!(f, "CSV write failed: {}", err),
            Self::InvalidTimezone(name) => write!(f, "unknown timezone: {}", name),
            Self::InvalidWindow(msg) => write!(f, "invalid window: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Convert(err) => Some(err),
            Self::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<calflat_ical::ConvertError> for CliError {
    fn from(err: calflat_ical::ConvertError) -> Self {
        Self::Convert(err)
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
