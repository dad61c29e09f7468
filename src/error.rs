//! Catalogue error taxonomy.
//!
//! End-of-stream and lookup misses are deliberately not errors: streams
//! signal exhaustion with a zero length and lookups return `None`.

use std::fmt;
use std::io;

use crate::config::ConfigError;

/// Failure modes for opening a catalogue source or building a catalogue.
#[derive(Debug)]
pub enum CatalogError {
    /// The source could not be opened or its size retrieved.
    Source(io::Error),
    /// The source has zero length; an empty catalogue is rejected outright.
    EmptySource,
    /// The source exceeds the maximum supported length.
    SourceTooLarge { len: u64, max: u64 },
    /// Arena growth or index allocation failed. The builder that reported
    /// this is terminal and must be discarded.
    OutOfMemory,
    /// Configuration rejected by `CatalogConfig::validate`.
    InvalidConfig(ConfigError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Source(err) => write!(f, "catalogue source unavailable: {err}"),
            CatalogError::EmptySource => write!(f, "catalogue source is empty"),
            CatalogError::SourceTooLarge { len, max } => {
                write!(f, "catalogue source too large ({len} bytes, max {max})")
            }
            CatalogError::OutOfMemory => write!(f, "catalogue allocation failed"),
            CatalogError::InvalidConfig(err) => write!(f, "invalid catalogue config: {err}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Source(err) => Some(err),
            CatalogError::InvalidConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for CatalogError {
    fn from(err: ConfigError) -> Self {
        CatalogError::InvalidConfig(err)
    }
}
