//! Catalogue limits and tuning.
//!
//! # Invariants
//! - All limits are hard bounds and must be internally consistent.
//! - Catalogue text is untrusted input: line lengths and source sizes are
//!   bounded by this config, never by the data itself.
//!
//! # Design Notes
//! - Defaults mirror the on-disk catalogue format this crate consumes: a
//!   4 KiB read-ahead window, 260-byte names, sources up to 4 GiB.
//! - Limits are shared by the stream and builder layers to keep behavior
//!   consistent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::max_record_len;

/// Shared configuration for catalogue streaming and building.
///
/// All limits are hard bounds. Callers should `validate()` once at startup;
/// a rejected config is a configuration bug, not hostile input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Capacity of the read-ahead window over a byte source, in bytes.
    pub window_capacity: usize,
    /// Maximum stored length of a single name, in bytes. Longer lines are
    /// truncated before insertion.
    pub max_name_len: usize,
    /// Initial arena capacity reserved by a builder, in bytes.
    pub arena_initial_capacity: usize,
    /// Maximum supported catalogue source length, in bytes.
    pub max_source_len: u64,
}

/// Validation error returned by `CatalogConfig::validate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    WindowCapacityZero,
    MaxNameLenZero,
    MaxSourceLenZero,
    ArenaTooSmall { needed: usize, configured: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WindowCapacityZero => {
                write!(f, "window_capacity must be > 0")
            }
            ConfigError::MaxNameLenZero => {
                write!(f, "max_name_len must be > 0")
            }
            ConfigError::MaxSourceLenZero => {
                write!(f, "max_source_len must be > 0")
            }
            ConfigError::ArenaTooSmall { needed, configured } => write!(
                f,
                "arena_initial_capacity must hold one maximal record (needed={needed}, configured={configured})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            window_capacity: 4096,
            max_name_len: 260,
            arena_initial_capacity: 1024 * 1024, // 1 MiB
            max_source_len: u32::MAX as u64,     // 4 GiB
        }
    }
}

impl CatalogConfig {
    /// Validate cross-field invariants.
    ///
    /// Cheap; intended to be called once before streaming or building.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_capacity == 0 {
            return Err(ConfigError::WindowCapacityZero);
        }
        if self.max_name_len == 0 {
            return Err(ConfigError::MaxNameLenZero);
        }
        if self.max_source_len == 0 {
            return Err(ConfigError::MaxSourceLenZero);
        }
        let needed = max_record_len(self.max_name_len);
        if self.arena_initial_capacity < needed {
            return Err(ConfigError::ArenaTooSmall {
                needed,
                configured: self.arena_initial_capacity,
            });
        }
        Ok(())
    }
}
