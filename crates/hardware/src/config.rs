//! Configuration for the reference simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline constants (1 KiB data memory, no cycle limit, tracing off).
//! 2. **Structures:** General settings and the data memory layout.
//! 3. **Loading:** JSON deserialization with per-field defaults and validation.
//!
//! Configuration is supplied as JSON (`rvgold --config sim.json`) or via `Config::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::DOUBLEWORD_BYTES;
use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Size of the data memory region in bytes.
    ///
    /// Effective addresses are reduced modulo this size before access.
    pub const MEMORY_SIZE: usize = 1024;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rvgold_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.general.trace_instructions);
/// assert_eq!(config.memory.size_bytes, 1024);
/// ```
///
/// Deserializing from JSON; omitted fields keep their defaults:
///
/// ```
/// use rvgold_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 10000 },
///     "memory": { "size_bytes": 4096 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, Some(10000));
/// assert!(!config.general.trace_instructions);
/// assert_eq!(config.memory.size_bytes, 4096);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] for malformed or unknown fields, or any [`Config::validate`] failure.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as [`Config::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidMemorySize`] if `memory.size_bytes` is less than 8. A smaller
    /// region overlaps itself on every doubleword access.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.size_bytes < DOUBLEWORD_BYTES {
            return Err(ConfigError::InvalidMemorySize(self.memory.size_bytes));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Log every retired instruction at debug level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Abort with [`SimError::CycleLimit`](crate::common::error::SimError::CycleLimit) after this
    /// many cycles. `None` runs until the halt sentinel.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Size of the byte-addressable data region; at least 8.
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default data memory size.
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: Self::default_size(),
        }
    }
}
