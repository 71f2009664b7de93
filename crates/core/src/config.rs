//! Configuration for interpreter runs.
//!
//! This module defines the configuration structures used by the front end.
//! It provides:
//! 1. **Defaults:** Register counts, ambiguity threshold and run limits.
//! 2. **Structures:** General, execution and solver sections.
//! 3. **Loading:** JSON parsing via `serde_json`, with every field optional.
//!
//! Use `Config::default()` when no configuration file is given.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::common::Word;
use crate::sim::{Signature, Watch};

/// Default configuration constants.
mod defaults {
    use crate::common::constants;

    /// Registers in a machine whose program binds the instruction pointer.
    pub const REGISTER_COUNT: usize = constants::DEFAULT_REGISTER_COUNT;

    /// Candidate count at which a sample is reported as ambiguous.
    pub const AMBIGUITY_THRESHOLD: usize = constants::AMBIGUITY_THRESHOLD;
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read config `{path}`: {source}")]
    Io {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but makes no sense.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Register file and tracing options.
    pub general: GeneralConfig,
    /// Step limit and cycle watch.
    pub execution: ExecutionConfig,
    /// Opcode identification options.
    pub solver: SolverConfig,
}

impl Config {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON or unknown fields, and
    /// [`ConfigError::Invalid`] for a zero register count.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Zero-initialized registers sized by `general.register_count`.
    pub fn initial_registers(&self) -> Vec<Word> {
        vec![0; self.general.register_count]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.general.register_count == 0 {
            return Err(ConfigError::Invalid(
                "general.register_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Registers in the machine when no initial values are given.
    pub register_count: usize,
    /// Log every executed instruction.
    pub trace: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            register_count: defaults::REGISTER_COUNT,
            trace: false,
        }
    }
}

/// Execution limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Stop after this many instructions.
    pub max_steps: Option<u64>,
    /// Watch an address for repeating register signatures.
    pub watch: Option<WatchConfig>,
}

/// Cycle-detection watch settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Instruction address to watch.
    pub address: Word,
    /// Registers forming the signature; empty means all of them.
    #[serde(default)]
    pub registers: Vec<usize>,
}

impl WatchConfig {
    /// Builds the watch, capped by `max_steps` if given.
    pub fn to_watch(&self, max_steps: Option<u64>) -> Watch {
        let signature = if self.registers.is_empty() {
            Signature::AllRegisters
        } else {
            Signature::Registers(self.registers.clone())
        };
        Watch {
            address: self.address,
            signature,
            step_limit: max_steps,
        }
    }
}

/// Opcode identification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Candidate count at which a sample is reported as ambiguous.
    pub ambiguity_threshold: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            ambiguity_threshold: defaults::AMBIGUITY_THRESHOLD,
        }
    }
}
