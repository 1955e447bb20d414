//! Configuration management for the URL sanitizer.
//!
//! Configuration is loaded from environment variables following the 12-factor app pattern.

use crate::constants::{DEFAULT_MAX_INPUT_BYTES, ENV_INJECTION_WARNINGS, ENV_MAX_INPUT_BYTES};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Sanitizer configuration
    pub sanitizer: SanitizerConfig,

    /// Input limits for the command-line front end
    pub limits: LimitsConfig,
}

/// Sanitizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizerConfig {
    /// Log a warning when decoded text looks like SQL
    pub warn_on_injection: bool,
}

/// Input limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted input length (bytes)
    pub max_input_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `URL_SANITIZER_INJECTION_WARNINGS`: Warn on SQL-looking input (default: true)
    /// - `URL_SANITIZER_MAX_INPUT_BYTES`: Maximum input length (default: 1048576)
    pub fn from_env() -> Result<Self, CodecError> {
        let warn_on_injection = std::env::var(ENV_INJECTION_WARNINGS)
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let max_input_bytes = match std::env::var(ENV_MAX_INPUT_BYTES) {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                CodecError::config(format!(
                    "{} must be a non-negative integer, got '{}'",
                    ENV_MAX_INPUT_BYTES, raw
                ))
            })?,
            Err(_) => DEFAULT_MAX_INPUT_BYTES,
        };

        Ok(Config {
            sanitizer: SanitizerConfig { warn_on_injection },
            limits: LimitsConfig { max_input_bytes },
        })
    }

    /// Reject `input` if it exceeds the configured size limit.
    pub fn check_input_len(&self, input: &str) -> Result<(), CodecError> {
        if input.len() > self.limits.max_input_bytes {
            return Err(CodecError::input_too_large(
                self.limits.max_input_bytes,
                input.len(),
            ));
        }
        Ok(())
    }
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            warn_on_injection: true,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}
