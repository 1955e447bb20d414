//! Error types for the URL sanitizer.
//!
//! Every failure surfaces to the caller. SQL pattern detection never produces
//! an error; it only emits a warning.

use thiserror::Error;

/// Errors raised by the encoding, decoding and query operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// An argument had the wrong shape at a dynamically-typed boundary
    #[error("Invalid argument: {0}")]
    TypeArgument(String),

    /// Malformed percent-escape or invalid UTF-8 after decoding
    #[error("Decoding error at byte {position}: {message}")]
    Decoding { message: String, position: usize },

    /// Input longer than the configured limit
    #[error("Input too large: {actual} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { limit: usize, actual: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CodecError {
    /// Create a type argument error.
    pub fn type_argument(msg: impl Into<String>) -> Self {
        Self::TypeArgument(msg.into())
    }

    /// Create a decoding error at the given byte offset.
    pub fn decoding(msg: impl Into<String>, position: usize) -> Self {
        Self::Decoding {
            message: msg.into(),
            position,
        }
    }

    /// Create an input size error.
    pub fn input_too_large(limit: usize, actual: usize) -> Self {
        Self::InputTooLarge { limit, actual }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Get a user-friendly suggestion for how to fix this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::TypeArgument(_) => {
                Some("Pass a string, or a JSON object of strings, numbers, booleans or arrays")
            }
            Self::Decoding { .. } => {
                Some("Every '%' must be followed by two hex digits forming valid UTF-8")
            }
            Self::InputTooLarge { .. } => {
                Some("Shorten the input or raise URL_SANITIZER_MAX_INPUT_BYTES")
            }
            Self::Config(_) => Some("Check your environment variables and configuration"),
        }
    }
}
