//! Configured entry point bundling the encoding and query operations.

use crate::config::SanitizerConfig;
use crate::encoding::{decode_with, encode};
use crate::error::CodecError;
use crate::query::{
    decode_query_params_with, encode_query_params, encode_query_params_json, QueryParams,
};
use crate::security::SqlSanitizer;
use serde_json::Value;

/// URL codec with a configured SQL sanitizer.
///
/// The free functions in [`crate::encoding`] and [`crate::query`] behave like
/// `UrlCodec::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlCodec {
    sanitizer: SqlSanitizer,
}

impl UrlCodec {
    /// Create a codec from sanitizer configuration.
    pub fn new(config: SanitizerConfig) -> Self {
        Self {
            sanitizer: SqlSanitizer::new(config.warn_on_injection),
        }
    }

    /// The sanitizer used when decoding.
    pub fn sanitizer(&self) -> &SqlSanitizer {
        &self.sanitizer
    }

    /// Percent-encode a URL component.
    pub fn encode(&self, input: &str) -> String {
        encode(input)
    }

    /// Percent-decode and sanitize a URL component.
    pub fn decode(&self, input: &str) -> Result<String, CodecError> {
        decode_with(input, &self.sanitizer)
    }

    /// Escape SQL metacharacters without decoding.
    pub fn sanitize(&self, input: &str) -> String {
        self.sanitizer.sanitize(input)
    }

    /// Build a query string.
    pub fn encode_query_params(&self, params: &QueryParams) -> String {
        encode_query_params(params)
    }

    /// Build a query string from a JSON object.
    pub fn encode_query_params_json(&self, params: &Value) -> Result<String, CodecError> {
        encode_query_params_json(params)
    }

    /// Parse a query string.
    pub fn decode_query_params(&self, query: &str) -> Result<QueryParams, CodecError> {
        decode_query_params_with(query, &self.sanitizer)
    }
}
