//! # URL Sanitizer
//!
//! Percent-encoding for URL components and query strings, with decoding that
//! applies SQL-defensive escaping to everything it returns.
//!
//! This crate provides:
//! - **Encoding**: [`encode`] escapes `! ' ( ) *` on top of the usual reserved
//!   set but keeps query-friendly punctuation such as `$ & = @` literal
//! - **Decoding**: [`decode`] percent-decodes, then escapes SQL metacharacters
//! - **Query strings**: [`encode_query_params`] / [`decode_query_params`] with
//!   repeated keys collected into ordered sequences
//! - **Diagnostics**: SQL-looking input is reported through `tracing` at WARN
//!
//! The SQL escaping is a text-level mitigation. It is not a replacement for
//! parameterized queries.

pub mod codec;
pub mod config;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod query;
pub mod security;

pub use codec::UrlCodec;
pub use config::Config;
pub use encoding::{decode, encode};
pub use error::CodecError;
pub use query::{
    decode_query_params, encode_query_params, encode_query_params_json, QueryParams, QueryValue,
};
pub use security::sanitize_sql_injection;
