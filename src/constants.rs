//! Centralized constants for the URL sanitizer.
//!
//! This module contains the character sets, environment variable names and
//! default values used throughout the codebase.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// =============================================================================
// Encoding Character Sets
// =============================================================================

/// Characters escaped by [`crate::encoding::encode`].
///
/// Starts from every non-alphanumeric ASCII byte, keeps the unreserved marks
/// `- _ . ~` literal, and leaves the query-friendly punctuation
/// `` # $ & + : < = > ? @ [ ] ^ ` { | } `` unescaped. The marks `! ' ( ) *`
/// stay in the set, so they are always written as `%XX`.
pub static URL_COMPONENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    // unreserved
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    // %23 %24 %26 %2B
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    // %3A %3C %3D %3E %3F
    .remove(b':')
    .remove(b'<')
    .remove(b'=')
    .remove(b'>')
    .remove(b'?')
    // %40
    .remove(b'@')
    // %5B %5D %5E
    .remove(b'[')
    .remove(b']')
    .remove(b'^')
    // %60
    .remove(b'`')
    // %7B %7C %7D
    .remove(b'{')
    .remove(b'|')
    .remove(b'}');

/// Marks that a plain URI-component encoder leaves alone but we escape.
pub const STRICT_RESERVED_MARKS: [char; 5] = ['!', '\'', '(', ')', '*'];

// =============================================================================
// Query String Syntax
// =============================================================================

/// Separator between query pairs.
pub const PAIR_SEPARATOR: &str = "&";

/// Separator between a key and its value.
pub const KEY_VALUE_SEPARATOR: &str = "=";

/// Optional prefix stripped from query strings before parsing.
pub const QUERY_PREFIX: &str = "?";

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable toggling injection warnings.
pub const ENV_INJECTION_WARNINGS: &str = "URL_SANITIZER_INJECTION_WARNINGS";

/// Environment variable bounding CLI input size.
pub const ENV_MAX_INPUT_BYTES: &str = "URL_SANITIZER_MAX_INPUT_BYTES";

/// Default maximum CLI input size (1 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,url_sanitizer=info";
