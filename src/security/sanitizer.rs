//! SQL-defensive sanitization of decoded text.

use super::escape::escape_sql_literal;
use super::injection::{detect_injection, matched_patterns};
use tracing::warn;

/// Escapes SQL metacharacters and warns about SQL-looking input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlSanitizer {
    /// Whether a warning is emitted when a suspicious pattern matches
    warn_on_injection: bool,
}

impl SqlSanitizer {
    /// Create a new sanitizer.
    pub fn new(warn_on_injection: bool) -> Self {
        Self { warn_on_injection }
    }

    /// Whether this sanitizer emits injection warnings.
    pub fn warns_on_injection(&self) -> bool {
        self.warn_on_injection
    }

    /// Escape `input` and, if it matches a suspicious pattern, log one warning.
    ///
    /// Detection runs against the original input and never affects the
    /// returned value.
    pub fn sanitize(&self, input: &str) -> String {
        let sanitized = escape_sql_literal(input);

        if self.warn_on_injection {
            let patterns = matched_patterns(input);
            if !patterns.is_empty() {
                warn!(
                    ?patterns,
                    "Potential SQL injection attempt detected: {}", input
                );
            }
        }

        sanitized
    }

    /// Check `input` against the suspicious patterns without logging.
    pub fn inspect(&self, input: &str) -> Option<&'static str> {
        detect_injection(input)
    }
}

impl Default for SqlSanitizer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Sanitize `input` with the default sanitizer (warnings enabled).
///
/// # Examples
///
/// ```
/// use url_sanitizer::security::sanitize_sql_injection;
///
/// assert_eq!(sanitize_sql_injection("1; DROP TABLE users;--"), "1; DROP TABLE users;--");
/// assert_eq!(sanitize_sql_injection("' OR ''='"), r"\' OR \'\'=\'");
/// ```
pub fn sanitize_sql_injection(input: &str) -> String {
    SqlSanitizer::default().sanitize(input)
}
