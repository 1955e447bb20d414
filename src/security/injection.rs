//! SQL injection pattern detection.
//!
//! Flags input that looks like SQL statement text. Detection is advisory: the
//! caller decides whether to warn, and sanitization continues either way.

use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled regex patterns for suspicious SQL text.
///
/// These patterns are compiled once at first use (lazy static) for performance.
/// All patterns are hardcoded constants that have been verified to be valid regex.
static INJECTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    // Helper to compile regex with better error message on failure.
    // These should never fail since patterns are hardcoded and tested.
    fn compile(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap_or_else(|e| {
            panic!("Internal error: invalid regex pattern '{}': {}", pattern, e)
        })
    }

    vec![
        (
            // ASCII-only word boundaries and case folding
            compile(r"(?i-u:\b(SELECT|INSERT|UPDATE|DELETE|DROP|UNION|ALTER|CREATE|WHERE|FROM)\b)"),
            "SQL keyword",
        ),
        (compile(r"'(''|[^'])*'"), "Quoted string literal"),
        (compile(r";"), "Statement terminator"),
        (compile(r"--"), "SQL line comment"),
        (compile(r"/\*"), "SQL block comment start"),
        (compile(r"\*/"), "SQL block comment end"),
        (compile(r"xp_"), "Extended stored procedure prefix"),
    ]
});

/// Return the description of the first pattern that matches `input`.
pub fn detect_injection(input: &str) -> Option<&'static str> {
    INJECTION_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(input))
        .map(|(_, description)| *description)
}

/// Return the descriptions of every pattern that matches `input`.
pub fn matched_patterns(input: &str) -> Vec<&'static str> {
    INJECTION_PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(input))
        .map(|(_, description)| *description)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input() {
        assert_eq!(detect_injection("hello world"), None);
        assert_eq!(detect_injection("john.doe@example.com"), None);
        assert_eq!(detect_injection("O'Brien"), None); // lone quote is not a literal
        assert_eq!(detect_injection(""), None);
    }

    #[test]
    fn test_keyword_detection() {
        assert_eq!(detect_injection("select * from users"), Some("SQL keyword"));
        assert_eq!(detect_injection("Drop me a line"), Some("SQL keyword"));
        // Word boundaries: embedded keywords do not match
        assert_eq!(detect_injection("selection"), None);
        assert_eq!(detect_injection("updated_at"), None);
        assert_eq!(detect_injection("fromage"), None);
    }

    #[test]
    fn test_keyword_boundaries_are_ascii() {
        // Non-ASCII letters are not word characters
        assert_eq!(detect_injection("éDROP"), Some("SQL keyword"));
        assert_eq!(detect_injection("DROPé"), Some("SQL keyword"));
        // Long s does not case-fold to 's'
        assert_eq!(detect_injection("ſelect"), None);
    }

    #[test]
    fn test_quoted_literal() {
        assert_eq!(detect_injection("name='x'"), Some("Quoted string literal"));
        assert_eq!(detect_injection("'it''s'"), Some("Quoted string literal"));
    }

    #[test]
    fn test_punctuation_patterns() {
        assert_eq!(detect_injection("a;b"), Some("Statement terminator"));
        assert_eq!(detect_injection("a -- b"), Some("SQL line comment"));
        assert_eq!(detect_injection("a /* b"), Some("SQL block comment start"));
        assert_eq!(detect_injection("a */ b"), Some("SQL block comment end"));
        assert_eq!(
            detect_injection("exec xp_cmdshell"),
            Some("Extended stored procedure prefix")
        );
        // Prefix check is case-sensitive
        assert_eq!(detect_injection("XP_CMDSHELL"), None);
    }

    #[test]
    fn test_matched_patterns_reports_all() {
        let found = matched_patterns("1; DROP TABLE users;--");
        assert_eq!(
            found,
            vec!["SQL keyword", "Statement terminator", "SQL line comment"]
        );
        assert!(matched_patterns("plain").is_empty());
    }
}
