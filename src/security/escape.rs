//! SQL string-literal escaping.
//!
//! Backslash-escapes characters that can terminate or alter a quoted SQL
//! literal, MySQL style. This is text escaping only, not parameterization.

/// Escape SQL metacharacters and control characters in `input`.
///
/// # Examples
///
/// ```
/// use url_sanitizer::security::escape_sql_literal;
///
/// assert_eq!(escape_sql_literal("O'Brien"), r"O\'Brien");
/// assert_eq!(escape_sql_literal("50%"), r"50\%");
/// assert_eq!(escape_sql_literal("a\nb"), r"a\nb");
/// ```
pub fn escape_sql_literal(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\0' => escaped.push_str("\\0"),
            '\x08' => escaped.push_str("\\b"),
            '\t' => escaped.push_str("\\t"),
            '\x1a' => escaped.push_str("\\z"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '"' | '\'' | '\\' | '%' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverse [`escape_sql_literal`].
///
/// A backslash followed by a character outside the escape table is kept as
/// written, as is a trailing lone backslash.
pub fn unescape_sql_literal(input: &str) -> String {
    let mut unescaped = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => unescaped.push('\0'),
            Some('b') => unescaped.push('\x08'),
            Some('t') => unescaped.push('\t'),
            Some('z') => unescaped.push('\x1a'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some(next @ ('"' | '\'' | '\\' | '%')) => unescaped.push(next),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}
