//! Security module for SQL-defensive escaping and injection detection.

mod escape;
mod injection;
mod sanitizer;

pub use escape::{escape_sql_literal, unescape_sql_literal};
pub use injection::{detect_injection, matched_patterns};
pub use sanitizer::{sanitize_sql_injection, SqlSanitizer};
