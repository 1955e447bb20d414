//! Percent-encoding and SQL-defensive percent-decoding of URL components.
//!
//! [`encode`] is stricter than a plain URI-component encoder for `! ' ( ) *`
//! and more permissive for the query-friendly punctuation listed on
//! [`URL_COMPONENT_ENCODE_SET`]. [`decode`] always sanitizes its output, so
//! `decode(encode(s))` is `s` only when `s` holds no SQL metacharacters.

use crate::constants::URL_COMPONENT_ENCODE_SET;
use crate::error::CodecError;
use crate::security::SqlSanitizer;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use tracing::debug;

/// Percent-encode `input` for use in a URL component.
///
/// # Examples
///
/// ```
/// use url_sanitizer::encoding::encode;
///
/// assert_eq!(encode("hello world"), "hello%20world");
/// assert_eq!(encode("it's (fine)!"), "it%27s%20%28fine%29%21");
/// assert_eq!(encode("a=b&c"), "a=b&c");
/// ```
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, &URL_COMPONENT_ENCODE_SET).to_string()
}

/// Percent-decode `input` and sanitize the result with the default sanitizer.
///
/// # Errors
///
/// Returns [`CodecError::Decoding`] if a `%` is not followed by two hex
/// digits, or if the decoded bytes are not valid UTF-8.
pub fn decode(input: &str) -> Result<String, CodecError> {
    decode_with(input, &SqlSanitizer::default())
}

/// Percent-decode `input` and sanitize the result with `sanitizer`.
pub fn decode_with(input: &str, sanitizer: &SqlSanitizer) -> Result<String, CodecError> {
    let decoded = percent_decode_component(input)?;
    Ok(sanitizer.sanitize(&decoded))
}

/// Strictly percent-decode `input` without sanitizing.
///
/// `+` is left as is; it does not stand for a space in a URL component.
pub fn percent_decode_component(input: &str) -> Result<String, CodecError> {
    validate_escapes(input)?;

    percent_decode_str(input)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            debug!(input, "Percent-decoded bytes are not valid UTF-8");
            CodecError::decoding(
                "percent-escapes do not form valid UTF-8",
                e.valid_up_to(),
            )
        })
}

/// Reject any `%` that does not start a two-hex-digit escape.
fn validate_escapes(input: &str) -> Result<(), CodecError> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let well_formed = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if !well_formed {
            debug!(input, position = i, "Malformed percent-escape");
            return Err(CodecError::decoding("malformed percent-escape", i));
        }
        i += 3;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STRICT_RESERVED_MARKS;
    use crate::security::unescape_sql_literal;

    /// Plain URI-component encoding: alphanumerics and `-_.!~*'()` unescaped.
    fn standard_component_encode(input: &str) -> String {
        let mut out = String::new();
        for b in input.bytes() {
            match b {
                b'A'..=b'Z'
                | b'a'..=b'z'
                | b'0'..=b'9'
                | b'-'
                | b'_'
                | b'.'
                | b'!'
                | b'~'
                | b'*'
                | b'\''
                | b'('
                | b')' => out.push(b as char),
                _ => out.push_str(&format!("%{:02X}", b)),
            }
        }
        out
    }

    const ALLOWLISTED: &str = "#$&+:<=>?@[]^`{|}";

    #[test]
    fn test_encode_unreserved_passthrough() {
        assert_eq!(encode("AZaz09-_.~"), "AZaz09-_.~");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_encode_strict_marks() {
        assert_eq!(encode("!"), "%21");
        assert_eq!(encode("'"), "%27");
        assert_eq!(encode("("), "%28");
        assert_eq!(encode(")"), "%29");
        assert_eq!(encode("*"), "%2A");
    }

    #[test]
    fn test_encode_allowlisted_punctuation_literal() {
        assert_eq!(encode(ALLOWLISTED), ALLOWLISTED);
    }

    #[test]
    fn test_encode_other_reserved() {
        assert_eq!(encode(" "), "%20");
        assert_eq!(encode("%"), "%25");
        assert_eq!(encode("/"), "%2F");
        assert_eq!(encode(","), "%2C");
        assert_eq!(encode(";"), "%3B");
        assert_eq!(encode("\""), "%22");
        assert_eq!(encode("\\"), "%5C");
        assert_eq!(encode("\n"), "%0A");
    }

    #[test]
    fn test_encode_escaped_percent_not_restored() {
        // "%24" must stay encoded as "%2524", not collapse to "$"
        assert_eq!(encode("%24"), "%2524");
    }

    #[test]
    fn test_encode_unicode_uppercase_hex() {
        assert_eq!(encode("é"), "%C3%A9");
        assert_eq!(encode("日本"), "%E6%97%A5%E6%9C%AC");
        assert_eq!(encode("😀"), "%F0%9F%98%80");
    }

    #[test]
    fn test_encode_never_emits_strict_marks() {
        let samples = ["!'()*", "don't (ever) do *that*!", "((()))", "a*b!c"];
        for s in samples {
            let encoded = encode(s);
            for mark in STRICT_RESERVED_MARKS {
                assert!(!encoded.contains(mark), "{encoded}");
            }
        }
    }

    #[test]
    fn test_encode_matches_standard_outside_allowlist() {
        // Every printable ASCII char except the strict marks and the allowlist
        let sample: String = (0x20u8..0x7f)
            .map(char::from)
            .filter(|c| !STRICT_RESERVED_MARKS.contains(c) && !ALLOWLISTED.contains(*c))
            .collect();
        assert_eq!(encode(&sample), standard_component_encode(&sample));
    }

    #[test]
    fn test_encode_is_standard_plus_adjustments() {
        // Standard encoding, then strict marks escaped, then allowlist restored
        for c in (0x20u8..0x7f).map(char::from) {
            let s = c.to_string();
            let expected = if STRICT_RESERVED_MARKS.contains(&c) {
                format!("%{:02X}", c as u8)
            } else if ALLOWLISTED.contains(c) {
                s.clone()
            } else {
                standard_component_encode(&s)
            };
            assert_eq!(encode(&s), expected, "{c:?}");
        }
    }

    #[test]
    fn test_decode_plain() {
        assert_eq!(decode("hello%20world").unwrap(), "hello world");
        assert_eq!(decode("%C3%A9t%C3%A9").unwrap(), "été");
        assert_eq!(decode("a+b").unwrap(), "a+b");
        assert_eq!(decode("%2a%2A").unwrap(), "**");
    }

    #[test]
    fn test_decode_sanitizes() {
        assert_eq!(decode("it%27s").unwrap(), r"it\'s");
        assert_eq!(decode("100%25").unwrap(), r"100\%");
        assert_eq!(decode("line%0Abreak").unwrap(), r"line\nbreak");
    }

    #[test]
    fn test_decode_malformed_escapes() {
        assert_eq!(
            decode("%").unwrap_err(),
            CodecError::decoding("malformed percent-escape", 0)
        );
        assert!(matches!(
            decode("abc%4"),
            Err(CodecError::Decoding { position: 3, .. })
        ));
        assert!(matches!(
            decode("%zz"),
            Err(CodecError::Decoding { position: 0, .. })
        ));
        assert!(matches!(
            decode("ok%20then%G1"),
            Err(CodecError::Decoding { position: 9, .. })
        ));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert!(matches!(decode("%FF"), Err(CodecError::Decoding { .. })));
        assert!(matches!(decode("%C3"), Err(CodecError::Decoding { .. })));
        // Encoded surrogate half
        assert!(matches!(decode("%ED%A0%80"), Err(CodecError::Decoding { .. })));
    }

    #[test]
    fn test_decode_encode_is_sanitized_not_identity() {
        let s = "O'Brien said \"hi\"\tand left\\";
        let round = decode(&encode(s)).unwrap();
        assert_ne!(round, s);
        assert_eq!(unescape_sql_literal(&round), s);
    }

    #[test]
    fn test_decode_encode_recovers_after_unescape() {
        let samples = [
            "",
            "simple",
            "with space",
            "!'()*",
            "a=b&c=d",
            "50% off; 100% real",
            "tab\tnul\0sub\x1acr\rlf\n",
            "ünïcødé 😀",
            r"C:\path\to",
        ];
        for s in samples {
            let round = decode(&encode(s)).unwrap();
            assert_eq!(unescape_sql_literal(&round), s, "{s:?}");
        }
    }

    #[test]
    fn test_decode_with_quiet_sanitizer() {
        let quiet = SqlSanitizer::new(false);
        assert_eq!(
            decode_with("%27%3B%20DROP%20TABLE%20x", &quiet).unwrap(),
            r"\'; DROP TABLE x"
        );
    }

    #[test]
    fn test_percent_decode_component_does_not_sanitize() {
        assert_eq!(percent_decode_component("it%27s").unwrap(), "it's");
    }
}
