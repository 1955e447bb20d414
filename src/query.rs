//! Query-string encoding and decoding for flat key-value collections.
//!
//! Repeated keys collapse into an ordered sequence of values. Decoding runs
//! every key and value through the SQL sanitizer; values are sanitized a
//! second time after decoding.

use crate::constants::{KEY_VALUE_SEPARATOR, PAIR_SEPARATOR, QUERY_PREFIX};
use crate::encoding::{decode_with, encode};
use crate::error::CodecError;
use crate::security::SqlSanitizer;
use indexmap::map::{Entry, Iter};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The value stored under a query key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Key appeared once
    Single(String),
    /// Key appeared more than once, in order of appearance
    Multiple(Vec<String>),
}

impl QueryValue {
    /// The value if this is a single value.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.as_str()),
            Self::Multiple(_) => None,
        }
    }

    /// All values in order.
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values.as_slice(),
        }
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Whether no values are held (only possible for an empty sequence).
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Append a value, turning a single value into a sequence.
    pub fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Multiple(vec![first, value]);
            }
            Self::Multiple(values) => values.push(value),
        }
    }

    /// Convert to a JSON string or array of strings.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Single(value) => Value::String(value.clone()),
            Self::Multiple(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Insertion-ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(IndexMap<String, QueryValue>);

impl QueryParams {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Iterate keys and values in insertion order.
    pub fn iter(&self) -> Iter<'_, String, QueryValue> {
        self.0.iter()
    }

    /// Set `key` to `value`, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Add `value` under `key`.
    ///
    /// The first value is stored as [`QueryValue::Single`]; a repeat turns it
    /// into a [`QueryValue::Multiple`] and later repeats append to it.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        match self.0.entry(key.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value.into()),
            Entry::Vacant(entry) => {
                entry.insert(QueryValue::Single(value.into()));
            }
        }
    }

    /// Convert to a JSON object, preserving key order.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect::<Map<String, Value>>(),
        )
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_query_params(self))
    }
}

impl FromStr for QueryParams {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_query_params(s)
    }
}

impl TryFrom<&Value> for QueryParams {
    type Error = CodecError;

    /// Accept a JSON object whose values are scalars or arrays of scalars.
    ///
    /// Numbers, booleans and null are converted to their JSON text.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let object = value.as_object().ok_or_else(|| {
            CodecError::type_argument(format!(
                "expected a JSON object, got {}",
                json_type_name(value)
            ))
        })?;

        let mut params = Self::new();
        for (key, value) in object {
            let value = match value {
                Value::Array(items) => QueryValue::Multiple(
                    items
                        .iter()
                        .map(|item| stringify_scalar(key, item))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                other => QueryValue::Single(stringify_scalar(key, other)?),
            };
            params.insert(key.clone(), value);
        }
        Ok(params)
    }
}

/// Textual form of a JSON scalar used as a query value.
fn stringify_scalar(key: &str, value: &Value) -> Result<String, CodecError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) | Value::Object(_) => Err(CodecError::type_argument(format!(
            "value for key '{}' must be a scalar or an array of scalars, got nested {}",
            key,
            json_type_name(value)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build a query string from `params`.
///
/// A sequence value emits one `key=value` pair per element.
///
/// # Examples
///
/// ```
/// use url_sanitizer::query::{encode_query_params, QueryParams};
///
/// let mut params = QueryParams::new();
/// params.insert("q", "rust lang");
/// params.insert("tag", vec!["a", "b"]);
/// assert_eq!(encode_query_params(&params), "q=rust%20lang&tag=a&tag=b");
/// ```
pub fn encode_query_params(params: &QueryParams) -> String {
    params
        .iter()
        .flat_map(|(key, value)| {
            let key = encode(key);
            value
                .values()
                .iter()
                .map(move |item| format!("{}{}{}", key, KEY_VALUE_SEPARATOR, encode(item)))
        })
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR)
}

/// Build a query string from a JSON object.
///
/// # Errors
///
/// Returns [`CodecError::TypeArgument`] if `params` is not an object, or if
/// a value is an object or an array containing arrays or objects.
pub fn encode_query_params_json(params: &Value) -> Result<String, CodecError> {
    QueryParams::try_from(params).map(|params| encode_query_params(&params))
}

/// Parse a query string with the default sanitizer.
///
/// # Examples
///
/// ```
/// use url_sanitizer::query::{decode_query_params, QueryValue};
///
/// let params = decode_query_params("?x=1&x=2&y").unwrap();
/// assert_eq!(params.get("x"), Some(&QueryValue::from(vec!["1", "2"])));
/// assert_eq!(params.get("y"), Some(&QueryValue::from("")));
/// ```
pub fn decode_query_params(query: &str) -> Result<QueryParams, CodecError> {
    decode_query_params_with(query, &SqlSanitizer::default())
}

/// Parse a query string, sanitizing with `sanitizer`.
pub fn decode_query_params_with(
    query: &str,
    sanitizer: &SqlSanitizer,
) -> Result<QueryParams, CodecError> {
    let query = query.strip_prefix(QUERY_PREFIX).unwrap_or(query);
    let mut params = QueryParams::new();

    for segment in query.split(PAIR_SEPARATOR).filter(|s| !s.is_empty()) {
        let (raw_key, raw_value) = match segment.split_once(KEY_VALUE_SEPARATOR) {
            Some((key, value)) => (key, Some(value)),
            None => (segment, None),
        };

        let key = decode_with(raw_key, sanitizer)?;
        let value = match raw_value {
            Some(value) if !value.is_empty() => decode_with(value, sanitizer)?,
            _ => String::new(),
        };

        // Values get a second sanitizing pass on top of the one in decode
        params.append(key, sanitizer.sanitize(&value));
    }

    Ok(params)
}

/// Parse a query string into a JSON object of strings and string arrays.
pub fn decode_query_params_json(query: &str) -> Result<Value, CodecError> {
    decode_query_params(query).map(|params| params.to_json())
}
