//! Typed validation and casting of raw request values.
//!
//! Annotations declare the expected type of a query, cookie or body field
//! by name (`int`, `uuid`, ...). This module owns the mapping from those
//! names to a validation pattern and a cast. The policy is deliberately
//! forgiving at request time: a value that is absent or fails its pattern
//! resolves to the declared default, unchanged and uncast.
//!
//! # Examples
//!
//! ```rust
//! use remora::coerce::{validate, ParamType};
//! use serde_json::{json, Value};
//!
//! let fallback = json!(1);
//! assert_eq!(validate(Some("123"), ParamType::Int, &fallback), json!(123));
//! assert_eq!(validate(Some("abc"), ParamType::Int, &fallback), json!(1));
//! assert_eq!(validate(None, ParamType::Int, &fallback), json!(1));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

/// Recognized parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Alpha,
    Alphanum,
    Bool,
    Float,
    Int,
    Path,
    Signed,
    Str,
    Unsigned,
    Uuid,
}

impl ParamType {
    /// Resolves a type name from annotation metadata. Names are matched
    /// case-insensitively; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<ParamType> {
        match name.to_ascii_lowercase().as_str() {
            "alpha" => Some(ParamType::Alpha),
            "alphanum" => Some(ParamType::Alphanum),
            "bool" => Some(ParamType::Bool),
            "float" => Some(ParamType::Float),
            "int" => Some(ParamType::Int),
            "path" => Some(ParamType::Path),
            "signed" => Some(ParamType::Signed),
            "string" => Some(ParamType::Str),
            "unsigned" => Some(ParamType::Unsigned),
            "uuid" => Some(ParamType::Uuid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Alpha => "alpha",
            ParamType::Alphanum => "alphanum",
            ParamType::Bool => "bool",
            ParamType::Float => "float",
            ParamType::Int => "int",
            ParamType::Path => "path",
            ParamType::Signed => "signed",
            ParamType::Str => "string",
            ParamType::Unsigned => "unsigned",
            ParamType::Uuid => "uuid",
        }
    }
}

static ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());
static ALPHANUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static BOOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i:1|0|true|false)$").unwrap());
// At most one decimal point; `int` additionally rejects a leading zero.
static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?$").unwrap());
static INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").unwrap());
static SIGNED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());
static UNSIGNED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})$").unwrap()
});

fn matches(ty: ParamType, text: &str) -> bool {
    match ty {
        ParamType::Alpha => ALPHA.is_match(text),
        ParamType::Alphanum => ALPHANUM.is_match(text),
        ParamType::Bool => BOOL.is_match(text),
        ParamType::Float => FLOAT.is_match(text),
        ParamType::Int => INT.is_match(text),
        ParamType::Signed => SIGNED.is_match(text),
        ParamType::Unsigned => UNSIGNED.is_match(text),
        ParamType::Uuid => UUID.is_match(text),
        // Strings are unrestricted; they pass through as-is.
        ParamType::Path | ParamType::Str => true,
    }
}

/// Validates a raw value against `ty` and casts it on success.
///
/// Returns `default` unchanged when the value is absent, fails the type's
/// pattern, or (for numeric types) overflows the target representation.
/// On a match, numeric types become numbers, `bool` becomes `true` iff
/// the matched text is `"1"` or `"true"`, and `uuid` is lower-cased for a
/// canonical form.
pub fn validate(raw: Option<&str>, ty: ParamType, default: &Value) -> Value {
    let Some(text) = raw else {
        return default.clone();
    };
    if !matches(ty, text) {
        return default.clone();
    }
    match ty {
        ParamType::Int | ParamType::Signed => text
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| default.clone()),
        ParamType::Unsigned => text
            .parse::<u64>()
            .map(Value::from)
            .unwrap_or_else(|_| default.clone()),
        ParamType::Float => text
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| default.clone()),
        ParamType::Bool => Value::Bool(text == "1" || text == "true"),
        ParamType::Uuid => Value::String(text.to_ascii_lowercase()),
        ParamType::Alpha | ParamType::Alphanum | ParamType::Path | ParamType::Str => {
            Value::String(text.to_owned())
        }
    }
}

/// Stringifies an already-parsed body value for pattern validation.
/// `Null` counts as absent.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
