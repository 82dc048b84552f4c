//! Lenient Value Coercion
//!
//! Total helpers that turn loosely-typed persisted or remote JSON values into
//! strict Rust types. Every function returns `Option`; the caller supplies
//! the fallback. Malformed data never raises here.

use serde_json::Value;

/// Coerce a boolean-like value to a strict bool.
///
/// Accepts real booleans, the numbers 1/0, and the usual string spellings
/// (`"true"`, `"1"`, `"yes"`, `"y"`, `"on"` and their negative counterparts,
/// case-insensitive). Anything else is `None`.
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" | "on" => Some(true),
            "false" | "0" | "no" | "n" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerce a small integer (ratings, limits). Accepts integral numbers and
/// numeric strings that fit `u8`.
pub fn coerce_u8(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u8>().ok(),
        _ => None,
    }
}

/// Coerce a counter-style integer. Accepts integral numbers and numeric
/// strings.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerce a non-empty string. Trims surrounding whitespace; empty or
/// non-string input is `None`.
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}
