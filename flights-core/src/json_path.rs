//! Safe navigation over nested JSON payloads.
//!
//! The upstream API omits keys freely, so every nested read goes through
//! [`lookup`]: a missing segment (or a non-object along the way) ends the walk
//! with `None` instead of an error.

use serde_json::{Map, Value};

/// Walk `path` from `root`, returning the value at the end if every segment exists.
pub fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |current, key| current.as_object()?.get(*key))
}

/// String at `path`, if present and actually a string.
pub fn lookup_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(root, path).and_then(Value::as_str)
}

/// Array at `path`, or an empty slice.
pub fn lookup_array<'a>(root: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(root, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Object at `path` cloned out, or an empty object.
pub fn lookup_object(root: &Value, path: &[&str]) -> Value {
    lookup(root, path)
        .filter(|v| v.is_object())
        .cloned()
        .unwrap_or_else(empty_object)
}

/// `{}`, the empty value of a mapping field.
pub fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Number at `path` as `f64`, or `default`.
pub fn lookup_f64_or(root: &Value, path: &[&str], default: f64) -> f64 {
    lookup(root, path).and_then(Value::as_f64).unwrap_or(default)
}
