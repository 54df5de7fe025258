//! Flat key-value persisted form shared by soil records and region stores.
//!
//! The host persists soil alongside its own region data, so the persisted
//! form is a plain JSON object rather than a derived serde struct: readers
//! must tolerate missing keys and ignore unknown ones.

use serde_json::{Map, Value};

/// A flat persisted record: string keys to JSON numbers or nested records.
pub type SoilTag = Map<String, Value>;

/// Read a finite float, or `None` if the key is absent or not a number.
pub(crate) fn read_f64(tag: &SoilTag, key: &str) -> Option<f64> {
    tag.get(key)
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
}

/// Read a non-negative integer, or `None` if the key is absent or not one.
pub(crate) fn read_u64(tag: &SoilTag, key: &str) -> Option<u64> {
    tag.get(key).and_then(Value::as_u64)
}

/// Read an `i32`, or `None` if the key is absent or out of range.
pub(crate) fn read_i32(tag: &SoilTag, key: &str) -> Option<i32> {
    tag.get(key)
        .and_then(Value::as_i64)
        .and_then(|value| i32::try_from(value).ok())
}

/// Write a float. Non-finite values cannot be represented and are stored as `0`.
pub(crate) fn write_f64(tag: &mut SoilTag, key: &str, value: f64) {
    let number = serde_json::Number::from_f64(value).unwrap_or_else(|| serde_json::Number::from(0));
    tag.insert(key.to_owned(), Value::Number(number));
}
