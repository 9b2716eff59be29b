//! String codec for stored values.
//!
//! Strings are stored raw, everything else as JSON. Decoding first offers the
//! raw text as a string and only then parses it as JSON, so string-typed
//! values written by [`encode`] come back exactly, quotes included.

use crate::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn encode<T>(value: &T) -> Result<String, StoreError>
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(value)? {
        Value::String(raw) => Ok(raw),
        other => Ok(other.to_string()),
    }
}

pub fn try_decode<T>(raw: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned,
{
    if let Ok(value) = serde_json::from_value::<T>(Value::String(raw.to_owned())) {
        return Ok(value);
    }
    serde_json::from_str::<T>(raw).map_err(|err| StoreError::Malformed(err.to_string()))
}

/// Decodes `raw`, returning `fallback` on any failure.
pub fn decode<T>(raw: &str, fallback: T) -> T
where
    T: DeserializeOwned,
{
    try_decode(raw).unwrap_or(fallback)
}
