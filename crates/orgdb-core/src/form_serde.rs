//! Serde adapters for loosely-typed form and import input.
//!
//! Directory data arrives from hand-edited JSON exports and form posts where
//! optional text is sometimes `null`, list fields are sometimes a bare string
//! and the review flag is sometimes `""`. These adapters coerce those shapes
//! into the typed fields of `OrganizationFields` so a record never ends up
//! with a missing key.
//!
//! Use with `#[serde(deserialize_with = "...")]`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text field: `null` becomes `""`, numbers and booleans are stringified.
///
/// # Errors
///
/// Fails for arrays and objects.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

/// List field: anything that is not an array becomes an empty list.
///
/// Non-string items are stringified; `null` items are dropped.
///
/// # Errors
///
/// Fails only if the underlying deserializer fails.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .collect())
}

/// Boolean flag: `null` and `""` are `false`; common text spellings accepted.
///
/// # Errors
///
/// Fails for unrecognized text, arrays and objects.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "no" | "0" => Ok(false),
            "true" | "yes" | "1" => Ok(true),
            _ => Err(D::Error::custom(format!("expected a boolean flag, got '{s}'"))),
        },
        other => Err(D::Error::custom(format!("expected a boolean flag, got {other}"))),
    }
}
