use std::path::Path;

use orgdb_core::entities::OrganizationFields;
use orgdb_core::errors::CoreError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(Value::String(normalized)).map_err(|error| {
        CoreError::Validation(format!("invalid {field} '{raw}': {error}")).into()
    })
}

/// Split `Field=value`. Text fields take the value verbatim; other keys take
/// it as JSON when it parses, so `Region=["EU"]` sets a list and
/// `Latitude=45.10` stays the text `"45.10"`.
pub fn parse_assignment(raw: &str) -> anyhow::Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(CoreError::Validation(format!("expected Field=value, got '{raw}'")).into());
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CoreError::Validation(format!("missing field name in '{raw}'")).into());
    }
    let value = if OrganizationFields::is_text_field(key) {
        Value::String(value.to_string())
    } else {
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
    };
    Ok((key.to_string(), value))
}

/// Merge field input from `--json`, `--file` and repeated `--set` into one
/// JSON object; later sources win.
pub fn field_input(
    json: Option<&str>,
    file: Option<&str>,
    assignments: &[String],
) -> anyhow::Result<Value> {
    let mut fields = Map::new();

    if let Some(path) = file {
        let raw = std::fs::read_to_string(Path::new(path))
            .map_err(|e| CoreError::Validation(format!("cannot read {path}: {e}")))?;
        merge_object(&mut fields, &raw, path)?;
    }
    if let Some(raw) = json {
        merge_object(&mut fields, raw, "--json")?;
    }
    for raw in assignments {
        let (key, value) = parse_assignment(raw)?;
        fields.insert(key, value);
    }

    Ok(Value::Object(fields))
}

fn merge_object(fields: &mut Map<String, Value>, raw: &str, source: &str) -> anyhow::Result<()> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("{source} is not valid JSON: {e}")))?;
    let Value::Object(map) = value else {
        return Err(CoreError::Validation(format!("{source} must hold a JSON object")).into());
    };
    fields.extend(map);
    Ok(())
}
