//! JSON-safe conversion of YAML values and stable payload encoding.

use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_yaml_ng::{Mapping, Value as YamlValue};

use crate::error::Result;

/// Convert a YAML value into JSON. Tagged values unwrap to their inner value,
/// non-finite floats become null, and non-string mapping keys are stringified.
pub fn yaml_to_json(value: &YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                JsonValue::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(JsonValue::Number)
                    .unwrap_or(JsonValue::Null)
            }
        }
        YamlValue::String(s) => JsonValue::String(s.clone()),
        YamlValue::Sequence(seq) => JsonValue::Array(seq.iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(map) => mapping_to_json(map),
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

/// Convert a YAML mapping into a JSON object. Keys serialize sorted, so the
/// same mapping always encodes to the same bytes.
pub fn mapping_to_json(map: &Mapping) -> JsonValue {
    let mut object = serde_json::Map::new();
    for (key, value) in map {
        let key = match key {
            YamlValue::String(s) => s.clone(),
            YamlValue::Number(n) => n.to_string(),
            YamlValue::Bool(b) => b.to_string(),
            YamlValue::Null => "null".to_string(),
            _ => "key".to_string(),
        };
        object.insert(key, yaml_to_json(value));
    }
    JsonValue::Object(object)
}

/// Optional YAML value to JSON, mapping absence to null.
pub fn json_or_null(value: Option<&YamlValue>) -> JsonValue {
    value.map(yaml_to_json).unwrap_or(JsonValue::Null)
}

/// Encode a payload to a JSON string: minified by default, two-space
/// indentation when `pretty` is set.
pub fn encode<T: Serialize>(payload: &T, pretty: bool) -> Result<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    Ok(encoded)
}
