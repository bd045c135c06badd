use std::fs;
use std::path::Path;

use serde_yaml_ng::{Mapping, Value as YamlValue};

/// A raw YAML record: one top-level key/value mapping.
///
/// Accessors are lenient about value types so that a sloppy field never
/// rejects a whole record; coercion rules live here in one place.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    map: Mapping,
}

impl RawRecord {
    pub fn get(&self, key: &str) -> Option<&YamlValue> {
        self.map.get(key)
    }

    /// String value for `key`, trimmed, `None` when absent, blank, or not a
    /// string.
    pub fn get_text(&self, key: &str) -> Option<String> {
        let text = self.get(key)?.as_str()?.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    /// Scalar value for `key` coerced to a string (numbers and booleans
    /// included), trimmed, `None` when absent or blank. Used for fields like
    /// `id` where a bare number is a common authoring slip.
    pub fn get_scalar(&self, key: &str) -> Option<String> {
        let text = crate::graph::text::scalar_to_string(self.get(key)?)?;
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Read and parse one record file.
///
/// Unreadable or malformed files log a warning and yield `None`; empty
/// documents and empty mappings yield `None` silently. A non-mapping document
/// (a bare list or scalar) is malformed and logs too. The caller decides
/// whether a missing record matters.
pub fn load_record(path: &Path) -> Option<RawRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    parse_record(&content, &path.display().to_string())
}

/// Parse YAML text into a record. `origin` names the source in diagnostics.
pub fn parse_record(content: &str, origin: &str) -> Option<RawRecord> {
    if content.trim().is_empty() {
        return None;
    }

    let value: YamlValue = match serde_yaml_ng::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("YAML error in {}: {}", origin, e);
            return None;
        }
    };

    match value {
        YamlValue::Null => None,
        YamlValue::Mapping(map) if map.is_empty() => None,
        YamlValue::Mapping(map) => Some(RawRecord { map }),
        _ => {
            log::warn!("Skipping {}: document is not a key/value mapping", origin);
            None
        }
    }
}
