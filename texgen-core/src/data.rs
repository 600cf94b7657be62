//! Render data — the caller-supplied value templates are executed against.
//!
//! No schema is enforced here; the templates decide which fields they read.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{data_io_err, DataError};

/// Load render data from a `.json`, `.yaml` or `.yml` file.
pub fn load_data(path: &Path) -> Result<Value, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => {
            let contents = std::fs::read_to_string(path).map_err(|e| data_io_err(path, e))?;
            serde_json::from_str(&contents).map_err(|source| DataError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
        Some("yaml") | Some("yml") => {
            let contents = std::fs::read_to_string(path).map_err(|e| data_io_err(path, e))?;
            serde_yaml::from_str(&contents).map_err(|source| DataError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Err(DataError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Apply `key=value` pairs on top of `data`.
///
/// Dotted keys (`author.name=Frank`) address nested mappings; missing
/// intermediate mappings are created. Values are always strings. A `null`
/// root is treated as an empty mapping.
pub fn apply_overrides<S: AsRef<str>>(mut data: Value, pairs: &[S]) -> Result<Value, DataError> {
    if data.is_null() {
        data = Value::Object(Map::new());
    }
    for pair in pairs {
        let pair = pair.as_ref();
        let invalid = |reason: &str| DataError::InvalidOverride {
            pair: pair.to_string(),
            reason: reason.to_string(),
        };

        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| invalid("expected KEY=VALUE"))?;
        let segments: Vec<&str> = key.trim().split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("key must not be empty"));
        }

        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| invalid("key must not be empty"))?;
        let mut cursor = &mut data;
        for segment in parents {
            let map = cursor
                .as_object_mut()
                .ok_or_else(|| invalid("parent value is not a mapping"))?;
            cursor = map
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        cursor
            .as_object_mut()
            .ok_or_else(|| invalid("parent value is not a mapping"))?
            .insert((*last).to_string(), Value::String(value.to_string()));
    }
    Ok(data)
}
