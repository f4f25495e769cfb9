//! Nested-JSON flattening
//!
//! Detail responses nest session metadata, visitor paths, and message lists
//! arbitrarily deep. CSV rows need a single level, so nesting is collapsed
//! into compound keys: object fields join with `.`, array elements use their
//! index (`webpath.0.to`). Scalars pass through unchanged, which keeps the
//! set of leaf values identical before and after flattening.

use serde_json::Value;
use std::collections::BTreeMap;

/// Flatten a nested JSON value into a path-to-scalar map.
///
/// Empty objects and arrays contribute no keys. A scalar at the top level
/// maps from the empty path; in practice detail responses are always
/// objects.
pub fn flatten(value: &Value) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    flatten_into(&mut fields, String::new(), value);
    fields
}

fn flatten_into(fields: &mut BTreeMap<String, Value>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(fields, join(&prefix, key), child);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(fields, join(&prefix, &index.to_string()), child);
            }
        }
        scalar => {
            fields.insert(prefix, scalar.clone());
        }
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}
