//! json-style front matter: a leading object, pretty-printed canonically
//!
//! json blocks go through serde_json in both directions. The pretty
//! printer's two-space indentation is the canonical output form; field
//! order still follows the shared priority rule, which is why the json
//! map type must preserve insertion order.

use crate::codec::{ordered_fields, FrontMatterFormat};
use crate::core::document::FrontMatter;
use crate::core::value::FieldValue;
use crate::error::{MatterBatchError, Result};

/// Decode a json block into a field mapping.
///
/// The block must be a json object; arrays and bare scalars are decode
/// errors.
pub fn decode(text: &str) -> Result<FrontMatter> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)
        .map_err(|e| MatterBatchError::decode(FrontMatterFormat::Json, e.to_string()))?;
    Ok(map
        .into_iter()
        .map(|(key, value)| (key, FieldValue::from(value)))
        .collect())
}

/// Encode a field mapping as a pretty-printed json object.
///
/// No trailing newline: the assembly step owns the separator between the
/// closing brace and the body.
pub fn encode(matter: &FrontMatter) -> Result<String> {
    let mut map = serde_json::Map::with_capacity(matter.len());
    for (key, value) in ordered_fields(matter) {
        map.insert(key.to_string(), serde_json::Value::from(value));
    }
    serde_json::to_string_pretty(&serde_json::Value::Object(map))
        .map_err(|e| MatterBatchError::encode(FrontMatterFormat::Json, "*", e.to_string()))
}
