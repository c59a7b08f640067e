//! yaml-style front matter: serde_yaml decode, canonical line-based encode
//!
//! Encoding does not go through a yaml serializer because the output
//! contract is stricter than "valid yaml": fields in priority order,
//! sequences always inline, and a fixed rule for when strings are quoted.

use crate::codec::{ordered_fields, quote_string, FrontMatterFormat};
use crate::core::document::FrontMatter;
use crate::core::value::FieldValue;
use crate::error::{MatterBatchError, Result};

/// Decode a yaml block into a field mapping.
///
/// The top level must be a mapping (or empty); anything else is a decode
/// error.
pub fn decode(text: &str) -> Result<FrontMatter> {
    if text.trim().is_empty() {
        return Ok(FrontMatter::new());
    }
    let value: serde_yaml::Value = serde_yaml::from_str(text)
        .map_err(|e| MatterBatchError::decode(FrontMatterFormat::Yaml, e.to_string()))?;

    match value {
        serde_yaml::Value::Mapping(map) => map
            .into_iter()
            .map(|(key, value)| match key.as_str() {
                Some(key) => Ok((key.to_string(), FieldValue::from(value))),
                None => Err(MatterBatchError::decode(
                    FrontMatterFormat::Yaml,
                    "top-level keys must be strings",
                )),
            })
            .collect(),
        serde_yaml::Value::Null => Ok(FrontMatter::new()),
        other => Err(MatterBatchError::decode(
            FrontMatterFormat::Yaml,
            format!("expected a mapping at the top level, found {:?}", other),
        )),
    }
}

/// Encode a field mapping as a yaml block, one `key: value` line per field.
pub fn encode(matter: &FrontMatter) -> Result<String> {
    let mut out = String::new();
    for (key, value) in ordered_fields(matter) {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&render_value(key, value)?);
        out.push('\n');
    }
    Ok(out)
}

fn render_value(key: &str, value: &FieldValue) -> Result<String> {
    match value {
        FieldValue::Null => Ok("null".to_string()),
        FieldValue::Bool(b) => Ok(b.to_string()),
        FieldValue::Int(i) => Ok(i.to_string()),
        FieldValue::Float(f) => Ok(f.to_string()),
        FieldValue::Str(s) => {
            if needs_quotes(s) {
                Ok(quote_string(s))
            } else {
                Ok(s.clone())
            }
        }
        FieldValue::Seq(items) => {
            let parts: Result<Vec<String>> =
                items.iter().map(|item| render_value(key, item)).collect();
            Ok(format!("[{}]", parts?.join(", ")))
        }
        FieldValue::Map(_) => Err(MatterBatchError::encode(
            FrontMatterFormat::Yaml,
            key,
            "nested mappings are not representable",
        )),
    }
}

/// Whether a string must be double-quoted to survive a yaml round trip.
///
/// Quoted: the empty string, tokens yaml reads as booleans or null,
/// anything that parses as a number, strings carrying structural
/// characters or control characters, and strings opening with an
/// indicator character.
fn needs_quotes(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    if matches!(
        value.to_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "null" | "~"
    ) {
        return true;
    }
    if value.parse::<f64>().is_ok() {
        return true;
    }
    value.chars().any(|ch| "{}[]#&*!|>'\"%@`, ".contains(ch))
        || value.chars().any(char::is_control)
        || value.starts_with('-')
        || value.starts_with(':')
        || value.starts_with('?')
}
