//! toml-style front matter: toml decode, canonical line-based encode
//!
//! Same canonical contract as the yaml encoder (priority field order,
//! inline sequences) with toml lexical rules: strings always quoted, bare
//! keys, no null.

use crate::codec::{ordered_fields, quote_string, FrontMatterFormat};
use crate::core::document::FrontMatter;
use crate::core::value::FieldValue;
use crate::error::{MatterBatchError, Result};

/// Decode a toml block into a field mapping.
pub fn decode(text: &str) -> Result<FrontMatter> {
    if text.trim().is_empty() {
        return Ok(FrontMatter::new());
    }
    let table: toml::Table = toml::from_str(text)
        .map_err(|e| MatterBatchError::decode(FrontMatterFormat::Toml, e.to_string()))?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, FieldValue::from(value)))
        .collect())
}

/// Encode a field mapping as a toml block, one `key = value` line per field.
pub fn encode(matter: &FrontMatter) -> Result<String> {
    let mut out = String::new();
    for (key, value) in ordered_fields(matter) {
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(&render_value(key, value)?);
        out.push('\n');
    }
    Ok(out)
}

fn render_value(key: &str, value: &FieldValue) -> Result<String> {
    match value {
        FieldValue::Null => Err(MatterBatchError::encode(
            FrontMatterFormat::Toml,
            key,
            "null has no toml representation",
        )),
        FieldValue::Bool(b) => Ok(b.to_string()),
        FieldValue::Int(i) => Ok(i.to_string()),
        FieldValue::Float(f) => Ok(f.to_string()),
        FieldValue::Str(s) => Ok(quote_string(s)),
        FieldValue::Seq(items) => {
            let parts: Result<Vec<String>> =
                items.iter().map(|item| render_value(key, item)).collect();
            Ok(format!("[{}]", parts?.join(", ")))
        }
        FieldValue::Map(_) => Err(MatterBatchError::encode(
            FrontMatterFormat::Toml,
            key,
            "nested tables are not representable",
        )),
    }
}
