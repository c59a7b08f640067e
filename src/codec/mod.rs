//! Front matter codec: delimiter detection, decoding, and encoding
//!
//! The codec recognizes three block styles at the very start of a file:
//! yaml-style between `---` fences, toml-style between `+++` fences, and a
//! json-style leading object. Detection is a greedy single pass: the block
//! ends at the next occurrence of the closing delimiter, wherever it is. A
//! `---` inside a value therefore terminates a yaml block early; that is
//! long-standing, documented behavior and kept as-is.
//!
//! Encoding is canonical rather than preserving: fields come out in a fixed
//! priority order with sequences inlined, so repeated runs over a tree
//! converge on one stable formatting.

use std::fmt;

use crate::core::document::FrontMatter;
use crate::core::value::FieldValue;
use crate::error::Result;

pub mod json;
pub mod toml;
pub mod yaml;

/// The delimiter style of a front matter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    /// `---` fenced block
    Yaml,
    /// `+++` fenced block
    Toml,
    /// Leading `{ ... }` object
    Json,
}

impl FrontMatterFormat {
    /// The delimiter text this format opens and closes with
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
            Self::Json => "{",
        }
    }
}

impl fmt::Display for FrontMatterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "YAML"),
            Self::Toml => write!(f, "TOML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// The three parts of a raw document: detected format, front matter block
/// text, and body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split<'a> {
    pub format: Option<FrontMatterFormat>,
    pub matter: &'a str,
    pub body: &'a str,
}

/// Split a raw document into front matter and body.
///
/// The scan is greedy: a fenced block ends at the next literal occurrence
/// of the closing delimiter, a json block at the first `}` followed by a
/// newline. A fence that never closes detects as no block at all, so the
/// file passes through untouched.
pub fn detect(content: &str) -> Split<'_> {
    if let Some(rest) = content.strip_prefix("---\n") {
        if let Some(idx) = rest.find("---") {
            return Split {
                format: Some(FrontMatterFormat::Yaml),
                matter: &rest[..idx],
                body: &rest[idx + 3..],
            };
        }
    } else if let Some(rest) = content.strip_prefix("+++\n") {
        if let Some(idx) = rest.find("+++") {
            return Split {
                format: Some(FrontMatterFormat::Toml),
                matter: &rest[..idx],
                body: &rest[idx + 3..],
            };
        }
    } else if content.starts_with('{') {
        if let Some(idx) = content.find("}\n") {
            return Split {
                format: Some(FrontMatterFormat::Json),
                matter: &content[..idx + 1],
                body: &content[idx + 2..],
            };
        }
    }
    Split {
        format: None,
        matter: "",
        body: content,
    }
}

/// Reassemble a document from an encoded block and the body.
///
/// Exact inverse of [`detect`]: fenced formats re-wrap the block and the
/// body keeps whatever leading newline detection left on it; json-style
/// re-inserts the newline that separated the object from the body.
pub fn assemble(format: FrontMatterFormat, matter: &str, body: &str) -> String {
    match format {
        FrontMatterFormat::Yaml => format!("---\n{}---{}", matter, body),
        FrontMatterFormat::Toml => format!("+++\n{}+++{}", matter, body),
        FrontMatterFormat::Json => format!("{}\n{}", matter, body),
    }
}

/// Decode a front matter block in the given format into a field mapping.
pub fn decode(format: FrontMatterFormat, text: &str) -> Result<FrontMatter> {
    match format {
        FrontMatterFormat::Yaml => yaml::decode(text),
        FrontMatterFormat::Toml => toml::decode(text),
        FrontMatterFormat::Json => json::decode(text),
    }
}

/// Encode a field mapping as a front matter block in the given format.
pub fn encode(format: FrontMatterFormat, matter: &FrontMatter) -> Result<String> {
    match format {
        FrontMatterFormat::Yaml => yaml::encode(matter),
        FrontMatterFormat::Toml => toml::encode(matter),
        FrontMatterFormat::Json => json::encode(matter),
    }
}

/// Fields every encoder emits first, in this order, when present.
pub(crate) const PRIORITY_FIELDS: [&str; 6] =
    ["title", "date", "draft", "series", "categories", "tags"];

/// Iterate a mapping in canonical encode order: the priority fields that
/// are present first, then everything else lexicographically.
pub(crate) fn ordered_fields(matter: &FrontMatter) -> Vec<(&str, &FieldValue)> {
    let mut fields = Vec::with_capacity(matter.len());
    for key in PRIORITY_FIELDS {
        if let Some(value) = matter.get(key) {
            fields.push((key, value));
        }
    }
    for (key, value) in matter.iter() {
        if !PRIORITY_FIELDS.contains(&key.as_str()) {
            fields.push((key.as_str(), value));
        }
    }
    fields
}

/// Render a string as a double-quoted scalar with escapes valid in both
/// yaml and toml double-quoted strings.
pub(crate) fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
