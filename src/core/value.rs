//! Core value type for front matter fields
//!
//! Front matter values form a closed sum: null, boolean, integer, float,
//! string, sequence, and (for decode fidelity only) nested mapping. Every
//! variant has a canonical string representation; the condition evaluator
//! and the diff reporter both compare values through it, so it is the one
//! place where display formatting lives.

use std::collections::BTreeMap;
use std::fmt;

/// A single front matter field value.
///
/// The `Map` variant exists so documents with nested mappings still decode
/// (and can be filtered or extracted); the yaml and toml encoders reject it
/// because this tool guarantees round-tripping only for flat fields and one
/// level of sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Parse a CLI-supplied field value: the literals `true` and `false`
    /// become booleans, everything else stays a string.
    pub fn parse_from_cli(raw: &str) -> Self {
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => Self::Str(raw.to_string()),
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this value is a string
    pub fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Check if this value is a boolean
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Check if this value is numeric (integer or float)
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Check if this value is a sequence
    pub fn is_seq(&self) -> bool {
        matches!(self, Self::Seq(_))
    }

    /// Try to view this value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to view this value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to view this value as an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to view this value as a float (integers widen)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to view this value as a sequence
    pub fn as_seq(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// The canonical string representation of this value.
    ///
    /// Strings are verbatim, booleans `true`/`false`, numbers in minimal
    /// decimal form, null is `null`, sequences and mappings render inline.
    pub fn to_string_representation(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::Seq(items) => {
                let parts: Vec<String> =
                    items.iter().map(|v| v.to_string_representation()).collect();
                format!("[{}]", parts.join(", "))
            }
            Self::Map(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.to_string_representation()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }

    /// Flatten this value to a sequence of string representations for
    /// membership tests: a sequence yields one string per element, null
    /// yields nothing, any other scalar yields a single-element sequence.
    pub fn flatten_to_strings(&self) -> Vec<String> {
        match self {
            Self::Null => Vec::new(),
            Self::Seq(items) => items.iter().map(|v| v.to_string_representation()).collect(),
            other => vec![other.to_string_representation()],
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_representation())
    }
}

/// YAML mapping keys are usually strings; scalars that aren't are rendered
/// to their natural form so nested mappings never fail decode.
fn yaml_key_to_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => "~".to_string(),
    }
}

impl From<serde_yaml::Value> for FieldValue {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    n.as_f64().map(Self::Float).unwrap_or(Self::Null)
                }
            }
            serde_yaml::Value::String(s) => Self::Str(s),
            serde_yaml::Value::Sequence(seq) => {
                Self::Seq(seq.into_iter().map(FieldValue::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (yaml_key_to_string(&k), FieldValue::from(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => FieldValue::from(tagged.value),
        }
    }
}

impl From<toml::Value> for FieldValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Str(s),
            toml::Value::Integer(i) => Self::Int(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Bool(b),
            // Dates stay in their literal text form so `date<` comparisons
            // work uniformly across formats.
            toml::Value::Datetime(dt) => Self::Str(dt.to_string()),
            toml::Value::Array(arr) => Self::Seq(arr.into_iter().map(FieldValue::from).collect()),
            toml::Value::Table(table) => Self::Map(
                table
                    .into_iter()
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    n.as_f64().map(Self::Float).unwrap_or(Self::Null)
                }
            }
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(arr) => {
                Self::Seq(arr.into_iter().map(FieldValue::from).collect())
            }
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&FieldValue> for serde_json::Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Str(s) => serde_json::Value::String(s.clone()),
            FieldValue::Seq(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            FieldValue::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
