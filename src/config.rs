//! Run configuration assembled by the caller
//!
//! The library never reads argv or the process environment; the binary
//! maps its parsed flags onto this struct and hands it to [`crate::ops::run`].

use std::path::PathBuf;

/// A `key=value` pair from the set operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetField {
    pub key: String,
    pub value: String,
}

impl SetField {
    /// Split `key=value` on the first `=` and trim both sides. The value
    /// may itself contain `=`; an absent `=` or empty key is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let (key, value) = raw.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// Normalize a comma-split field list: entries are whitespace-trimmed and
/// empty entries dropped, so `--required "title, date"` names `date`, not
/// `" date"`.
pub fn clean_field_list(fields: Vec<String>) -> Vec<String> {
    fields
        .into_iter()
        .map(|field| field.trim().to_string())
        .filter(|field| !field.is_empty())
        .collect()
}

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the content tree.
    pub content_dir: PathBuf,
    /// Field mutation applied to matching documents.
    pub set: Option<SetField>,
    /// Boolean condition gating which documents are touched.
    pub condition: Option<String>,
    /// Show diffs, write nothing.
    pub dry_run: bool,
    /// Check required/prohibited fields.
    pub lint: bool,
    /// Repair lint violations in place. Only honored together with `lint`.
    pub fix: bool,
    /// Fields every document must carry.
    pub required_fields: Vec<String>,
    /// Fields no document may carry.
    pub prohibited_fields: Vec<String>,
    /// Commit the modified files when the run ends.
    pub git_commit: bool,
    /// Commit message override.
    pub git_message: Option<String>,
    /// Skip per-file confirmation prompts.
    pub assume_yes: bool,
    /// Extraction mode: collect this key instead of mutating.
    pub extract: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            set: None,
            condition: None,
            dry_run: false,
            lint: false,
            fix: false,
            required_fields: Vec::new(),
            prohibited_fields: Vec::new(),
            git_commit: false,
            git_message: None,
            assume_yes: false,
            extract: None,
        }
    }
}
