//! Field-level diff between an original and an updated front matter block
//!
//! The diff is block-level on purpose: the unit of change is a whole
//! field, never a span of characters. Original lines are kept verbatim
//! with the changed fields' lines annotated as removed, then one rendered
//! addition per changed field shows its new form (removed fields get no
//! addition). Both blocks must decode, since change detection compares
//! decoded values by string representation.

use std::collections::BTreeSet;
use std::path::Path;

use colored::Colorize;

use crate::codec::{self, FrontMatterFormat};
use crate::error::Result;

/// Render a human-readable diff between two blocks of the same format.
pub fn report(
    path: &Path,
    original: &str,
    updated: &str,
    format: FrontMatterFormat,
) -> Result<String> {
    let changed = changed_keys(original, updated, format)?;

    let mut out = String::new();
    out.push_str(&format!("{}\n", format!("--- {}", path.display()).dimmed()));
    out.push_str(&format!(
        "{}\n",
        format!("+++ {} (updated)", path.display()).dimmed()
    ));

    annotate_original(&mut out, format, original, &changed);
    append_additions(&mut out, format, updated, &changed);
    Ok(out)
}

/// Keys whose string representation differs between the two blocks,
/// including keys removed by the update.
fn changed_keys(
    original: &str,
    updated: &str,
    format: FrontMatterFormat,
) -> Result<BTreeSet<String>> {
    let before = codec::decode(format, original)?;
    let after = codec::decode(format, updated)?;

    let mut changed = BTreeSet::new();
    for (key, value) in after.iter() {
        let same = before
            .get(key)
            .map(|old| old.to_string_representation() == value.to_string_representation())
            .unwrap_or(false);
        if !same {
            changed.insert(key.clone());
        }
    }
    for key in before.keys() {
        if !after.contains(key) {
            changed.insert(key.clone());
        }
    }
    Ok(changed)
}

fn annotate_original(out: &mut String, format: FrontMatterFormat, block: &str, changed: &BTreeSet<String>) {
    let mut in_changed = false;
    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "{" || trimmed == "}" {
            // Braces delimit the json block; they belong to no field.
            out.push_str(&format!("  {}\n", line));
            in_changed = false;
            continue;
        }
        if let Some(key) = line_key(format, line) {
            in_changed = changed.contains(key);
        }
        if in_changed {
            out.push_str(&format!("{}\n", format!("- {}", line).red()));
        } else {
            out.push_str(&format!("  {}\n", line));
        }
    }
}

fn append_additions(out: &mut String, format: FrontMatterFormat, block: &str, changed: &BTreeSet<String>) {
    let mut in_changed = false;
    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "{" || trimmed == "}" {
            in_changed = false;
            continue;
        }
        if let Some(key) = line_key(format, line) {
            in_changed = changed.contains(key);
        }
        if in_changed {
            out.push_str(&format!("{}\n", format!("+ {}", line).green()));
        }
    }
}

/// The field a line begins, if it begins one. Lines that continue a
/// multi-line value (dash-list items, array elements, closers) yield
/// nothing and inherit the preceding field's context.
fn line_key(format: FrontMatterFormat, line: &str) -> Option<&str> {
    let trimmed = line.trim();
    match format {
        FrontMatterFormat::Yaml => {
            if trimmed.starts_with('-') {
                return None;
            }
            let (key, _) = trimmed.split_once(':')?;
            Some(key.trim())
        }
        FrontMatterFormat::Toml => {
            let (key, _) = trimmed.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                None
            } else {
                Some(key)
            }
        }
        FrontMatterFormat::Json => {
            // Array element lines are quoted strings too; only a quoted
            // string followed by a colon starts a field.
            let rest = trimmed.strip_prefix('"')?;
            let (key, rest) = rest.split_once('"')?;
            rest.trim_start().starts_with(':').then_some(key)
        }
    }
}
