//! Condition evaluation over front matter fields
//!
//! Conditions are a flat disjunction of conjunctions written with the
//! literal connectives ` AND `/` OR ` (or ` && `/` || `). Each clause is
//! classified into exactly one of three recognized kinds, in a fixed
//! structural priority, and evaluated against the document's fields. The
//! evaluator never errors: malformed clauses, unparseable dates, and
//! missing fields are all plain non-matches.

use chrono::NaiveDate;

use crate::core::document::FrontMatter;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One classified clause of a condition expression.
///
/// Classification happens before evaluation so the clause priority is a
/// single ordered match, auditable on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause<'a> {
    /// `date<YYYY-MM-DD`: the document's date is strictly before the cutoff
    DateBefore { cutoff: &'a str },
    /// `key contains needle`: membership in the flattened field value
    Contains { key: &'a str, needle: &'a str },
    /// `key=value`: exact match on the field's string representation
    Equals { key: &'a str, expected: &'a str },
    /// Anything else; never matches
    Unrecognized,
}

impl<'a> Clause<'a> {
    /// Classify a single trimmed clause.
    ///
    /// Priority is fixed: a `<` with the literal `date` prefix wins, then
    /// the `contains` token, then `=`. Splits are always on the first
    /// occurrence of the operator.
    pub fn classify(clause: &'a str) -> Self {
        if clause.contains('<') && clause.starts_with("date") {
            if let Some((_, cutoff)) = clause.split_once('<') {
                return Self::DateBefore {
                    cutoff: cutoff.trim(),
                };
            }
        }
        if let Some((key, needle)) = clause.split_once("contains") {
            return Self::Contains {
                key: key.trim(),
                needle: strip_quotes(needle.trim()),
            };
        }
        if let Some((key, expected)) = clause.split_once('=') {
            return Self::Equals {
                key: key.trim(),
                expected: expected.trim(),
            };
        }
        Self::Unrecognized
    }

    /// Whether this clause holds for the given fields.
    pub fn matches(&self, matter: &FrontMatter) -> bool {
        match self {
            Self::DateBefore { cutoff } => {
                let cutoff = match NaiveDate::parse_from_str(cutoff, DATE_FORMAT) {
                    Ok(date) => date,
                    Err(_) => return false,
                };
                let value = match matter.get("date") {
                    Some(value) => value.to_string_representation(),
                    None => return false,
                };
                match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
                    Ok(date) => date < cutoff,
                    Err(_) => false,
                }
            }
            Self::Contains { key, needle } => match matter.get(key) {
                Some(value) => value
                    .flatten_to_strings()
                    .into_iter()
                    .any(|item| item == *needle),
                None => false,
            },
            Self::Equals { key, expected } => matter
                .get(key)
                .map(|value| value.to_string_representation() == *expected)
                .unwrap_or(false),
            Self::Unrecognized => false,
        }
    }
}

/// Evaluate a whole condition expression against a document's fields.
///
/// An empty (or all-whitespace) expression is always true: no condition
/// means every document is selected. Within the expression, `OR` joins
/// disjuncts and `AND` joins clauses inside a disjunct; a disjunct with
/// no clauses would be vacuously true, but splitting never produces one.
pub fn evaluate(matter: &FrontMatter, expression: &str) -> bool {
    if expression.trim().is_empty() {
        return true;
    }
    let normalized = expression.replace(" AND ", " && ").replace(" OR ", " || ");
    normalized.split("||").any(|disjunct| {
        disjunct
            .split("&&")
            .map(str::trim)
            .all(|clause| Clause::classify(clause).matches(matter))
    })
}

/// Strip one layer of matching surrounding quotes, single or double.
fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'\'' || first == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}
