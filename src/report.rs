//! Run accumulators and user-facing output rendering
//!
//! A batch run threads a [`RunReport`] through every file it touches and
//! hands it back to the caller, which decides what to print. Rendering
//! lives here so the orchestration never formats its own output.

use std::path::PathBuf;

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::codec::FrontMatterFormat;
use crate::error::{MatterBatchError, Result};

/// Counters accumulated over one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Markdown files visited by the walk.
    pub processed: usize,
    /// Files whose front matter satisfied the condition.
    pub matched: usize,
    /// Files whose front matter was mutated by a set operation.
    pub updated: usize,
    /// Files with at least one lint violation.
    pub lint_failures: usize,
    /// Individual fields repaired by lint auto-fix.
    pub lint_fixed: usize,
}

impl RunStats {
    /// Files visited but not matched by the condition.
    pub fn skipped(&self) -> usize {
        self.processed.saturating_sub(self.matched)
    }
}

/// One `(file, key, value)` row produced in extraction mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub file: String,
    pub key: String,
    pub value: String,
}

/// Output syntax for extraction rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExtractFormat {
    #[default]
    Plain,
    Csv,
    Json,
}

/// Everything a batch run reports back to the caller.
#[derive(Debug, Default)]
pub struct RunReport {
    pub stats: RunStats,
    /// Files rewritten on disk, in walk order.
    pub modified: Vec<PathBuf>,
    /// Rows collected in extraction mode, in walk order.
    pub extractions: Vec<Extraction>,
}

impl RunReport {
    /// The `--report` summary. Lint lines only appear when linting ran.
    pub fn render_summary(&self, lint_enabled: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "Report:".bold()));
        out.push_str(&format!("Processed: {} files\n", self.stats.processed));
        out.push_str(&format!("Matched condition: {}\n", self.stats.matched));
        out.push_str(&format!("Updated frontmatter: {}\n", self.stats.updated));
        if lint_enabled {
            out.push_str(&format!("Lint violations: {}\n", self.stats.lint_failures));
            out.push_str(&format!("Fields auto-fixed: {}\n", self.stats.lint_fixed));
        }
        out.push_str(&format!("Skipped: {}\n", self.stats.skipped()));
        if !self.modified.is_empty() {
            out.push_str("\nModified files:\n");
            for path in &self.modified {
                out.push_str(&format!("- {}\n", path.display()));
            }
        }
        out
    }

    /// Extraction rows in the chosen output syntax.
    pub fn render_extractions(&self, format: ExtractFormat) -> Result<String> {
        match format {
            ExtractFormat::Plain => {
                let mut out = String::new();
                for row in &self.extractions {
                    out.push_str(&format!("{}: {} = {}\n", row.file, row.key, row.value));
                }
                Ok(out)
            }
            ExtractFormat::Csv => {
                let mut out = String::from("file,key,value\n");
                for row in &self.extractions {
                    out.push_str(&format!(
                        "{},{},{}\n",
                        csv_escape(&row.file),
                        csv_escape(&row.key),
                        csv_escape(&row.value)
                    ));
                }
                Ok(out)
            }
            ExtractFormat::Json => {
                let body = serde_json::to_string_pretty(&self.extractions).map_err(|err| {
                    MatterBatchError::encode(FrontMatterFormat::Json, "*", err.to_string())
                })?;
                Ok(format!("{}\n", body))
            }
        }
    }
}

/// Quote a csv field when it contains a delimiter, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_report() -> RunReport {
        RunReport {
            stats: RunStats {
                processed: 5,
                matched: 3,
                updated: 2,
                lint_failures: 1,
                lint_fixed: 2,
            },
            modified: vec![PathBuf::from("content/a.md"), PathBuf::from("content/b.md")],
            extractions: Vec::new(),
        }
    }

    #[test]
    fn test_summary_without_lint() {
        colored::control::set_override(false);
        let report = sample_report();
        assert_eq!(
            report.render_summary(false),
            "Report:\n\
             Processed: 5 files\n\
             Matched condition: 3\n\
             Updated frontmatter: 2\n\
             Skipped: 2\n\
             \n\
             Modified files:\n\
             - content/a.md\n\
             - content/b.md\n"
        );
    }

    #[test]
    fn test_summary_with_lint_lines() {
        colored::control::set_override(false);
        let report = sample_report();
        let summary = report.render_summary(true);
        assert!(summary.contains("Lint violations: 1\n"));
        assert!(summary.contains("Fields auto-fixed: 2\n"));
    }

    #[test]
    fn test_summary_omits_empty_modified_list() {
        colored::control::set_override(false);
        let report = RunReport::default();
        let summary = report.render_summary(false);
        assert!(!summary.contains("Modified files"));
        assert!(summary.contains("Skipped: 0\n"));
    }

    fn sample_rows() -> RunReport {
        RunReport {
            extractions: vec![
                Extraction {
                    file: "content/a.md".into(),
                    key: "title".into(),
                    value: "Plain Title".into(),
                },
                Extraction {
                    file: "content/b.md".into(),
                    key: "title".into(),
                    value: "Comma, \"quoted\"".into(),
                },
            ],
            ..RunReport::default()
        }
    }

    #[test]
    fn test_extractions_plain() {
        let out = sample_rows().render_extractions(ExtractFormat::Plain).unwrap();
        assert_eq!(
            out,
            "content/a.md: title = Plain Title\n\
             content/b.md: title = Comma, \"quoted\"\n"
        );
    }

    #[test]
    fn test_extractions_csv_escapes_delimiters() {
        let out = sample_rows().render_extractions(ExtractFormat::Csv).unwrap();
        assert_eq!(
            out,
            "file,key,value\n\
             content/a.md,title,Plain Title\n\
             content/b.md,title,\"Comma, \"\"quoted\"\"\"\n"
        );
    }

    #[test]
    fn test_extractions_json_array() {
        let report = RunReport {
            extractions: vec![Extraction {
                file: "content/a.md".into(),
                key: "draft".into(),
                value: "true".into(),
            }],
            ..RunReport::default()
        };
        let out = report.render_extractions(ExtractFormat::Json).unwrap();
        assert_eq!(
            out,
            "[\n  {\n    \"file\": \"content/a.md\",\n    \"key\": \"draft\",\n    \"value\": \"true\"\n  }\n]\n"
        );
    }

    #[test]
    fn test_extractions_json_empty_is_valid() {
        let out = RunReport::default()
            .render_extractions(ExtractFormat::Json)
            .unwrap();
        assert_eq!(out, "[]\n");
    }
}
