//! Batch run orchestration
//!
//! [`run`] walks the content tree once, single-threaded, and pushes every
//! outcome into a [`RunReport`] that it hands back to the caller. Documents
//! with malformed front matter are warned about and skipped; everything
//! else propagates as an error and aborts the run.

use std::path::Path;

use crate::codec;
use crate::config::Config;
use crate::core::{evaluate, Document, FieldValue};
use crate::diff;
use crate::error::{MatterBatchError, Result};
use crate::git;
use crate::io;
use crate::report::{Extraction, RunReport};

/// Process every markdown file under the configured content directory.
///
/// `confirm` is asked once per pending write unless the configuration
/// says `assume_yes` or `dry_run`; returning `Ok(false)` skips the file.
pub fn run<F>(config: &Config, mut confirm: F) -> Result<RunReport>
where
    F: FnMut(&Path) -> Result<bool>,
{
    let mut report = RunReport::default();

    if !config.content_dir.exists() {
        log::warn!(
            "content directory {} does not exist",
            config.content_dir.display()
        );
        println!(
            "Directory '{}' does not exist. Nothing to process.",
            config.content_dir.display()
        );
        return Ok(report);
    }
    if !config.content_dir.is_dir() {
        return Err(MatterBatchError::not_a_directory(&config.content_dir));
    }

    for path in io::walk_markdown_files(&config.content_dir) {
        report.stats.processed += 1;
        match process_file(&path, config, &mut confirm, &mut report) {
            Ok(()) => {}
            Err(err) if err.is_document_error() => {
                log::warn!("skipping {}: {}", path.display(), err);
            }
            Err(err) => return Err(err),
        }
    }

    if config.git_commit && !config.dry_run && !report.modified.is_empty() {
        let message = git::commit_changes(config, &report.modified)?;
        println!("Committed {} files: {}", report.modified.len(), message);
    }

    Ok(report)
}

fn process_file<F>(
    path: &Path,
    config: &Config,
    confirm: &mut F,
    report: &mut RunReport,
) -> Result<()>
where
    F: FnMut(&Path) -> Result<bool>,
{
    let content = io::read_to_string(path)?;
    let mut doc = Document::parse(&content)?;
    if !doc.has_front_matter() {
        log::debug!("no front matter in {}", path.display());
        return Ok(());
    }

    // Extraction is read-only and ignores the condition gate.
    if let Some(key) = &config.extract {
        let value = doc
            .front_matter()
            .get(key)
            .map(FieldValue::to_string_representation)
            .unwrap_or_else(|| "<missing>".to_string());
        report.extractions.push(Extraction {
            file: path.display().to_string(),
            key: key.clone(),
            value,
        });
        return Ok(());
    }

    let condition = config.condition.as_deref().unwrap_or("");
    if !evaluate(doc.front_matter(), condition) {
        log::debug!("{} does not match condition", path.display());
        return Ok(());
    }
    report.stats.matched += 1;

    if config.lint {
        lint_document(path, &mut doc, config, report);
    }

    if let Some(set) = &config.set {
        doc.front_matter_mut()
            .set(&set.key, FieldValue::parse_from_cli(&set.value));
        report.stats.updated += 1;
    }

    let updated = doc.encode_matter()?;
    if updated == doc.original_matter() {
        return Ok(());
    }
    let format = match doc.format() {
        Some(format) => format,
        None => return Ok(()),
    };

    if shows_diff(config) {
        print!("{}", diff::report(path, doc.original_matter(), &updated, format)?);
    }

    if config.dry_run {
        return Ok(());
    }
    if !config.assume_yes && !confirm(path)? {
        log::info!("skipped {} at user request", path.display());
        return Ok(());
    }

    io::write_atomic(path, &codec::assemble(format, &updated, doc.body()))?;
    report.modified.push(path.to_path_buf());
    log::info!("updated {}", path.display());
    Ok(())
}

/// Whether a pending change is previewed as a diff: always in dry-run,
/// and before the prompt in interactive runs. `--yes` runs stay quiet.
fn shows_diff(config: &Config) -> bool {
    config.dry_run || !config.assume_yes
}

/// Check required and prohibited fields, repairing them when the
/// configuration allows. A file with any violation counts once as a
/// lint failure; each repaired field counts once as fixed.
fn lint_document(path: &Path, doc: &mut Document, config: &Config, report: &mut RunReport) {
    let mut violations = 0usize;

    for field in &config.required_fields {
        if !doc.front_matter().contains(field) {
            violations += 1;
            if config.fix {
                doc.front_matter_mut()
                    .set(field.clone(), FieldValue::Str(String::new()));
                report.stats.lint_fixed += 1;
                log::info!("{}: added missing required field '{}'", path.display(), field);
            } else {
                log::warn!("{}: missing required field '{}'", path.display(), field);
            }
        }
    }

    for field in &config.prohibited_fields {
        if doc.front_matter().contains(field) {
            violations += 1;
            if config.fix {
                doc.front_matter_mut().remove(field);
                report.stats.lint_fixed += 1;
                log::info!("{}: removed prohibited field '{}'", path.display(), field);
            } else {
                log::warn!("{}: prohibited field '{}' present", path.display(), field);
            }
        }
    }

    if violations > 0 {
        report.stats.lint_failures += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn accept_all(_: &Path) -> Result<bool> {
        Ok(true)
    }

    #[test]
    fn test_missing_content_dir_is_a_soft_noop() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            content_dir: dir.path().join("absent"),
            ..Config::default()
        };

        let report = run(&config, accept_all).unwrap();
        assert_eq!(report.stats.processed, 0);
        assert!(report.modified.is_empty());
    }

    #[test]
    fn test_content_path_that_is_a_file_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("content");
        fs::write(&path, "not a dir").unwrap();
        let config = Config {
            content_dir: path,
            ..Config::default()
        };

        let err = run(&config, accept_all).unwrap_err();
        assert!(matches!(err, MatterBatchError::NotADirectory { .. }));
    }

    #[test]
    fn test_declined_confirmation_leaves_file_alone() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        let original = "---\ntitle: Post\ndraft: true\n---\nBody\n";
        fs::write(&path, original).unwrap();
        let config = Config {
            content_dir: dir.path().to_path_buf(),
            set: crate::config::SetField::parse("draft=false"),
            ..Config::default()
        };

        let report = run(&config, |_| Ok(false)).unwrap();
        assert_eq!(report.stats.updated, 1);
        assert!(report.modified.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_accepted_confirmation_writes_atomically() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "---\ntitle: Post\ndraft: true\n---\nBody\n").unwrap();
        let config = Config {
            content_dir: dir.path().to_path_buf(),
            set: crate::config::SetField::parse("draft=false"),
            ..Config::default()
        };

        let report = run(&config, accept_all).unwrap();
        assert_eq!(report.modified, vec![path.clone()]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "---\ntitle: Post\ndraft: false\n---\nBody\n"
        );
    }

    #[test]
    fn test_malformed_front_matter_is_skipped_not_fatal() {
        colored::control::set_override(false);
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.md"), "---\ntitle: [unclosed\n---\nBody\n").unwrap();
        fs::write(
            dir.path().join("good.md"),
            "---\ntitle: Post\ndraft: true\n---\nBody\n",
        )
        .unwrap();
        let config = Config {
            content_dir: dir.path().to_path_buf(),
            set: crate::config::SetField::parse("draft=false"),
            assume_yes: true,
            ..Config::default()
        };

        let report = run(&config, accept_all).unwrap();
        assert_eq!(report.stats.processed, 2);
        assert_eq!(report.stats.matched, 1);
        assert_eq!(report.modified.len(), 1);
    }

    #[test]
    fn test_diff_preview_suppressed_under_assume_yes() {
        assert!(shows_diff(&Config::default()));
        assert!(shows_diff(&Config {
            dry_run: true,
            assume_yes: true,
            ..Config::default()
        }));
        assert!(!shows_diff(&Config {
            assume_yes: true,
            ..Config::default()
        }));
    }

    #[test]
    fn test_set_counts_updated_even_when_value_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        let original = "---\ndraft: false\n---\nBody\n";
        fs::write(&path, original).unwrap();
        let config = Config {
            content_dir: dir.path().to_path_buf(),
            set: crate::config::SetField::parse("draft=false"),
            assume_yes: true,
            ..Config::default()
        };

        let report = run(&config, accept_all).unwrap();
        assert_eq!(report.stats.updated, 1);
        // The encoded block equals the original, so nothing is written.
        assert!(report.modified.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
