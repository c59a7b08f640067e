//! Optional git commit of the files a run modified

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Config;
use crate::error::{MatterBatchError, Result};

/// Stage and commit `files` in the repository at the current working
/// directory. Returns the commit message that was used.
pub fn commit_changes(config: &Config, files: &[PathBuf]) -> Result<String> {
    ensure_repository(Path::new("."))?;

    let mut add = Command::new("git");
    add.arg("add");
    for file in files {
        add.arg(file);
    }
    let output = add
        .output()
        .map_err(|err| MatterBatchError::git(format!("failed to run git add: {}", err)))?;
    if !output.status.success() {
        return Err(MatterBatchError::git(format!(
            "git add failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let message = commit_message(config);
    let output = Command::new("git")
        .args(["commit", "-m", &message])
        .output()
        .map_err(|err| MatterBatchError::git(format!("failed to run git commit: {}", err)))?;
    if !output.status.success() {
        return Err(MatterBatchError::git(format!(
            "git commit failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    log::info!("committed {} files", files.len());
    Ok(message)
}

fn ensure_repository(dir: &Path) -> Result<()> {
    if dir.join(".git").exists() {
        Ok(())
    } else {
        Err(MatterBatchError::git(
            "--gc enabled but no git repository found",
        ))
    }
}

/// Compose a commit message from what the run did, unless the
/// configuration carries an override.
fn commit_message(config: &Config) -> String {
    if let Some(message) = config.git_message.as_deref().filter(|m| !m.is_empty()) {
        return message.to_string();
    }

    let mut parts = Vec::new();
    if let Some(set) = &config.set {
        parts.push(format!("set {}={}", set.key, set.value));
    }
    if let Some(condition) = config.condition.as_deref().filter(|c| !c.trim().is_empty()) {
        parts.push(format!("filtered on \"{}\"", condition));
    }
    if config.lint {
        if config.fix {
            parts.push("auto-fixed lint issues".to_string());
        } else {
            parts.push("ran lint".to_string());
        }
    }

    if parts.is_empty() {
        "chore: batch update via matterbatch".to_string()
    } else {
        format!("chore: {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SetField;
    use tempfile::TempDir;

    #[test]
    fn test_missing_repository_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = ensure_repository(dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--gc enabled but no git repository found"
        );
    }

    #[test]
    fn test_repository_marker_is_accepted() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(ensure_repository(dir.path()).is_ok());
    }

    #[test]
    fn test_message_override_wins() {
        let config = Config {
            git_message: Some("release: prepare 1.0".to_string()),
            set: Some(SetField::parse("draft=false").unwrap()),
            ..Config::default()
        };
        assert_eq!(commit_message(&config), "release: prepare 1.0");
    }

    #[test]
    fn test_empty_override_falls_through() {
        let config = Config {
            git_message: Some(String::new()),
            set: Some(SetField::parse("draft=false").unwrap()),
            ..Config::default()
        };
        assert_eq!(commit_message(&config), "chore: set draft=false");
    }

    #[test]
    fn test_message_carries_the_full_set_pair() {
        let config = Config {
            set: Some(SetField::parse("draft=false").unwrap()),
            ..Config::default()
        };
        assert_eq!(commit_message(&config), "chore: set draft=false");
    }

    #[test]
    fn test_message_composes_run_description() {
        let config = Config {
            set: Some(SetField::parse("draft=false").unwrap()),
            condition: Some("date<2024-01-01".to_string()),
            lint: true,
            fix: true,
            ..Config::default()
        };
        assert_eq!(
            commit_message(&config),
            "chore: set draft=false, filtered on \"date<2024-01-01\", auto-fixed lint issues"
        );
    }

    #[test]
    fn test_message_lint_without_fix() {
        let config = Config {
            lint: true,
            ..Config::default()
        };
        assert_eq!(commit_message(&config), "chore: ran lint");
    }

    #[test]
    fn test_message_fallback() {
        let config = Config::default();
        assert_eq!(commit_message(&config), "chore: batch update via matterbatch");
    }
}
