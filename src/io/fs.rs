//! Filesystem plumbing: content-tree walking and atomic writes

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::Result;

/// True for `.md` files. The extension match is exact and
/// case-sensitive, so `.MD` and `.markdown` are left alone.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().map(|ext| ext == "md").unwrap_or(false)
}

/// Every markdown file under `dir`, in lexical walk order.
/// Unreadable entries are logged and skipped.
pub fn walk_markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry under {}: {}", dir.display(), err);
                continue;
            }
        };
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.path().to_owned());
        }
    }
    files
}

pub fn read_to_string(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Write `content` to a temporary file in the target's directory, then
/// rename it over `path`. The target is never observed half-written.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|err| {
        std::io::Error::other(format!("failed to persist temporary file: {}", err))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("content/post.md")));
        assert!(!is_markdown(Path::new("content/post.MD")));
        assert!(!is_markdown(Path::new("content/post.markdown")));
        assert!(!is_markdown(Path::new("content/notes.txt")));
        assert!(!is_markdown(Path::new("content/README")));
    }

    #[test]
    fn test_walk_finds_nested_markdown_in_order() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(dir.path().join("zeta.md"), "z").unwrap();
        fs::write(dir.path().join("alpha.md"), "a").unwrap();
        fs::write(dir.path().join("posts/deep.md"), "d").unwrap();
        fs::write(dir.path().join("ignore.txt"), "t").unwrap();

        let files = walk_markdown_files(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha.md", "posts/deep.md", "zeta.md"]);
    }

    #[test]
    fn test_walk_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = walk_markdown_files(&dir.path().join("nope"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new contents\n").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "new contents\n");
    }

    #[test]
    fn test_write_atomic_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.md");

        write_atomic(&path, "hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
