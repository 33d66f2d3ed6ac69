//! Filesystem helpers shared by the catalog and source loaders.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::error::LintError;

/// Recursively collect files under `root` whose extension is accepted by
/// `accept`. Paths come back sorted by file name at every level, so runs
/// over the same tree visit files in the same order.
pub fn collect_file_paths(
    root: &Path,
    accept: impl Fn(&str) -> bool,
) -> Result<Vec<PathBuf>, LintError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| LintError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let accepted = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(&accept);
        if accepted {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

/// The immediate subdirectories of `root`, sorted by name.
pub fn child_directories(root: &Path) -> Result<Vec<PathBuf>, LintError> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| LintError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Read a file as text. Invalid UTF-8 is replaced rather than rejected.
pub fn read_text(path: &Path) -> Result<String, LintError> {
    let bytes = std::fs::read(path).map_err(|source| LintError::io(path, source))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// The name diagnostics use for `path`.
pub fn display_name(path: &Path) -> Arc<str> {
    Arc::from(&*path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_file_paths_is_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::write(dir.path().join("z.php"), "").unwrap();
        fs::write(dir.path().join("a.php"), "").unwrap();
        fs::write(dir.path().join("b/nested/c.php"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let paths = collect_file_paths(dir.path(), |ext| ext == "php").unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.php", "b/nested/c.php", "z.php"]);
    }

    #[test]
    fn test_collect_file_paths_missing_root_is_walk_error() {
        let dir = TempDir::new().unwrap();
        let err = collect_file_paths(&dir.path().join("absent"), |_| true).unwrap_err();
        assert!(matches!(err, LintError::Walk { .. }));
    }

    #[test]
    fn test_child_directories_skips_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("fr_FR")).unwrap();
        fs::create_dir(dir.path().join("en_US")).unwrap();
        fs::write(dir.path().join("README"), "").unwrap();

        let dirs = child_directories(dir.path()).unwrap();
        let names: Vec<_> = dirs.iter().map(|p| p.file_name().unwrap().to_owned()).collect();
        assert_eq!(names, vec!["en_US", "fr_FR"]);
    }

    #[test]
    fn test_read_text_replaces_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.po");
        fs::write(&path, b"msgid \"a\xff\"").unwrap();
        let text = read_text(&path).unwrap();
        assert!(text.contains('\u{FFFD}'));
    }
}
