//! Shared file reading utilities
//!
//! Recognizes Go source files, lists the files of a package directory and
//! reads source text.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GosigError, Result};

/// Extension of Go source files.
pub const GO_EXTENSION: &str = ".go";

/// Suffix of Go test files.
pub const TEST_SUFFIX: &str = "_test.go";

/// Whether a file name looks like Go source.
///
/// # Examples
///
/// ```
/// use gosig::file_utils::is_go_file;
///
/// assert!(is_go_file("main.go"));
/// assert!(is_go_file("main_test.go"));
/// assert!(!is_go_file("main.rs"));
/// ```
pub fn is_go_file(name: &str) -> bool {
    name.ends_with(GO_EXTENSION)
}

/// Whether a file name is a Go test file.
pub fn is_test_file(name: &str) -> bool {
    name.ends_with(TEST_SUFFIX)
}

/// List the Go files directly inside `dir`, sorted by name.
///
/// Subdirectories are not descended into. Test files are skipped unless
/// `include_tests` is set. Returns [`GosigError::NoGoFiles`] when nothing
/// qualifies.
pub fn package_files(dir: &Path, include_tests: bool) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| GosigError::read(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GosigError::read(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_go_file(name) || (!include_tests && is_test_file(name)) {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        files.push(path);
    }

    if files.is_empty() {
        return Err(GosigError::NoGoFiles {
            path: dir.to_path_buf(),
        });
    }
    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "listed package files");
    Ok(files)
}

/// Read a source file as UTF-8 text.
pub fn read_source_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| GosigError::read(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_is_test_file() {
        assert!(is_test_file("point_test.go"));
        assert!(!is_test_file("point.go"));
        assert!(!is_test_file("test.go"));
    }

    #[test]
    fn test_package_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.go"), "package p").unwrap();
        fs::write(dir.path().join("a.go"), "package p").unwrap();
        fs::write(dir.path().join("a_test.go"), "package p").unwrap();
        fs::write(dir.path().join("README.md"), "# p").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.go"), "package sub").unwrap();

        let files = package_files(dir.path(), false).unwrap();
        assert_eq!(names(&files), vec!["a.go", "b.go"]);

        let files = package_files(dir.path(), true).unwrap();
        assert_eq!(names(&files), vec!["a.go", "a_test.go", "b.go"]);
    }

    #[test]
    fn test_package_files_skips_directories_named_like_go() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("vendor.go")).unwrap();
        fs::write(dir.path().join("main.go"), "package main").unwrap();

        let files = package_files(dir.path(), false).unwrap();
        assert_eq!(names(&files), vec!["main.go"]);
    }

    #[test]
    fn test_package_files_empty_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("only_test.go"), "package p").unwrap();

        let err = package_files(dir.path(), false).unwrap_err();
        assert!(matches!(err, GosigError::NoGoFiles { .. }));
    }

    #[test]
    fn test_read_source_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.go");
        fs::write(&path, "package main\n").unwrap();
        assert_eq!(read_source_file(&path).unwrap(), "package main\n");

        let err = read_source_file(&dir.path().join("missing.go")).unwrap_err();
        assert!(matches!(err, GosigError::Read { .. }));
    }
}
