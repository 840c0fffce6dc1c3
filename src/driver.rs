//! Resolve path arguments and extract declarations file by file

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GosigError, Result};
use crate::extractors::{FileDeclarations, extract_file};
use crate::file_utils::{package_files, read_source_file};
use crate::syntax::parse_source;

/// Expand path arguments into the list of files to process, in order.
///
/// Regular files are taken as-is; directories contribute their Go files.
pub fn resolve_inputs(paths: &[PathBuf], include_tests: bool) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        return Err(GosigError::NoPaths);
    }

    let mut files = Vec::new();
    for path in paths {
        let metadata = fs::metadata(path).map_err(|e| GosigError::stat(path, e))?;
        if metadata.is_dir() {
            files.extend(package_files(path, include_tests)?);
        } else if metadata.is_file() {
            files.push(path.clone());
        } else {
            return Err(GosigError::UnsupportedFileType { path: path.clone() });
        }
    }
    Ok(files)
}

/// Parse one file and extract its declarations.
pub fn process_file(path: &Path) -> Result<FileDeclarations> {
    let source = read_source_file(path)?;
    let parsed = parse_source(&source).map_err(|source| GosigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let file = extract_file(path.display().to_string(), &parsed);
    debug!(
        file = %file.file_name,
        declarations = file.declarations.len(),
        "processed file"
    );
    Ok(file)
}

/// Process every input, stopping at the first fatal error.
///
/// `on_file` sees each file as soon as it has been extracted, which lets the
/// caller report per-file diagnostics before a later file fails.
pub fn collect_declarations<F>(
    paths: &[PathBuf],
    include_tests: bool,
    mut on_file: F,
) -> Result<Vec<FileDeclarations>>
where
    F: FnMut(&FileDeclarations),
{
    let files = resolve_inputs(paths, include_tests)?;
    let mut results = Vec::with_capacity(files.len());
    for path in &files {
        let file = process_file(path)?;
        on_file(&file);
        results.push(file);
    }
    Ok(results)
}
