//! Fatal errors that abort a whole run

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::syntax::ParseError;

/// Errors that stop processing entirely.
///
/// Per-declaration problems never show up here; those are carried as
/// [`Diagnostic`](crate::extractors::Diagnostic)s on the file they belong to.
#[derive(Debug, Error)]
pub enum GosigError {
    #[error("no files specified")]
    NoPaths,

    #[error("cannot access '{}': {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("there are no go files in {}", path.display())]
    NoGoFiles { path: PathBuf },

    #[error("file {} is neither a directory nor a regular file", path.display())]
    UnsupportedFileType { path: PathBuf },

    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

impl GosigError {
    pub fn stat(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Stat {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GosigError>;
