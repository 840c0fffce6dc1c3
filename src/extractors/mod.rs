//! Declaration extraction
//!
//! Turns the top-level declarations of one parsed file into flat
//! [`Declaration`] records, one per declared name, in source order.
//!
//! Each top-level node tag has its own module:
//!
//! - **imports**: one record per imported path
//! - **types**: one record per type spec
//! - **functions**: one record per function or method
//! - **globals**: one record per name in a `var`/`const` group

pub mod functions;
pub mod globals;
pub mod imports;
pub mod types;

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::string_utils::is_exported;
use crate::syntax::{Decl, SourceFile};

/// Category of a declaration. Exactly one per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Import,
    Function,
    Global,
    Type,
}

impl DeclKind {
    pub const ALL: [DeclKind; 4] = [
        DeclKind::Import,
        DeclKind::Function,
        DeclKind::Global,
        DeclKind::Type,
    ];

    /// Bit used for this kind in a [`KindMask`](crate::filter::KindMask).
    pub fn bit(self) -> u8 {
        match self {
            DeclKind::Import => 1,
            DeclKind::Function => 1 << 1,
            DeclKind::Global => 1 << 2,
            DeclKind::Type => 1 << 3,
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeclKind::Import => "import",
            DeclKind::Function => "function",
            DeclKind::Global => "global",
            DeclKind::Type => "type",
        };
        write!(f, "{}", s)
    }
}

/// One named top-level entity and its rendered signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: DeclKind,
    /// Public by the leading-uppercase convention. Always true for imports.
    pub public: bool,
    /// Bare name (or quoted import path) used for pattern matching.
    #[serde(rename = "name")]
    pub match_key: String,
    /// The full signature line.
    #[serde(rename = "signature")]
    pub rendered: String,
}

impl Declaration {
    /// A declaration whose visibility follows the name convention.
    pub fn named(kind: DeclKind, name: impl Into<String>, rendered: String) -> Self {
        let match_key = name.into();
        Self {
            kind,
            public: is_exported(&match_key),
            match_key,
            rendered,
        }
    }
}

/// A declaration that was skipped because it could not be lowered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line.
    pub line: usize,
    pub message: String,
}

/// Everything extracted from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDeclarations {
    pub file_name: String,
    pub package_name: String,
    pub declarations: Vec<Declaration>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileDeclarations {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Extract declarations from a parsed file.
///
/// Output order is source order. Malformed declarations produce a
/// [`Diagnostic`] and nothing else; their siblings are unaffected.
pub fn extract_file(file_name: impl Into<String>, source: &SourceFile) -> FileDeclarations {
    let mut declarations = Vec::new();
    let mut diagnostics = Vec::new();

    for decl in &source.decls {
        match decl {
            Decl::Import(specs) => imports::extract(specs, &mut declarations),
            Decl::Type(specs) => types::extract(specs, &mut declarations),
            Decl::Func(func) => declarations.push(functions::extract(func)),
            Decl::Value { keyword, specs } => globals::extract(*keyword, specs, &mut declarations),
            Decl::Malformed { line, reason } => diagnostics.push(Diagnostic {
                line: *line,
                message: reason.clone(),
            }),
        }
    }
    trace!(
        declarations = declarations.len(),
        diagnostics = diagnostics.len(),
        "extracted file"
    );

    FileDeclarations {
        file_name: file_name.into(),
        package_name: source.package.clone(),
        declarations,
        diagnostics,
    }
}
