//! Import declarations

use super::{DeclKind, Declaration};
use crate::syntax::ImportSpec;

/// One record per imported path.
///
/// Imports are always marked public so visibility filtering never hides them;
/// the match key is the path literal as written, quotes included.
pub fn extract(specs: &[ImportSpec], out: &mut Vec<Declaration>) {
    for spec in specs {
        let rendered = match &spec.alias {
            Some(alias) => format!("import {} {}", alias, spec.path),
            None => format!("import {}", spec.path),
        };
        out.push(Declaration {
            kind: DeclKind::Import,
            public: true,
            match_key: spec.path.clone(),
            rendered,
        });
    }
}
