//! Type declarations

use super::{DeclKind, Declaration};
use crate::render::{render_type, render_type_params};
use crate::syntax::TypeSpec;

/// One record per type spec, grouped or not.
pub fn extract(specs: &[TypeSpec], out: &mut Vec<Declaration>) {
    for spec in specs {
        let assign = if spec.is_alias { " = " } else { " " };
        let rendered = format!(
            "type {}{}{}{}",
            spec.name,
            render_type_params(&spec.type_params),
            assign,
            render_type(&spec.ty)
        );
        out.push(Declaration::named(DeclKind::Type, spec.name.as_str(), rendered));
    }
}
