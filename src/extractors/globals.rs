//! `var` and `const` declarations

use super::{DeclKind, Declaration};
use crate::render::render_type;
use crate::syntax::{ValueKeyword, ValueSpec};

/// One record per declared name.
///
/// Within one group, a spec without an explicit type reuses the last type
/// seen in that group. A group whose first specs are untyped renders them
/// with an empty type.
pub fn extract(keyword: ValueKeyword, specs: &[ValueSpec], out: &mut Vec<Declaration>) {
    let mut carried = String::new();
    for spec in specs {
        if let Some(ty) = &spec.ty {
            carried = render_type(ty);
        }
        for name in &spec.names {
            let rendered = format!("{} {} {}", keyword.as_str(), name, carried);
            out.push(Declaration::named(DeclKind::Global, name.as_str(), rendered));
        }
    }
}
