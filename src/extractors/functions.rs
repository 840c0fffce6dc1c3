//! Function and method declarations

use super::{DeclKind, Declaration};
use crate::render::{render_signature, render_type, render_type_params};
use crate::syntax::FuncDecl;

/// Render `func [(Recv)] Name[TypeParams](params) results`.
///
/// The match key is the bare name, so methods of the same name on different
/// receivers are indistinguishable to the name pattern.
pub fn extract(func: &FuncDecl) -> Declaration {
    let receiver = match &func.receiver {
        Some(recv) => format!(" ({}) ", render_type(recv)),
        None => " ".to_string(),
    };
    let rendered = format!(
        "func{}{}{}{}",
        receiver,
        func.name,
        render_type_params(&func.type_params),
        render_signature(&func.signature)
    );
    Declaration::named(DeclKind::Function, func.name.as_str(), rendered)
}
