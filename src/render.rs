//! Canonical text for type expressions and signatures
//!
//! Rendering is a pure function of the syntax model: the original spacing of
//! the source never leaks into the output.

use crate::syntax::{ArrayLen, ChanDir, Field, InterfaceElem, Signature, TypeExpr};

/// Render a type expression.
///
/// # Examples
///
/// ```
/// use gosig::render::render_type;
/// use gosig::syntax::TypeExpr;
///
/// let ty = TypeExpr::Map {
///     key: Box::new(TypeExpr::ident("string")),
///     value: Box::new(TypeExpr::slice(TypeExpr::pointer(TypeExpr::ident("Node")))),
/// };
/// assert_eq!(render_type(&ty), "map[string][]*Node");
/// ```
pub fn render_type(ty: &TypeExpr) -> String {
    let mut out = String::new();
    write_type(ty, &mut out);
    out
}

fn write_type(ty: &TypeExpr, out: &mut String) {
    match ty {
        TypeExpr::Ident(name) => out.push_str(name),
        TypeExpr::Qualified { package, name } => {
            out.push_str(package);
            out.push('.');
            out.push_str(name);
        }
        TypeExpr::Pointer(inner) => {
            out.push('*');
            write_type(inner, out);
        }
        TypeExpr::Array { len, elem } => {
            out.push('[');
            match len {
                ArrayLen::Slice => {}
                ArrayLen::Elided => out.push_str("..."),
                ArrayLen::Fixed(n) => out.push_str(n),
            }
            out.push(']');
            write_type(elem, out);
        }
        TypeExpr::Map { key, value } => {
            out.push_str("map[");
            write_type(key, out);
            out.push(']');
            write_type(value, out);
        }
        TypeExpr::Chan { dir, value } => {
            out.push_str(match dir {
                ChanDir::Recv => "<-chan ",
                ChanDir::Send => "chan<- ",
                ChanDir::Both => "chan ",
            });
            write_type(value, out);
        }
        TypeExpr::Func(signature) => {
            out.push_str("func");
            out.push_str(&render_signature(signature));
        }
        TypeExpr::Struct(fields) => {
            out.push_str("struct {");
            for field in fields {
                out.push_str("\n\t");
                if !field.names.is_empty() {
                    out.push_str(&field.names.join(", "));
                    out.push(' ');
                }
                write_type(&field.ty, out);
            }
            if !fields.is_empty() {
                out.push('\n');
            }
            out.push('}');
        }
        TypeExpr::Interface(elems) => {
            out.push_str("interface {");
            for elem in elems {
                out.push_str("\n\t");
                match elem {
                    InterfaceElem::Method { name, signature } => {
                        out.push_str(name);
                        out.push_str(&render_signature(signature));
                    }
                    InterfaceElem::Embedded(ty) => write_type(ty, out),
                }
            }
            if !elems.is_empty() {
                out.push('\n');
            }
            out.push('}');
        }
        TypeExpr::Generic { base, args } => {
            write_type(base, out);
            out.push('[');
            out.push_str(&join_types(args, ", "));
            out.push(']');
        }
        TypeExpr::Union(members) => out.push_str(&join_types(members, " | ")),
        TypeExpr::Approx(inner) => {
            out.push('~');
            write_type(inner, out);
        }
        TypeExpr::Paren(inner) => {
            out.push('(');
            write_type(inner, out);
            out.push(')');
        }
        TypeExpr::Variadic(elem) => {
            out.push_str("...");
            write_type(elem, out);
        }
    }
}

fn join_types(types: &[TypeExpr], sep: &str) -> String {
    types.iter().map(render_type).collect::<Vec<_>>().join(sep)
}

/// Expand a field list to one rendered type per declared name.
///
/// `a, b int` yields `["int", "int"]`; unnamed entries and variadic
/// parameters yield a single type.
pub fn field_types(fields: &[Field]) -> Vec<String> {
    let mut types = Vec::new();
    for field in fields {
        let rendered = render_type(&field.ty);
        let count = match field.ty {
            TypeExpr::Variadic(_) => 1,
            _ => field.names.len().max(1),
        };
        types.extend(std::iter::repeat_n(rendered, count));
    }
    types
}

/// Render `(<params>)` followed by the result segment.
///
/// The result segment is empty for no results, ` T` for one and
/// ` (T1, T2)` for several.
pub fn render_signature(signature: &Signature) -> String {
    let params = field_types(&signature.params).join(", ");
    let results = field_types(&signature.results);
    match results.len() {
        0 => format!("({})", params),
        1 => format!("({}) {}", params, results[0]),
        _ => format!("({}) ({})", params, results.join(", ")),
    }
}

/// Render a type parameter list such as `[K comparable, V any]`.
///
/// Returns an empty string when there are no type parameters.
pub fn render_type_params(params: &[Field]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let groups: Vec<String> = params
        .iter()
        .map(|group| format!("{} {}", group.names.join(", "), render_type(&group.ty)))
        .collect();
    format!("[{}]", groups.join(", "))
}
