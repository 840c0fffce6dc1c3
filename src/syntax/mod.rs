//! Syntax model for the top level of a Go source file
//!
//! The parser lowers a tree-sitter concrete syntax tree into these types.
//! Everything downstream (rendering, extraction, filtering) works on this
//! closed set of variants and never touches tree-sitter directly.

pub mod parser;

pub use parser::{ParseError, SyntaxError, parse_source};

/// A parsed file: its package name and top-level declarations in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: String,
    pub decls: Vec<Decl>,
}

/// One top-level declaration node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `import "fmt"` or a parenthesized import group.
    Import(Vec<ImportSpec>),
    /// `type X ...` or a parenthesized type group.
    Type(Vec<TypeSpec>),
    /// A function or method declaration.
    Func(FuncDecl),
    /// `var` / `const` declaration, possibly grouped.
    Value {
        keyword: ValueKeyword,
        specs: Vec<ValueSpec>,
    },
    /// A declaration that could not be lowered. `line` is 1-based.
    Malformed { line: usize, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local name: an identifier, `.` or `_`.
    pub alias: Option<String>,
    /// The path literal including its quotes.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub type_params: Vec<Field>,
    /// `type A = B`
    pub is_alias: bool,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    /// Receiver type of a method; `None` for plain functions.
    pub receiver: Option<TypeExpr>,
    pub type_params: Vec<Field>,
    pub signature: Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKeyword {
    Var,
    Const,
}

impl ValueKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKeyword::Var => "var",
            ValueKeyword::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<TypeExpr>,
}

/// A group of names sharing one type.
///
/// Used for parameters, results, struct fields and type parameters.
/// Unnamed parameters and embedded fields have no names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl Field {
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }

    pub fn named<S: Into<String>>(names: impl IntoIterator<Item = S>, ty: TypeExpr) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty,
        }
    }
}

/// Parameters and results of a function, method or function type.
///
/// An absent result list is represented as an empty `results`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLen {
    /// `[]T`
    Slice,
    /// `[...]T`
    Elided,
    /// `[N]T`, holding the length expression as written.
    Fixed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElem {
    Method { name: String, signature: Signature },
    Embedded(TypeExpr),
}

/// A type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Ident(String),
    Qualified {
        package: String,
        name: String,
    },
    Pointer(Box<TypeExpr>),
    Array {
        len: ArrayLen,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        value: Box<TypeExpr>,
    },
    Func(Signature),
    Struct(Vec<Field>),
    Interface(Vec<InterfaceElem>),
    /// `Base[A, B]`
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    /// `A | B` in constraints and interface elements.
    Union(Vec<TypeExpr>),
    /// `~T`
    Approx(Box<TypeExpr>),
    Paren(Box<TypeExpr>),
    /// `...T`, only valid as the type of a final parameter.
    Variadic(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Array {
            len: ArrayLen::Slice,
            elem: Box::new(elem),
        }
    }
}
