//! Lowering from the tree-sitter Go grammar into the syntax model
//!
//! Two failure tiers:
//! - [`ParseError`]: the file as a whole is unusable (no tree, no package clause).
//! - [`SyntaxError`]: a single top-level declaration is broken or uses a node
//!   variant we do not lower. These are folded into [`Decl::Malformed`] so the
//!   remaining declarations of the file still come through.

use thiserror::Error;
use tracing::{debug, trace};
use tree_sitter::{Node, Parser};

use super::{
    ArrayLen, ChanDir, Decl, Field, FuncDecl, ImportSpec, InterfaceElem, Signature, SourceFile,
    TypeExpr, TypeSpec, ValueKeyword, ValueSpec,
};

/// Whole-file parse failure.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load Go grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("parser produced no syntax tree")]
    NoTree,

    #[error("expected 'package' clause")]
    MissingPackage,
}

/// Failure to lower one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("syntax error at line {line}")]
    Invalid { line: usize },

    #[error("unsupported {kind} node at line {line}")]
    Unsupported { kind: &'static str, line: usize },

    #[error("{kind} at line {line} has no {field}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
        line: usize,
    },

    #[error("invalid UTF-8 at line {line}")]
    Text { line: usize },
}

impl SyntaxError {
    pub fn line(&self) -> usize {
        match self {
            SyntaxError::Invalid { line }
            | SyntaxError::Unsupported { line, .. }
            | SyntaxError::MissingField { line, .. }
            | SyntaxError::Text { line } => *line,
        }
    }
}

type Lowered<T> = Result<T, SyntaxError>;

/// Parse Go source text into a [`SourceFile`].
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
    let root = tree.root_node();

    let lower = Lowering {
        source: source.as_bytes(),
    };
    let mut package = None;
    let mut decls = Vec::new();

    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "comment" => {}
            "package_clause" if package.is_none() => {
                package = Some(lower.package_name(node).map_err(|e| {
                    debug!(error = %e, "package clause is malformed");
                    ParseError::MissingPackage
                })?);
            }
            _ => {
                let decl = lower.decl(node).unwrap_or_else(|e| {
                    trace!(error = %e, "skipping malformed declaration");
                    Decl::Malformed {
                        line: e.line(),
                        reason: e.to_string(),
                    }
                });
                decls.push(decl);
            }
        }
    }

    let package = package.ok_or(ParseError::MissingPackage)?;
    debug!(package = %package, decls = decls.len(), "parsed source file");
    Ok(SourceFile { package, decls })
}

fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}

struct Lowering<'src> {
    source: &'src [u8],
}

impl Lowering<'_> {
    fn text(&self, node: Node) -> Lowered<String> {
        node.utf8_text(self.source)
            .map(str::to_string)
            .map_err(|_| SyntaxError::Text {
                line: line_of(node),
            })
    }

    fn required<'t>(&self, node: Node<'t>, field: &'static str) -> Lowered<Node<'t>> {
        node.child_by_field_name(field)
            .ok_or(SyntaxError::MissingField {
                kind: node.kind(),
                field,
                line: line_of(node),
            })
    }

    /// Named children with comments stripped.
    fn elements<'t>(&self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    /// Identifier texts stored under `field`, skipping separators.
    fn names(&self, node: Node, field: &str) -> Lowered<Vec<String>> {
        let mut cursor = node.walk();
        node.children_by_field_name(field, &mut cursor)
            .filter(|child| child.is_named())
            .map(|child| self.text(child))
            .collect()
    }

    fn only_child<'t>(&self, node: Node<'t>) -> Lowered<Node<'t>> {
        self.elements(node)
            .into_iter()
            .next()
            .ok_or(SyntaxError::MissingField {
                kind: node.kind(),
                field: "type",
                line: line_of(node),
            })
    }

    fn package_name(&self, node: Node) -> Lowered<String> {
        if node.has_error() {
            return Err(SyntaxError::Invalid {
                line: line_of(node),
            });
        }
        let ident = self.only_child(node)?;
        self.text(ident)
    }

    fn decl(&self, node: Node) -> Lowered<Decl> {
        if node.has_error() {
            return Err(SyntaxError::Invalid {
                line: line_of(node),
            });
        }
        match node.kind() {
            "import_declaration" => self.import_decl(node).map(Decl::Import),
            "type_declaration" => self.type_decl(node).map(Decl::Type),
            "function_declaration" | "method_declaration" => self.func_decl(node).map(Decl::Func),
            "var_declaration" => Ok(Decl::Value {
                keyword: ValueKeyword::Var,
                specs: self.value_specs(node)?,
            }),
            "const_declaration" => Ok(Decl::Value {
                keyword: ValueKeyword::Const,
                specs: self.value_specs(node)?,
            }),
            kind => Err(SyntaxError::Unsupported {
                kind,
                line: line_of(node),
            }),
        }
    }

    fn import_decl(&self, node: Node) -> Lowered<Vec<ImportSpec>> {
        let mut specs = Vec::new();
        for child in self.elements(node) {
            match child.kind() {
                "import_spec" => specs.push(self.import_spec(child)?),
                "import_spec_list" => {
                    for spec in self.elements(child) {
                        specs.push(self.import_spec(spec)?);
                    }
                }
                kind => {
                    return Err(SyntaxError::Unsupported {
                        kind,
                        line: line_of(child),
                    });
                }
            }
        }
        Ok(specs)
    }

    fn import_spec(&self, node: Node) -> Lowered<ImportSpec> {
        if node.kind() != "import_spec" {
            return Err(SyntaxError::Unsupported {
                kind: node.kind(),
                line: line_of(node),
            });
        }
        let alias = node
            .child_by_field_name("name")
            .map(|name| self.text(name))
            .transpose()?;
        let path = self.text(self.required(node, "path")?)?;
        Ok(ImportSpec { alias, path })
    }

    fn type_decl(&self, node: Node) -> Lowered<Vec<TypeSpec>> {
        self.elements(node)
            .into_iter()
            .map(|spec| match spec.kind() {
                "type_spec" => self.type_spec(spec, false),
                "type_alias" => self.type_spec(spec, true),
                kind => Err(SyntaxError::Unsupported {
                    kind,
                    line: line_of(spec),
                }),
            })
            .collect()
    }

    fn type_spec(&self, node: Node, is_alias: bool) -> Lowered<TypeSpec> {
        Ok(TypeSpec {
            name: self.text(self.required(node, "name")?)?,
            type_params: self.type_params(node)?,
            is_alias,
            ty: self.ty(self.required(node, "type")?)?,
        })
    }

    fn type_params(&self, node: Node) -> Lowered<Vec<Field>> {
        let Some(list) = node.child_by_field_name("type_parameters") else {
            return Ok(Vec::new());
        };
        self.elements(list)
            .into_iter()
            .map(|param| {
                let constraint = self.required(param, "type")?;
                Ok(Field {
                    names: self.names(param, "name")?,
                    ty: self.type_elem(constraint)?,
                })
            })
            .collect()
    }

    fn func_decl(&self, node: Node) -> Lowered<FuncDecl> {
        let receiver = match node.child_by_field_name("receiver") {
            Some(list) => Some(self.receiver(list)?),
            None => None,
        };
        Ok(FuncDecl {
            name: self.text(self.required(node, "name")?)?,
            receiver,
            type_params: self.type_params(node)?,
            signature: self.signature(node)?,
        })
    }

    fn receiver(&self, list: Node) -> Lowered<TypeExpr> {
        let first = self
            .elements(list)
            .into_iter()
            .next()
            .ok_or(SyntaxError::MissingField {
                kind: "method_declaration",
                field: "receiver",
                line: line_of(list),
            })?;
        self.ty(self.required(first, "type")?)
    }

    /// Reads the `parameters` and `result` fields of a function-like node.
    fn signature(&self, node: Node) -> Lowered<Signature> {
        let params = self.params(self.required(node, "parameters")?)?;
        let results = match node.child_by_field_name("result") {
            None => Vec::new(),
            Some(result) if result.kind() == "parameter_list" => self.params(result)?,
            Some(result) => vec![Field::unnamed(self.ty(result)?)],
        };
        Ok(Signature { params, results })
    }

    fn params(&self, list: Node) -> Lowered<Vec<Field>> {
        self.elements(list)
            .into_iter()
            .map(|param| {
                let ty = self.ty(self.required(param, "type")?)?;
                match param.kind() {
                    "parameter_declaration" => Ok(Field {
                        names: self.names(param, "name")?,
                        ty,
                    }),
                    "variadic_parameter_declaration" => Ok(Field {
                        names: self.names(param, "name")?,
                        ty: TypeExpr::Variadic(Box::new(ty)),
                    }),
                    kind => Err(SyntaxError::Unsupported {
                        kind,
                        line: line_of(param),
                    }),
                }
            })
            .collect()
    }

    fn value_specs(&self, node: Node) -> Lowered<Vec<ValueSpec>> {
        let mut specs = Vec::new();
        for child in self.elements(node) {
            match child.kind() {
                "var_spec" | "const_spec" => specs.push(self.value_spec(child)?),
                "var_spec_list" => {
                    for spec in self.elements(child) {
                        specs.push(self.value_spec(spec)?);
                    }
                }
                kind => {
                    return Err(SyntaxError::Unsupported {
                        kind,
                        line: line_of(child),
                    });
                }
            }
        }
        Ok(specs)
    }

    fn value_spec(&self, node: Node) -> Lowered<ValueSpec> {
        let ty = match node.child_by_field_name("type") {
            Some(ty) => Some(self.ty(ty)?),
            None => None,
        };
        Ok(ValueSpec {
            names: self.names(node, "name")?,
            ty,
        })
    }

    fn ty(&self, node: Node) -> Lowered<TypeExpr> {
        let line = line_of(node);
        let ty = match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Ident(self.text(node)?),
            "qualified_type" => TypeExpr::Qualified {
                package: self.text(self.required(node, "package")?)?,
                name: self.text(self.required(node, "name")?)?,
            },
            "pointer_type" => TypeExpr::Pointer(Box::new(self.ty(self.only_child(node)?)?)),
            "array_type" => TypeExpr::Array {
                len: ArrayLen::Fixed(self.text(self.required(node, "length")?)?),
                elem: Box::new(self.ty(self.required(node, "element")?)?),
            },
            "implicit_length_array_type" => TypeExpr::Array {
                len: ArrayLen::Elided,
                elem: Box::new(self.ty(self.required(node, "element")?)?),
            },
            "slice_type" => TypeExpr::Array {
                len: ArrayLen::Slice,
                elem: Box::new(self.ty(self.required(node, "element")?)?),
            },
            "map_type" => TypeExpr::Map {
                key: Box::new(self.ty(self.required(node, "key")?)?),
                value: Box::new(self.ty(self.required(node, "value")?)?),
            },
            "channel_type" => TypeExpr::Chan {
                dir: chan_dir(node),
                value: Box::new(self.ty(self.required(node, "value")?)?),
            },
            "function_type" => TypeExpr::Func(self.signature(node)?),
            "struct_type" => {
                let list = self.only_child(node)?;
                TypeExpr::Struct(self.struct_fields(list)?)
            }
            "interface_type" => TypeExpr::Interface(self.interface_elems(node)?),
            "generic_type" => {
                let args = self.required(node, "type_arguments")?;
                TypeExpr::Generic {
                    base: Box::new(self.ty(self.required(node, "type")?)?),
                    args: self
                        .elements(args)
                        .into_iter()
                        .map(|arg| self.type_elem(arg))
                        .collect::<Lowered<_>>()?,
                }
            }
            "type_elem" | "type_constraint" => self.type_elem(node)?,
            "negated_type" => TypeExpr::Approx(Box::new(self.ty(self.only_child(node)?)?)),
            "parenthesized_type" => TypeExpr::Paren(Box::new(self.ty(self.only_child(node)?)?)),
            kind => return Err(SyntaxError::Unsupported { kind, line }),
        };
        Ok(ty)
    }

    /// `A | B | C`, collapsing to the single type when there is no union.
    fn type_elem(&self, node: Node) -> Lowered<TypeExpr> {
        if node.kind() != "type_elem" && node.kind() != "type_constraint" {
            return self.ty(node);
        }
        let mut members = self
            .elements(node)
            .into_iter()
            .map(|member| self.ty(member))
            .collect::<Lowered<Vec<_>>>()?;
        match members.len() {
            0 => Err(SyntaxError::MissingField {
                kind: "type_elem",
                field: "type",
                line: line_of(node),
            }),
            1 => Ok(members.remove(0)),
            _ => Ok(TypeExpr::Union(members)),
        }
    }

    fn struct_fields(&self, list: Node) -> Lowered<Vec<Field>> {
        self.elements(list)
            .into_iter()
            .map(|field| {
                if field.kind() != "field_declaration" {
                    return Err(SyntaxError::Unsupported {
                        kind: field.kind(),
                        line: line_of(field),
                    });
                }
                let names = self.names(field, "name")?;
                let mut ty = self.ty(self.required(field, "type")?)?;
                if names.is_empty() && has_token(field, "*") {
                    ty = TypeExpr::Pointer(Box::new(ty));
                }
                Ok(Field { names, ty })
            })
            .collect()
    }

    fn interface_elems(&self, node: Node) -> Lowered<Vec<InterfaceElem>> {
        self.elements(node)
            .into_iter()
            .map(|elem| match elem.kind() {
                "method_elem" => Ok(InterfaceElem::Method {
                    name: self.text(self.required(elem, "name")?)?,
                    signature: self.signature(elem)?,
                }),
                _ => Ok(InterfaceElem::Embedded(self.type_elem(elem)?)),
            })
            .collect()
    }
}

/// Direction of a channel type from its anonymous tokens:
/// `<-chan T` receives, `chan<- T` sends.
fn chan_dir(node: Node) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node
        .children(&mut cursor)
        .filter(|child| !child.is_named())
        .map(|child| child.kind())
        .collect();
    match tokens.as_slice() {
        ["<-", "chan", ..] => ChanDir::Recv,
        ["chan", "<-", ..] => ChanDir::Send,
        _ => ChanDir::Both,
    }
}

fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SourceFile {
        parse_source(source).expect("source should parse")
    }

    fn only_decl(source: &str) -> Decl {
        let mut file = parse(source);
        assert_eq!(file.decls.len(), 1, "decls: {:?}", file.decls);
        file.decls.remove(0)
    }

    #[test]
    fn test_package_name() {
        let file = parse("package geometry\n");
        assert_eq!(file.package, "geometry");
        assert!(file.decls.is_empty());
    }

    #[test]
    fn test_missing_package_is_fatal() {
        let err = parse_source("func main() {}\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingPackage));
    }

    #[test]
    fn test_imports_keep_quotes_and_alias() {
        let decl = only_decl("package p\n\nimport (\n\t\"fmt\"\n\tstr \"strings\"\n\t_ \"embed\"\n)\n");
        assert_eq!(
            decl,
            Decl::Import(vec![
                ImportSpec {
                    alias: None,
                    path: "\"fmt\"".to_string()
                },
                ImportSpec {
                    alias: Some("str".to_string()),
                    path: "\"strings\"".to_string()
                },
                ImportSpec {
                    alias: Some("_".to_string()),
                    path: "\"embed\"".to_string()
                },
            ])
        );
    }

    #[test]
    fn test_method_receiver_and_results() {
        let decl = only_decl(
            "package p\n\nfunc (p *Point) Dist(q Point) (d float64, ok bool) { return 0, true }\n",
        );
        let Decl::Func(func) = decl else {
            panic!("expected a function");
        };
        assert_eq!(func.name, "Dist");
        assert_eq!(
            func.receiver,
            Some(TypeExpr::pointer(TypeExpr::ident("Point")))
        );
        assert_eq!(
            func.signature.params,
            vec![Field::named(["q"], TypeExpr::ident("Point"))]
        );
        assert_eq!(
            func.signature.results,
            vec![
                Field::named(["d"], TypeExpr::ident("float64")),
                Field::named(["ok"], TypeExpr::ident("bool")),
            ]
        );
    }

    #[test]
    fn test_single_bare_result() {
        let decl = only_decl("package p\n\nfunc Len() int { return 0 }\n");
        let Decl::Func(func) = decl else {
            panic!("expected a function");
        };
        assert!(func.receiver.is_none());
        assert_eq!(
            func.signature.results,
            vec![Field::unnamed(TypeExpr::ident("int"))]
        );
    }

    #[test]
    fn test_variadic_param() {
        let decl = only_decl("package p\n\nfunc Printf(format string, args ...any) {}\n");
        let Decl::Func(func) = decl else {
            panic!("expected a function");
        };
        assert_eq!(
            func.signature.params[1],
            Field::named(
                ["args"],
                TypeExpr::Variadic(Box::new(TypeExpr::ident("any")))
            )
        );
    }

    #[test]
    fn test_grouped_const_names() {
        let decl = only_decl("package p\n\nconst (\n\tA, B int = 1, 2\n\tC\n)\n");
        assert_eq!(
            decl,
            Decl::Value {
                keyword: ValueKeyword::Const,
                specs: vec![
                    ValueSpec {
                        names: vec!["A".to_string(), "B".to_string()],
                        ty: Some(TypeExpr::ident("int")),
                    },
                    ValueSpec {
                        names: vec!["C".to_string()],
                        ty: None,
                    },
                ],
            }
        );
    }

    #[test]
    fn test_var_group() {
        let decl = only_decl("package p\n\nvar (\n\tx int\n\ty = 2\n)\n");
        let Decl::Value { keyword, specs } = decl else {
            panic!("expected a value declaration");
        };
        assert_eq!(keyword, ValueKeyword::Var);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].names, vec!["y".to_string()]);
        assert!(specs[1].ty.is_none());
    }

    #[test]
    fn test_channel_directions() {
        let decl = only_decl(
            "package p\n\nvar (\n\ta chan int\n\tb <-chan int\n\tc chan<- int\n)\n",
        );
        let Decl::Value { specs, .. } = decl else {
            panic!("expected a value declaration");
        };
        let dirs: Vec<ChanDir> = specs
            .iter()
            .map(|spec| match &spec.ty {
                Some(TypeExpr::Chan { dir, .. }) => *dir,
                other => panic!("expected a channel, got {:?}", other),
            })
            .collect();
        assert_eq!(dirs, vec![ChanDir::Both, ChanDir::Recv, ChanDir::Send]);
    }

    #[test]
    fn test_struct_with_embedded_pointer() {
        let decl = only_decl(
            "package p\n\ntype T struct {\n\t*sync.Mutex\n\tX, Y int `json:\"x\"`\n}\n",
        );
        let Decl::Type(specs) = decl else {
            panic!("expected a type declaration");
        };
        assert_eq!(
            specs[0].ty,
            TypeExpr::Struct(vec![
                Field::unnamed(TypeExpr::pointer(TypeExpr::Qualified {
                    package: "sync".to_string(),
                    name: "Mutex".to_string(),
                })),
                Field::named(["X", "Y"], TypeExpr::ident("int")),
            ])
        );
    }

    #[test]
    fn test_interface_elements() {
        let decl = only_decl(
            "package p\n\ntype RW interface {\n\tio.Reader\n\tWrite(p []byte) (int, error)\n}\n",
        );
        let Decl::Type(specs) = decl else {
            panic!("expected a type declaration");
        };
        let TypeExpr::Interface(elems) = &specs[0].ty else {
            panic!("expected an interface");
        };
        assert_eq!(elems.len(), 2);
        assert!(matches!(
            &elems[0],
            InterfaceElem::Embedded(TypeExpr::Qualified { .. })
        ));
        assert!(matches!(&elems[1], InterfaceElem::Method { name, .. } if name == "Write"));
    }

    #[test]
    fn test_generic_type_spec() {
        let decl = only_decl("package p\n\ntype List[T any] struct {\n\titems []T\n}\n");
        let Decl::Type(specs) = decl else {
            panic!("expected a type declaration");
        };
        assert_eq!(
            specs[0].type_params,
            vec![Field::named(["T"], TypeExpr::ident("any"))]
        );
    }

    #[test]
    fn test_type_alias() {
        let decl = only_decl("package p\n\ntype Bytes = []byte\n");
        let Decl::Type(specs) = decl else {
            panic!("expected a type declaration");
        };
        assert!(specs[0].is_alias);
        assert_eq!(specs[0].ty, TypeExpr::slice(TypeExpr::ident("byte")));
    }

    #[test]
    fn test_stray_tokens_become_malformed() {
        let file = parse("package p\n\nfunc A() {}\n\n)\n\ntype B int\n");
        let malformed = file
            .decls
            .iter()
            .filter(|d| matches!(d, Decl::Malformed { .. }))
            .count();
        assert!(malformed >= 1, "decls: {:?}", file.decls);
        assert!(file
            .decls
            .iter()
            .any(|d| matches!(d, Decl::Func(f) if f.name == "A")));
        assert!(file
            .decls
            .iter()
            .any(|d| matches!(d, Decl::Type(specs) if specs[0].name == "B")));
    }

    #[test]
    fn test_top_level_statement_is_unsupported() {
        let decl = only_decl("package p\n\nx := 1\n");
        assert!(matches!(decl, Decl::Malformed { line: 3, .. }), "{:?}", decl);
    }
}
