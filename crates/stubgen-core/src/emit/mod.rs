//! Stub serializer
//!
//! Renders a [`StubDocument`] as Python stub source:
//! - 4-space indentation
//! - one blank line between top-level definitions
//! - `...` on the same line for empty bodies
//! - triple-quoted docstrings and double-quoted string literals

pub mod external;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::ast::TypeExpr;
use crate::reflect::{Literal, ParamKind};
use crate::stub::ir::{ClassDef, Expr, FunctionDef, Param, Statement, StubDocument};

pub use external::ExternalFormatter;

/// Default indentation: 4 spaces
const INDENT: &str = "    ";

/// Renders stub documents to text
pub struct StubEmitter {
    /// Output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl StubEmitter {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Render a document. The result always ends with a newline.
    #[must_use]
    pub fn emit(document: &StubDocument) -> String {
        let mut emitter = Self::new();
        emitter.write_document(document);
        if !emitter.output.ends_with('\n') {
            emitter.output.push('\n');
        }
        emitter.output
    }

    // ==================== Output Helpers ====================

    fn write(&mut self, s: &str) {
        if self.at_line_start && !s.is_empty() {
            self.write_indent();
            self.at_line_start = false;
        }
        self.output.push_str(s);
    }

    fn writeln(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    // ==================== Statements ====================

    fn write_document(&mut self, document: &StubDocument) {
        let mut previous: Option<&Statement> = None;
        for statement in &document.body {
            if let Some(previous) = previous {
                if !same_group(previous, statement) {
                    self.writeln();
                }
            }
            self.write_statement(statement);
            previous = Some(statement);
        }
    }

    fn write_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::ImportFrom { module, names } => {
                self.write(&format!("from {module} import {}", names.join(", ")));
                self.writeln();
            }
            Statement::Import { module } => {
                self.write(&format!("import {module}"));
                self.writeln();
            }
            Statement::Class(class) => self.write_class(class),
            Statement::Function(function) => self.write_function(function),
            Statement::AnnAssign {
                target,
                annotation,
                value,
            } => {
                self.write(&format!("{target}: {}", render_type(annotation)));
                match value {
                    Some(Expr::Literal(literal)) => {
                        self.write(" = ");
                        self.write(&render_literal(literal));
                    }
                    Some(Expr::Ellipsis) => self.write(" = ..."),
                    None => {}
                }
                self.writeln();
            }
            Statement::Docstring(text) => self.write_docstring(text),
            Statement::Ellipsis => {
                self.write("...");
                self.writeln();
            }
        }
    }

    fn write_decorators(&mut self, decorators: &[String]) {
        for decorator in decorators {
            self.write("@");
            self.write(decorator);
            self.writeln();
        }
    }

    fn write_class(&mut self, class: &ClassDef) {
        self.write_decorators(&class.decorators);
        self.write(&format!("class {}:", class.name));
        self.write_body(&class.body);
    }

    fn write_function(&mut self, function: &FunctionDef) {
        self.write_decorators(&function.decorators);
        self.write(&format!("def {}(", function.name));
        self.write(&render_params(&function.params));
        self.write(")");
        if let Some(returns) = &function.returns {
            self.write(" -> ");
            self.write(&render_type(returns));
        }
        self.write(":");
        self.write_body(&function.body);
    }

    /// Write a block body after its header. A lone `...` stays on the header line.
    fn write_body(&mut self, body: &[Statement]) {
        if matches!(body, [] | [Statement::Ellipsis]) {
            self.write(" ...");
            self.writeln();
            return;
        }
        self.writeln();
        self.indent();
        for statement in body {
            self.write_statement(statement);
        }
        self.dedent();
    }

    fn write_docstring(&mut self, text: &str) {
        let escaped = escape_docstring(text);
        self.write("\"\"\"");
        for (i, line) in escaped.split('\n').enumerate() {
            if i > 0 {
                self.writeln();
            }
            self.write(line);
        }
        self.write("\"\"\"");
        self.writeln();
    }
}

/// Returns true if no blank line separates the two top-level statements
fn same_group(previous: &Statement, next: &Statement) -> bool {
    let is_import = |s: &Statement| matches!(s, Statement::ImportFrom { .. } | Statement::Import { .. });
    let is_assign = |s: &Statement| matches!(s, Statement::AnnAssign { .. });
    (is_import(previous) && is_import(next)) || (is_assign(previous) && is_assign(next))
}

/// Render a type annotation in Python syntax
#[must_use]
pub fn render_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Name(path) => path.clone(),
        TypeExpr::Generic { base, args } => format!("{base}[{}]", render_list(args, ", ")),
        TypeExpr::Union(items) => render_list(items, " | "),
        TypeExpr::Tuple(items) => format!("typing.Tuple[{}]", render_list(items, ", ")),
    }
}

fn render_list(items: &[TypeExpr], separator: &str) -> String {
    items.iter().map(render_type).collect::<Vec<_>>().join(separator)
}

/// Render a parameter list, adding the `/` and `*` markers
#[must_use]
pub fn render_params(params: &[Param]) -> String {
    let last_positional_only = params
        .iter()
        .rposition(|p| p.kind == ParamKind::PositionalOnly);
    let has_var_positional = params.iter().any(|p| p.kind == ParamKind::VarPositional);

    let mut parts = Vec::with_capacity(params.len() + 2);
    let mut star_written = has_var_positional;
    for (i, param) in params.iter().enumerate() {
        if param.kind == ParamKind::KeywordOnly && !star_written {
            parts.push("*".to_string());
            star_written = true;
        }
        parts.push(render_param(param));
        if Some(i) == last_positional_only {
            parts.push("/".to_string());
        }
    }
    parts.join(", ")
}

fn render_param(param: &Param) -> String {
    let prefix = match param.kind {
        ParamKind::VarPositional => "*",
        ParamKind::VarKeyword => "**",
        _ => "",
    };
    let mut out = format!("{prefix}{}", param.name);
    if let Some(annotation) = &param.annotation {
        out.push_str(": ");
        out.push_str(&render_type(annotation));
    }
    if let Some(default) = &param.default {
        out.push_str(if param.annotation.is_some() { " = " } else { "=" });
        out.push_str(&render_literal(default));
    }
    out
}

/// Render a literal value in Python syntax
#[must_use]
pub fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::None => "None".to_string(),
        Literal::Bool(true) => "True".to_string(),
        Literal::Bool(false) => "False".to_string(),
        Literal::Int(n) => n.to_string(),
        Literal::Float(x) if x.is_nan() => "float(\"nan\")".to_string(),
        Literal::Float(x) if x.is_infinite() => {
            let sign = if x.is_sign_negative() { "-" } else { "" };
            format!("float(\"{sign}inf\")")
        }
        Literal::Float(x) => format!("{x:?}"),
        Literal::Str(s) => quote(s),
        Literal::StrTuple(items) => match items.as_slice() {
            [single] => format!("({},)", quote(single)),
            _ => format!(
                "({})",
                items.iter().map(|s| quote(s)).collect::<Vec<_>>().join(", ")
            ),
        },
    }
}

/// Double-quoted Python string literal
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Escape text for use inside a triple-quoted docstring.
///
/// Quotes next to another quote, or at the very end, are escaped so the
/// text can never close the docstring early.
fn escape_docstring(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => {
                let adjacent = (i > 0 && chars[i - 1] == '"') || chars.get(i + 1) == Some(&'"');
                if adjacent || i + 1 == chars.len() {
                    out.push_str("\\\"");
                } else {
                    out.push('"');
                }
            }
            c => out.push(c),
        }
    }
    out
}

/// Write stub text to `path` and flush it to disk.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_stub(path: &Path, text: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, ty: Option<&str>, kind: ParamKind) -> Param {
        Param {
            name: name.into(),
            annotation: ty.map(TypeExpr::name),
            default: None,
            kind,
        }
    }

    fn function(name: &str, params: Vec<Param>, returns: Option<&str>) -> Statement {
        Statement::Function(FunctionDef {
            name: name.into(),
            decorators: Vec::new(),
            params,
            returns: returns.map(TypeExpr::name),
            body: vec![Statement::Ellipsis],
        })
    }

    #[test]
    fn render_types() {
        let ty = TypeExpr::Union(vec![
            TypeExpr::generic("list", vec![TypeExpr::name("time.Epoch")]),
            TypeExpr::name("None"),
        ]);
        assert_eq!(render_type(&ty), "list[time.Epoch] | None");
        let tuple = TypeExpr::Tuple(vec![TypeExpr::name("int"), TypeExpr::name("float")]);
        assert_eq!(render_type(&tuple), "typing.Tuple[int, float]");
        assert_eq!(render_type(&TypeExpr::str_tuple()), "tuple[str, ...]");
    }

    #[test]
    fn parameter_markers() {
        let params = vec![
            param("self", None, ParamKind::PositionalOnly),
            param("epoch", Some("time.Epoch"), ParamKind::PositionalOrKeyword),
            param("tol", Some("float"), ParamKind::KeywordOnly),
        ];
        assert_eq!(render_params(&params), "self, /, epoch: time.Epoch, *, tol: float");

        let variadic = vec![
            param("self", None, ParamKind::PositionalOrKeyword),
            param("args", Some("typing.Any"), ParamKind::VarPositional),
            param("strict", Some("bool"), ParamKind::KeywordOnly),
            param("kwargs", Some("typing.Any"), ParamKind::VarKeyword),
        ];
        assert_eq!(
            render_params(&variadic),
            "self, *args: typing.Any, strict: bool, **kwargs: typing.Any"
        );
    }

    #[test]
    fn parameter_defaults() {
        let mut typed = param("tol", Some("typing.Optional[float]"), ParamKind::PositionalOrKeyword);
        typed.default = Some(Literal::Float(1e-6));
        let mut bare = param("cls", None, ParamKind::PositionalOrKeyword);
        bare.default = Some(Literal::None);
        assert_eq!(render_param(&typed), "tol: typing.Optional[float] = 1e-6");
        assert_eq!(render_param(&bare), "cls=None");
    }

    #[test]
    fn literals() {
        assert_eq!(render_literal(&Literal::Bool(true)), "True");
        assert_eq!(render_literal(&Literal::Float(2.0)), "2.0");
        assert_eq!(render_literal(&Literal::Float(f64::NEG_INFINITY)), "float(\"-inf\")");
        assert_eq!(render_literal(&Literal::Str("a \"b\"\n".into())), r#""a \"b\"\n""#);
        assert_eq!(
            render_literal(&Literal::StrTuple(vec!["x".into()])),
            r#"("x",)"#
        );
        assert_eq!(
            render_literal(&Literal::StrTuple(vec!["x".into(), "y".into()])),
            r#"("x", "y")"#
        );
        assert_eq!(render_literal(&Literal::StrTuple(Vec::new())), "()");
    }

    #[test]
    fn docstring_escaping() {
        assert_eq!(escape_docstring(r"C:\path"), r"C:\\path");
        assert_eq!(escape_docstring(r#"say """hi""""#), r#"say \"\"\"hi\"\"\""#);
        assert_eq!(escape_docstring(r#"ends with "quote""#), r#"ends with "quote\""#);
    }

    #[test]
    fn emit_document() {
        let document = StubDocument {
            body: vec![
                Statement::ImportFrom {
                    module: "__future__".into(),
                    names: vec!["annotations".into()],
                },
                Statement::Import {
                    module: "typing".into(),
                },
                Statement::Class(ClassDef {
                    name: "Frame".into(),
                    decorators: vec!["typing.final".into()],
                    body: vec![
                        Statement::Docstring("A reference frame.\n\nIdentified by IDs.".into()),
                        Statement::AnnAssign {
                            target: "ephemeris_id".into(),
                            annotation: TypeExpr::name("int"),
                            value: None,
                        },
                        function(
                            "__init__",
                            vec![
                                param("self", None, ParamKind::PositionalOrKeyword),
                                param("ephemeris_id", Some("int"), ParamKind::PositionalOrKeyword),
                            ],
                            Some("None"),
                        ),
                    ],
                }),
                Statement::Class(ClassDef {
                    name: "Empty".into(),
                    decorators: vec!["typing.final".into()],
                    body: vec![Statement::Ellipsis],
                }),
                Statement::AnnAssign {
                    target: "__author__".into(),
                    annotation: TypeExpr::name("str"),
                    value: Some(Expr::Literal(Literal::Str("Nyx".into()))),
                },
                Statement::AnnAssign {
                    target: "__version__".into(),
                    annotation: TypeExpr::name("str"),
                    value: Some(Expr::Literal(Literal::Str("0.9.0".into()))),
                },
            ],
        };
        let expected = r#"from __future__ import annotations
import typing

@typing.final
class Frame:
    """A reference frame.

    Identified by IDs."""
    ephemeris_id: int
    def __init__(self, ephemeris_id: int) -> None: ...

@typing.final
class Empty: ...

__author__: str = "Nyx"
__version__: str = "0.9.0"
"#;
        assert_eq!(StubEmitter::emit(&document), expected);
    }

    #[test]
    fn function_docstring_body() {
        let document = StubDocument {
            body: vec![Statement::Function(FunctionDef {
                name: "load".into(),
                decorators: vec!["staticmethod".into()],
                params: vec![param("path", Some("str"), ParamKind::PositionalOrKeyword)],
                returns: None,
                body: vec![Statement::Docstring("Load a file".into())],
            })],
        };
        assert_eq!(
            StubEmitter::emit(&document),
            "@staticmethod\ndef load(path: str):\n    \"\"\"Load a file\"\"\"\n"
        );
    }

    #[test]
    fn write_stub_to_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("astro.pyi");
        write_stub(&path, "import typing\n").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "import typing\n");
    }
}
