//! Intermediate stub document
//!
//! A plain tree of statements in the target stub grammar. The
//! [`StubEmitter`](crate::emit::StubEmitter) renders it to text.

use crate::ast::TypeExpr;
use crate::reflect::{Literal, ParamKind};

/// A complete stub file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StubDocument {
    pub body: Vec<Statement>,
}

/// A statement of the stub
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `from <module> import <names>`
    ImportFrom { module: String, names: Vec<String> },
    /// `import <module>`
    Import { module: String },
    Class(ClassDef),
    Function(FunctionDef),
    /// `<target>: <annotation>` with an optional `= <value>`
    AnnAssign {
        target: String,
        annotation: TypeExpr,
        value: Option<Expr>,
    },
    Docstring(String),
    /// The `...` placeholder
    Ellipsis,
}

/// Right-hand side of an annotated assignment
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    /// Decorator paths without the `@`
    pub decorators: Vec<String>,
    /// Never empty
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub decorators: Vec<String>,
    pub params: Vec<Param>,
    pub returns: Option<TypeExpr>,
    /// Never empty
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub annotation: Option<TypeExpr>,
    pub default: Option<Literal>,
    pub kind: ParamKind,
}
