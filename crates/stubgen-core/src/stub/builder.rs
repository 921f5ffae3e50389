//! Stub document builder
//!
//! Turns a [`ModuleDescriptor`] into a [`StubDocument`]. The output depends
//! only on the descriptor.

use std::collections::BTreeSet;

use super::descriptors::{
    AttributeDescriptor, ClassDescriptor, ConstantDescriptor, MethodDescriptor, ModuleDescriptor,
};
use super::ir::{ClassDef, Expr, FunctionDef, Param, Statement, StubDocument};
use crate::classify::MethodKind;
use crate::parser::root_package;

/// Decorator marking classes closed for extension
pub const FINAL_DECORATOR: &str = "typing.final";

/// Builds stub documents
pub struct StubBuilder;

impl StubBuilder {
    /// Build the document for a module
    #[must_use]
    pub fn build(module: &ModuleDescriptor) -> StubDocument {
        let mut body = Self::imports(module);
        body.extend(module.classes.iter().map(Self::class));
        body.extend(module.functions.iter().map(Self::function));
        body.extend(module.metadata.iter().map(Self::constant));
        StubDocument { body }
    }

    /// Import statements, deduplicated and sorted
    fn imports(module: &ModuleDescriptor) -> Vec<Statement> {
        let mut imports = vec![Statement::ImportFrom {
            module: "__future__".to_string(),
            names: vec!["annotations".to_string()],
        }];

        let mut namespaces: BTreeSet<&str> = module.namespaces.iter().map(String::as_str).collect();
        namespaces.insert("typing");

        let root = root_package(&module.name);
        for namespace in namespaces {
            if namespace == module.name {
                continue;
            }
            let sibling = namespace
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('.'));
            match namespace.rsplit_once('.') {
                Some((parent, last)) if sibling => imports.push(Statement::ImportFrom {
                    module: parent.to_string(),
                    names: vec![last.to_string()],
                }),
                _ => imports.push(Statement::Import {
                    module: namespace.to_string(),
                }),
            }
        }
        imports
    }

    fn class(class: &ClassDescriptor) -> Statement {
        let mut body = Vec::new();
        if let Some(doc) = &class.doc {
            body.push(Statement::Docstring(doc.clone()));
        }
        for attribute in &class.attributes {
            body.extend(Self::attribute(attribute));
        }
        body.extend(class.methods.iter().map(Self::function));
        body.extend(class.magic_methods.iter().map(Self::function));
        body.extend(class.constants.iter().map(Self::constant));
        if body.is_empty() {
            body.push(Statement::Ellipsis);
        }

        Statement::Class(ClassDef {
            name: class.name.clone(),
            decorators: vec![FINAL_DECORATOR.to_string()],
            body,
        })
    }

    fn attribute(attribute: &AttributeDescriptor) -> Vec<Statement> {
        let mut statements = vec![Statement::AnnAssign {
            target: attribute.name.clone(),
            annotation: attribute.annotation.clone(),
            value: None,
        }];
        if let Some(doc) = &attribute.doc {
            statements.push(Statement::Docstring(doc.clone()));
        }
        statements
    }

    fn function(method: &MethodDescriptor) -> Statement {
        let decorators = match method.kind {
            MethodKind::ClassBound => vec!["classmethod".to_string()],
            MethodKind::Static => vec!["staticmethod".to_string()],
            _ => Vec::new(),
        };
        let params = method
            .params
            .iter()
            .map(|p| Param {
                name: p.name.clone(),
                annotation: p.annotation.clone(),
                default: p.default.clone(),
                kind: p.kind,
            })
            .collect();
        let body = match &method.doc {
            Some(doc) => vec![Statement::Docstring(doc.clone())],
            None => vec![Statement::Ellipsis],
        };

        Statement::Function(FunctionDef {
            name: method.name.clone(),
            decorators,
            params,
            returns: method.returns.clone(),
            body,
        })
    }

    fn constant(constant: &ConstantDescriptor) -> Statement {
        Statement::AnnAssign {
            target: constant.name.clone(),
            annotation: constant.annotation.clone(),
            value: Some(match &constant.value {
                Some(literal) => Expr::Literal(literal.clone()),
                None => Expr::Ellipsis,
            }),
        }
    }
}
