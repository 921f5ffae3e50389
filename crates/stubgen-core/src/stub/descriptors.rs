//! Descriptors of the stubbed module
//!
//! Descriptors are built once per run by the [`Describer`](super::Describer)
//! and are not modified afterwards.

use std::collections::BTreeSet;

use crate::ast::TypeExpr;
use crate::classify::MethodKind;
use crate::reflect::{Literal, ParamKind};

/// Root descriptor of a generator run
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDescriptor {
    /// Dotted module name
    pub name: String,
    pub classes: Vec<ClassDescriptor>,
    /// Free functions, with [`MethodKind::Function`]
    pub functions: Vec<MethodDescriptor>,
    /// Metadata constants such as `__version__`
    pub metadata: Vec<ConstantDescriptor>,
    /// Namespaces referenced by resolved types
    pub namespaces: BTreeSet<String>,
}

impl ModuleDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
            functions: Vec::new(),
            metadata: Vec::new(),
            namespaces: BTreeSet::new(),
        }
    }

    /// Look up a class by name
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|c| c.name == name)
    }
}

/// A class of the stubbed module
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassDescriptor {
    pub name: String,
    pub doc: Option<String>,
    pub attributes: Vec<AttributeDescriptor>,
    /// Constructors and ordinary methods
    pub methods: Vec<MethodDescriptor>,
    /// Protocol members, with [`MethodKind::Operator`]
    pub magic_methods: Vec<MethodDescriptor>,
    pub constants: Vec<ConstantDescriptor>,
}

impl ClassDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up a constructor or method by name
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .chain(&self.magic_methods)
            .find(|m| m.name == name)
    }
}

/// A callable
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: String,
    pub kind: MethodKind,
    pub params: Vec<ParameterDescriptor>,
    /// Declared return type, `None` when no return type is declared
    pub returns: Option<TypeExpr>,
    pub doc: Option<String>,
}

/// A callable's parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    /// `None` for the receiver
    pub annotation: Option<TypeExpr>,
    pub default: Option<Literal>,
    pub kind: ParamKind,
}

impl ParameterDescriptor {
    /// An unannotated receiver (`self` or `cls`)
    #[must_use]
    pub fn receiver(name: &str) -> Self {
        Self {
            name: name.to_string(),
            annotation: None,
            default: None,
            kind: ParamKind::PositionalOrKeyword,
        }
    }

    /// An annotated parameter without default
    #[must_use]
    pub fn typed(name: impl Into<String>, annotation: TypeExpr, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            annotation: Some(annotation),
            default: None,
            kind,
        }
    }
}

/// A property-like attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub annotation: TypeExpr,
    /// The `:return:` text of the attribute's documentation
    pub doc: Option<String>,
}

/// A class or module constant
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDescriptor {
    pub name: String,
    pub annotation: TypeExpr,
    /// Value to emit, `...` when absent
    pub value: Option<Literal>,
}

/// Descriptors identified by name
pub trait Named {
    fn name(&self) -> &str;
}

macro_rules! impl_named {
    ($($ty:ty),*) => {
        $(impl Named for $ty {
            fn name(&self) -> &str {
                &self.name
            }
        })*
    };
}

impl_named!(
    ClassDescriptor,
    MethodDescriptor,
    AttributeDescriptor,
    ConstantDescriptor
);

/// Append `item` unless an entry with the same name exists.
///
/// Returns false if the item was rejected.
pub fn push_unique<T: Named>(list: &mut Vec<T>, item: T) -> bool {
    if list.iter().any(|existing| existing.name() == item.name()) {
        return false;
    }
    list.push(item);
    true
}
