//! Reflected data model
//!
//! These types mirror what a runtime reflection facility reports about a
//! module: its members, their kind, their documentation and, for routines,
//! their declared parameter lists. They deserialize from the registry JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A reflected module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Dotted module name (`anise.astro`)
    pub name: String,
    /// Module documentation
    #[serde(default)]
    pub doc: Option<String>,
    /// Module-level metadata values (`__author__`, `__version__`, ...)
    #[serde(default)]
    pub attributes: BTreeMap<String, Literal>,
    /// Members in enumeration order
    #[serde(default)]
    pub members: Vec<MemberInfo>,
}

/// A named member of a module or class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInfo {
    /// Member name
    pub name: String,
    /// Name of the type the member was inherited from, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// What the member is
    #[serde(flatten)]
    pub value: MemberValue,
}

/// The reflected value of a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberValue {
    /// A class
    Class(ClassInfo),
    /// A function, method or builtin callable
    Routine(RoutineInfo),
    /// A property-like attribute computed on access
    DataDescriptor(DescriptorInfo),
    /// A plain stored value
    Value(ValueInfo),
    /// A member whose value is `None`
    Null,
}

/// A reflected class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberInfo>,
}

/// A reflected callable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutineInfo {
    #[serde(default)]
    pub doc: Option<String>,
    /// Declared parameters, absent when the callable is not introspectable
    #[serde(default)]
    pub signature: Option<Signature>,
    /// Explicit `classmethod`/`staticmethod` wrapper
    #[serde(default)]
    pub decorator: Option<DeclaredBinding>,
    /// What the callable is bound to when looked up on its class
    #[serde(default)]
    pub bound_to: Option<Receiver>,
}

/// Explicit binding wrapper reported by reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredBinding {
    Classmethod,
    Staticmethod,
}

/// The object a callable is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    /// Bound to an instance
    Instance,
    /// Bound to the type itself
    Type,
}

/// A reflected data descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorInfo {
    #[serde(default)]
    pub doc: Option<String>,
}

/// A plain value with its runtime class name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueInfo {
    /// Runtime class name of the value (`int`, `Frame`, ...)
    pub type_name: String,
    /// The value itself
    pub value: Literal,
}

/// A declared parameter list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
}

impl Signature {
    /// Look up a parameter by name
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterInfo> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// The first declared parameter
    #[must_use]
    pub fn first(&self) -> Option<&ParameterInfo> {
        self.parameters.first()
    }

    /// Returns true if a receiver (`self` or `cls`) is declared
    #[must_use]
    pub fn has_receiver(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| p.name == "self" || p.name == "cls")
    }
}

/// A declared parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(default)]
    pub kind: ParamKind,
    /// Default value, if any
    #[serde(default)]
    pub default: Option<Literal>,
}

impl ParameterInfo {
    /// Create a positional-or-keyword parameter without a default
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::PositionalOrKeyword,
            default: None,
        }
    }
}

/// How an argument binds to a parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    PositionalOnly,
    #[default]
    PositionalOrKeyword,
    VarPositional,
    KeywordOnly,
    VarKeyword,
}

/// A literal value reported by reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StrTuple(Vec<String>),
}

impl Literal {
    /// Name of the literal's runtime type
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::None => "None",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "str",
            Literal::StrTuple(_) => "tuple",
        }
    }
}
