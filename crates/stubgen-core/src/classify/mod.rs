//! Member classifier
//!
//! Decides, once per reflected member, what the member becomes in the stub.
//! The decision is a closed [`MemberRole`] carried unchanged through the rest
//! of the pipeline.

pub mod operators;

pub use operators::OperatorShape;

use crate::reflect::{
    DeclaredBinding, MemberCategory, MemberInfo, MemberValue, Receiver, RoutineInfo,
};
use crate::reflect::walker::is_dunder;

/// Marker identifying error-like types
pub const ERROR_MARKER: &str = "Error";

/// How a callable binds its receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// `__init__` or `__new__`
    Constructor,
    /// Receives the class (`@classmethod`)
    ClassBound,
    /// Receives nothing (`@staticmethod`)
    Static,
    /// Receives the instance
    Instance,
    /// Protocol (`__dunder__`) member
    Operator,
    /// Module-level function
    Function,
}

/// The role of a class member in the stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberRole {
    Constructor,
    ClassBound,
    Static,
    Instance,
    Magic,
    Attribute,
    Constant,
}

impl MemberRole {
    /// Method kind for callable roles
    #[must_use]
    pub fn method_kind(self) -> Option<MethodKind> {
        match self {
            MemberRole::Constructor => Some(MethodKind::Constructor),
            MemberRole::ClassBound => Some(MethodKind::ClassBound),
            MemberRole::Static => Some(MethodKind::Static),
            MemberRole::Instance => Some(MethodKind::Instance),
            MemberRole::Magic => Some(MethodKind::Operator),
            MemberRole::Attribute | MemberRole::Constant => None,
        }
    }
}

/// Outcome of classifying a class member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Emitted with the given role. `fallback` is set when the binding could
    /// not be inspected and defaulted to an instance method.
    Emit { role: MemberRole, fallback: bool },
    /// Deliberately not emitted
    Discarded,
    /// Not classifiable, dropped with a warning
    Unsupported,
}

impl Classification {
    const fn emit(role: MemberRole) -> Self {
        Classification::Emit {
            role,
            fallback: false,
        }
    }
}

/// Outcome of classifying a module member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleRole {
    Class,
    Function,
    Unsupported,
}

/// Returns true if the named type is error-like
#[must_use]
pub fn is_error_type(name: &str) -> bool {
    name.contains(ERROR_MARKER)
}

/// Classify a module-level member
#[must_use]
pub fn classify_module_member(category: MemberCategory) -> ModuleRole {
    match category {
        MemberCategory::Class => ModuleRole::Class,
        MemberCategory::Routine => ModuleRole::Function,
        MemberCategory::DataDescriptor | MemberCategory::Value | MemberCategory::Null => {
            ModuleRole::Unsupported
        }
    }
}

/// Classify a member of the class named `class_name`
#[must_use]
pub fn classify_class_member(class_name: &str, member: &MemberInfo) -> Classification {
    let name = member.name.as_str();

    if operators::is_lifecycle(name) {
        return if is_error_type(class_name) {
            Classification::Discarded
        } else {
            Classification::emit(MemberRole::Constructor)
        };
    }

    if operators::is_inherited_from_base(name, member.owner.as_deref())
        || operators::shape(name) == Some(OperatorShape::NotApplicable)
    {
        return Classification::Discarded;
    }

    match &member.value {
        MemberValue::DataDescriptor(_) => Classification::emit(MemberRole::Attribute),
        MemberValue::Routine(_) if is_dunder(name) => Classification::emit(MemberRole::Magic),
        MemberValue::Routine(routine) => {
            let (role, fallback) = binding(routine);
            Classification::Emit { role, fallback }
        }
        _ if name == operators::MATCH_ARGS => Classification::emit(MemberRole::Constant),
        MemberValue::Value(_) | MemberValue::Class(_) if !name.starts_with('_') => {
            Classification::emit(MemberRole::Constant)
        }
        _ => Classification::Unsupported,
    }
}

/// Decide the receiver binding of an ordinary method.
///
/// Returns the role and whether it is a fallback.
#[must_use]
pub fn binding(routine: &RoutineInfo) -> (MemberRole, bool) {
    match routine.decorator {
        Some(DeclaredBinding::Classmethod) => return (MemberRole::ClassBound, false),
        Some(DeclaredBinding::Staticmethod) => return (MemberRole::Static, false),
        None => {}
    }

    let Some(signature) = &routine.signature else {
        return (MemberRole::Instance, true);
    };

    if signature.first().is_some_and(|p| p.name == "cls") {
        (MemberRole::ClassBound, false)
    } else if routine.bound_to == Some(Receiver::Type) && signature.parameter("self").is_none() {
        (MemberRole::Static, false)
    } else {
        (MemberRole::Instance, false)
    }
}
