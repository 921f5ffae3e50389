//! Reflection walker
//!
//! Enumerates the visible members of a module or class in the inspectable's
//! own order, each tagged with a [`MemberCategory`] hint. The walk is
//! read-only and deterministic: the same input always yields the same
//! sequence.

use super::{Inspectable, MemberInfo, MemberValue};

/// Where a member is being enumerated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Module,
    Class,
}

/// Coarse kind of a reflected member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberCategory {
    Class,
    Routine,
    DataDescriptor,
    Value,
    Null,
}

impl MemberCategory {
    /// Category of a reflected value
    #[must_use]
    pub fn of(value: &MemberValue) -> Self {
        match value {
            MemberValue::Class(_) => MemberCategory::Class,
            MemberValue::Routine(_) => MemberCategory::Routine,
            MemberValue::DataDescriptor(_) => MemberCategory::DataDescriptor,
            MemberValue::Value(_) => MemberCategory::Value,
            MemberValue::Null => MemberCategory::Null,
        }
    }
}

/// A member yielded by the walker
#[derive(Debug, Clone, Copy)]
pub struct WalkedMember<'a> {
    pub name: &'a str,
    pub member: &'a MemberInfo,
    pub category: MemberCategory,
}

/// Returns true for `__dunder__` names
#[must_use]
pub fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

/// Returns true if a member with this name is enumerated in `scope`.
///
/// Module scope hides every underscore-prefixed name; metadata such as
/// `__version__` is read from the module attributes instead. Class scope
/// hides private names but lets protocol (`__dunder__`) members through to
/// the classifier.
#[must_use]
pub fn is_visible(name: &str, scope: Scope) -> bool {
    match scope {
        Scope::Module => !name.starts_with('_'),
        Scope::Class => !name.starts_with('_') || is_dunder(name),
    }
}

/// Enumerate the visible members of `target`
pub fn members<'a, T>(target: &'a T, scope: Scope) -> impl Iterator<Item = WalkedMember<'a>> + 'a
where
    T: Inspectable + ?Sized,
{
    target
        .members()
        .iter()
        .filter(move |member| is_visible(&member.name, scope))
        .map(|member| WalkedMember {
            name: &member.name,
            member,
            category: MemberCategory::of(&member.value),
        })
}
