//! Builders for reflected members used across unit tests

use crate::reflect::{
    ClassInfo, DescriptorInfo, Literal, MemberInfo, MemberValue, ModuleInfo, ParameterInfo,
    RoutineInfo, Signature, ValueInfo,
};

fn member(name: &str, value: MemberValue) -> MemberInfo {
    MemberInfo {
        name: name.to_string(),
        owner: None,
        value,
    }
}

fn doc(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

pub fn module(name: &str, members: Vec<MemberInfo>) -> ModuleInfo {
    ModuleInfo {
        name: name.to_string(),
        doc: None,
        attributes: Default::default(),
        members,
    }
}

pub fn class(name: &str, doc: Option<&str>, members: Vec<MemberInfo>) -> MemberInfo {
    member(
        name,
        MemberValue::Class(ClassInfo {
            doc: doc.map(ToString::to_string),
            members,
        }),
    )
}

/// A routine with a declared signature of positional-or-keyword parameters
pub fn routine(name: &str, text: &str, params: &[&str]) -> MemberInfo {
    member(
        name,
        MemberValue::Routine(RoutineInfo {
            doc: doc(text),
            signature: Some(Signature {
                parameters: params.iter().map(|p| ParameterInfo::new(*p)).collect(),
            }),
            ..RoutineInfo::default()
        }),
    )
}

pub fn routine_without_signature(name: &str, text: &str) -> MemberInfo {
    member(
        name,
        MemberValue::Routine(RoutineInfo {
            doc: doc(text),
            ..RoutineInfo::default()
        }),
    )
}

pub fn data_descriptor(name: &str, text: &str) -> MemberInfo {
    member(
        name,
        MemberValue::DataDescriptor(DescriptorInfo { doc: doc(text) }),
    )
}

pub fn value(name: &str, type_name: &str, value: Literal) -> MemberInfo {
    member(
        name,
        MemberValue::Value(ValueInfo {
            type_name: type_name.to_string(),
            value,
        }),
    )
}
