//! Reflection of inspectable modules
//!
//! A module is described by an [`Inspectable`] value: something that can
//! enumerate its members and report its documentation. The [`Registry`] loads these descriptions from
//! JSON dumps produced alongside the bindings.

mod model;
mod registry;
pub mod walker;

pub use model::{
    ClassInfo, DeclaredBinding, DescriptorInfo, Literal, MemberInfo, MemberValue, ModuleInfo,
    ParamKind, ParameterInfo, Receiver, RoutineInfo, Signature, ValueInfo,
};
pub use registry::{Registry, RegistryError};
pub use walker::{MemberCategory, Scope, WalkedMember};

/// Read-only reflection over a module or class
pub trait Inspectable {
    /// Documentation text, if any
    fn doc(&self) -> Option<&str>;

    /// Members in the runtime's natural enumeration order
    fn members(&self) -> &[MemberInfo];
}

impl Inspectable for ModuleInfo {
    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn members(&self) -> &[MemberInfo] {
        &self.members
    }
}

impl Inspectable for ClassInfo {
    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn members(&self) -> &[MemberInfo] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module() -> ModuleInfo {
        serde_json::from_str(
            r#"{
                "name": "anise.astro",
                "doc": "Astro",
                "members": [
                    { "name": "Frame", "kind": "class", "doc": "A frame",
                      "members": [
                        { "name": "at_epoch", "kind": "routine",
                          "signature": { "parameters": [{ "name": "self" }, { "name": "epoch" }] } }
                      ] },
                    { "name": "describe", "kind": "routine" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn module_members_and_docs() {
        let module = module();
        assert_eq!(Inspectable::doc(&module), Some("Astro"));
        assert_eq!(module.members().len(), 2);

        let MemberValue::Class(frame) = &module.members()[0].value else {
            panic!("expected class");
        };
        assert_eq!(frame.doc(), Some("A frame"));
        assert_eq!(frame.members()[0].name, "at_epoch");
    }
}
