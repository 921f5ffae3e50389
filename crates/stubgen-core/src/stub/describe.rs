//! Descriptor construction
//!
//! Walks a reflected module, classifies each member and resolves the types
//! documented on it into a [`ModuleDescriptor`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::descriptors::{
    push_unique, AttributeDescriptor, ClassDescriptor, ConstantDescriptor, MethodDescriptor,
    ModuleDescriptor, ParameterDescriptor,
};
use crate::ast::TypeExpr;
use crate::classify::{
    self, operators, Classification, MemberRole, MethodKind, ModuleRole, OperatorShape,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::doc::DocComment;
use crate::error::{StubError, StubResult};
use crate::mapping::TypeMappingTable;
use crate::parser::{TypeParser, TypeResolver};
use crate::reflect::walker::{self, Scope};
use crate::reflect::{
    ClassInfo, DescriptorInfo, Inspectable, MemberInfo, MemberValue, ModuleInfo, ParamKind,
    ParameterInfo, RoutineInfo,
};

const RTYPE_TAG: &str = ":rtype:";
const RETURN_TAG: &str = ":return:";

/// Builds the descriptors of one module
pub struct Describer<'a> {
    resolver: TypeResolver<'a>,
    metadata: &'a [String],
    namespaces: BTreeSet<String>,
    diagnostics: Diagnostics,
}

impl<'a> Describer<'a> {
    /// Create a describer for `module` resolving names through `table`.
    /// `metadata` lists the module attributes emitted as constants.
    #[must_use]
    pub fn new(table: &'a TypeMappingTable, module: &str, metadata: &'a [String]) -> Self {
        Self {
            resolver: TypeResolver::new(table, module),
            metadata,
            namespaces: BTreeSet::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Describe a reflected module.
    ///
    /// # Errors
    ///
    /// Returns an error if a documented type cannot be parsed or an
    /// annotation appears more than once on a member.
    pub fn describe(mut self, module: &ModuleInfo) -> StubResult<(ModuleDescriptor, Diagnostics)> {
        let mut descriptor = ModuleDescriptor::new(&module.name);

        for walked in walker::members(module, Scope::Module) {
            let path = format!("{}.{}", module.name, walked.name);
            match (classify::classify_module_member(walked.category), &walked.member.value) {
                (ModuleRole::Class, MemberValue::Class(class)) => {
                    let class = self.class(&path, walked.name, class)?;
                    if !push_unique(&mut descriptor.classes, class) {
                        self.duplicate(&path);
                    }
                }
                (ModuleRole::Function, MemberValue::Routine(routine)) => {
                    let function =
                        self.routine(&path, walked.name, MethodKind::Function, routine, None)?;
                    if !push_unique(&mut descriptor.functions, function) {
                        self.duplicate(&path);
                    }
                }
                _ => self.diagnostics.warn(
                    DiagnosticKind::UnsupportedMember,
                    &path,
                    "unsupported root member is neither a class nor a callable",
                ),
            }
        }

        descriptor.metadata = self
            .metadata
            .iter()
            .filter_map(|name| {
                module.attributes.get(name).map(|value| ConstantDescriptor {
                    name: name.clone(),
                    annotation: TypeExpr::name(value.type_name()),
                    value: Some(value.clone()),
                })
            })
            .collect();
        descriptor.namespaces = self.namespaces;

        Ok((descriptor, self.diagnostics))
    }

    fn class(&mut self, path: &str, name: &str, info: &ClassInfo) -> StubResult<ClassDescriptor> {
        let mut class = ClassDescriptor::new(name);
        class.doc = info.doc().and_then(|doc| DocComment::parse(doc).text);

        for walked in walker::members(info, Scope::Class) {
            let member = walked.member;
            let member_path = format!("{path}.{}", walked.name);

            let (role, fallback) = match classify::classify_class_member(name, member) {
                Classification::Emit { role, fallback } => (role, fallback),
                Classification::Discarded => continue,
                Classification::Unsupported => {
                    self.diagnostics.warn(
                        DiagnosticKind::UnsupportedMember,
                        &member_path,
                        "member is not a class, callable, descriptor or value",
                    );
                    continue;
                }
            };
            if fallback {
                self.diagnostics.warn(
                    DiagnosticKind::ClassificationFallback,
                    &member_path,
                    "signature is not introspectable, assuming an instance method",
                );
            }

            let accepted = match role {
                MemberRole::Attribute => {
                    let attribute = self.attribute(&member_path, name, member)?;
                    push_unique(&mut class.attributes, attribute)
                }
                MemberRole::Constant => {
                    let constant = self.constant(&member_path, member)?;
                    push_unique(&mut class.constants, constant)
                }
                MemberRole::Magic => {
                    let method = self.method(&member_path, name, MethodKind::Operator, member)?;
                    push_unique(&mut class.magic_methods, method)
                }
                MemberRole::Constructor
                | MemberRole::ClassBound
                | MemberRole::Static
                | MemberRole::Instance => {
                    let kind = role.method_kind().unwrap_or(MethodKind::Instance);
                    let method = self.method(&member_path, name, kind, member)?;
                    push_unique(&mut class.methods, method)
                }
            };
            if !accepted {
                self.duplicate(&member_path);
            }
        }

        Ok(class)
    }

    fn method(
        &mut self,
        path: &str,
        owner: &str,
        kind: MethodKind,
        member: &MemberInfo,
    ) -> StubResult<MethodDescriptor> {
        let opaque = RoutineInfo::default();
        let routine = match &member.value {
            MemberValue::Routine(routine) => routine,
            _ => &opaque,
        };
        self.routine(path, &member.name, kind, routine, Some(owner))
    }

    fn routine(
        &mut self,
        path: &str,
        name: &str,
        kind: MethodKind,
        routine: &RoutineInfo,
        owner: Option<&str>,
    ) -> StubResult<MethodDescriptor> {
        debug!(path, ?kind, "documenting");
        let doc = DocComment::parse(routine.doc.as_deref().unwrap_or_default());
        if doc.returns.len() > 1 {
            return Err(ambiguous(path, RETURN_TAG));
        }

        // Error-like types are not constructed through the stub
        let (params, returns) = if owner.is_some_and(classify::is_error_type) {
            (Vec::new(), None)
        } else {
            let shape = operators::shape(name);
            let params = self.parameters(path, name, kind, routine, &doc, shape)?;
            let returns = self.returns(path, name, kind, owner, &doc, shape)?;
            (params, returns)
        };

        Ok(MethodDescriptor {
            name: name.to_string(),
            kind,
            params,
            returns,
            doc: doc.text,
        })
    }

    fn parameters(
        &mut self,
        path: &str,
        name: &str,
        kind: MethodKind,
        routine: &RoutineInfo,
        doc: &DocComment,
        shape: Option<OperatorShape>,
    ) -> StubResult<Vec<ParameterDescriptor>> {
        // Arithmetic operators declare no parameters, not even the receiver
        if shape == Some(OperatorShape::Binary) {
            return Ok(Vec::new());
        }

        let receiver = implicit_receiver(name, kind);
        let Some(signature) = &routine.signature else {
            let mut params: Vec<ParameterDescriptor> =
                receiver.map(ParameterDescriptor::receiver).into_iter().collect();
            if let Some(OperatorShape::Fixed { params: types, .. }) = shape {
                params.extend(types.iter().enumerate().map(|(i, ty)| {
                    ParameterDescriptor::typed(
                        format!("arg{i}"),
                        TypeExpr::name(*ty),
                        ParamKind::PositionalOrKeyword,
                    )
                }));
            } else {
                params.push(ParameterDescriptor::typed(
                    "args",
                    TypeExpr::any(),
                    ParamKind::VarPositional,
                ));
                params.push(ParameterDescriptor::typed(
                    "kwargs",
                    TypeExpr::any(),
                    ParamKind::VarKeyword,
                ));
            }
            return Ok(params);
        };

        let mut declared: Vec<ParameterInfo> = signature.parameters.clone();
        if let Some(receiver) = receiver {
            let missing = match kind {
                MethodKind::Constructor => signature.parameter(receiver).is_none(),
                _ => !signature.has_receiver(),
            };
            if missing {
                declared.insert(0, ParameterInfo::new(receiver));
            }
        }

        let mut types: BTreeMap<&str, TypeExpr> = BTreeMap::new();
        let mut optional: BTreeSet<&str> = BTreeSet::new();

        if let Some(OperatorShape::Fixed { params: shape_types, .. }) = shape {
            let operands = declared.iter().filter(|p| !is_receiver_name(&p.name));
            for (param, ty) in operands.zip(shape_types.iter()) {
                types.insert(&param.name, TypeExpr::name(*ty));
            }
        }

        for documented in &doc.params {
            let Some(param) = declared.iter().find(|p| p.name == documented.name) else {
                self.diagnostics.warn(
                    DiagnosticKind::UnknownDocumentedParameter,
                    path,
                    format!(
                        "parameter `{}` is documented but not in the signature",
                        documented.name
                    ),
                );
                continue;
            };
            let ty = self.parse_type(path, &documented.type_str)?;
            types.insert(&param.name, ty);
            if documented.optional {
                optional.insert(&param.name);
            }
        }

        let mut params = Vec::with_capacity(declared.len());
        for param in &declared {
            let annotation = if is_receiver_name(&param.name) {
                None
            } else if let Some(ty) = types.remove(param.name.as_str()) {
                if optional.contains(param.name.as_str()) || param.default.is_some() {
                    Some(TypeExpr::optional(ty))
                } else {
                    Some(ty)
                }
            } else {
                self.diagnostics.warn(
                    DiagnosticKind::UnresolvedParameter,
                    path,
                    format!("parameter `{}` has no type documentation", param.name),
                );
                Some(TypeExpr::any())
            };
            params.push(ParameterDescriptor {
                name: param.name.clone(),
                annotation,
                default: param.default.clone(),
                kind: param.kind,
            });
        }
        Ok(params)
    }

    fn returns(
        &mut self,
        path: &str,
        name: &str,
        kind: MethodKind,
        owner: Option<&str>,
        doc: &DocComment,
        shape: Option<OperatorShape>,
    ) -> StubResult<Option<TypeExpr>> {
        if shape == Some(OperatorShape::Binary) {
            return Ok(None);
        }
        if kind == MethodKind::Constructor && name == operators::ALLOCATOR {
            // The allocator always produces the owning type
            return Ok(Some(owner.map_or_else(TypeExpr::any, TypeExpr::name)));
        }
        match doc.rtypes.as_slice() {
            [] => Ok(Some(match shape {
                Some(OperatorShape::Fixed { returns, .. }) => TypeExpr::name(returns),
                _ => TypeExpr::any(),
            })),
            [rtype] => self.parse_type(path, rtype).map(Some),
            _ => Err(ambiguous(path, RTYPE_TAG)),
        }
    }

    fn attribute(
        &mut self,
        path: &str,
        owner: &str,
        member: &MemberInfo,
    ) -> StubResult<AttributeDescriptor> {
        let raw = match &member.value {
            MemberValue::DataDescriptor(DescriptorInfo { doc }) => doc.as_deref(),
            _ => None,
        };
        let doc = DocComment::parse(raw.unwrap_or_default());

        let annotation = if classify::is_error_type(owner) {
            TypeExpr::any()
        } else {
            match doc.rtypes.as_slice() {
                [] => TypeExpr::any(),
                [rtype] => self.parse_type(path, rtype)?,
                _ => return Err(ambiguous(path, RTYPE_TAG)),
            }
        };

        let text = match doc.returns.as_slice() {
            [] => None,
            [text] if text.is_empty() => None,
            [text] => Some(text.clone()),
            _ => return Err(ambiguous(path, RETURN_TAG)),
        };

        Ok(AttributeDescriptor {
            name: member.name.clone(),
            annotation,
            doc: text,
        })
    }

    fn constant(&mut self, path: &str, member: &MemberInfo) -> StubResult<ConstantDescriptor> {
        let (annotation, value) = if member.name == operators::MATCH_ARGS {
            let value = match &member.value {
                MemberValue::Value(info) => Some(info.value.clone()),
                _ => None,
            };
            (TypeExpr::str_tuple(), value)
        } else {
            let type_name = match &member.value {
                MemberValue::Value(info) => info.type_name.as_str(),
                _ => "type",
            };
            (self.parse_type(path, type_name)?, None)
        };
        Ok(ConstantDescriptor {
            name: member.name.clone(),
            annotation,
            value,
        })
    }

    fn parse_type(&mut self, path: &str, source: &str) -> StubResult<TypeExpr> {
        let parsed = TypeParser::parse(source, &self.resolver).map_err(|source| StubError::Parse {
            path: path.to_string(),
            source,
        })?;
        self.namespaces.extend(parsed.namespaces);
        Ok(parsed.expr)
    }

    fn duplicate(&mut self, path: &str) {
        self.diagnostics.warn(
            DiagnosticKind::DuplicateMember,
            path,
            "member name already emitted, keeping the first",
        );
    }
}

/// The receiver a method of `kind` takes, if any
#[must_use]
pub fn implicit_receiver(name: &str, kind: MethodKind) -> Option<&'static str> {
    match kind {
        MethodKind::Function | MethodKind::Static => None,
        MethodKind::ClassBound => Some("cls"),
        MethodKind::Constructor if name == operators::ALLOCATOR => Some("cls"),
        MethodKind::Constructor | MethodKind::Instance | MethodKind::Operator => Some("self"),
    }
}

fn is_receiver_name(name: &str) -> bool {
    name == "self" || name == "cls"
}

fn ambiguous(path: &str, tag: &'static str) -> StubError {
    StubError::AmbiguousAnnotation {
        path: path.to_string(),
        tag,
    }
}
