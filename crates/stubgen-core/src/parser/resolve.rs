//! Name resolution for documented type paths
//!
//! Resolution is checked in order:
//! 1. an exact match in the [`TypeMappingTable`] substitutes the canonical path;
//! 2. a path directly inside the module being stubbed becomes its local name;
//! 3. anything else is kept and the namespace it lives in is reported so the
//!    caller can emit an import for it.

use crate::mapping::TypeMappingTable;

/// How a type path is referenced from the generated stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Defined in the module being stubbed, referenced by its bare name
    Local(String),
    /// Referenced through an imported namespace
    Imported {
        /// Text of the reference in the stub (`time.Epoch`, `numpy.ndarray`)
        reference: String,
        /// Namespace that must be imported (`anise.time`, `numpy`)
        namespace: String,
    },
    /// Used as written (builtins such as `int` or `None`)
    Verbatim(String),
}

impl Resolution {
    /// The text used to reference the type
    #[must_use]
    pub fn reference(&self) -> &str {
        match self {
            Resolution::Local(name) | Resolution::Verbatim(name) => name,
            Resolution::Imported { reference, .. } => reference,
        }
    }

    /// The namespace to import, if any
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Resolution::Imported { namespace, .. } => Some(namespace),
            _ => None,
        }
    }
}

/// Resolves raw documented paths relative to the module being stubbed
#[derive(Debug, Clone)]
pub struct TypeResolver<'a> {
    table: &'a TypeMappingTable,
    module: String,
    root: String,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver for the given dotted module name
    #[must_use]
    pub fn new(table: &'a TypeMappingTable, module: &str) -> Self {
        let root = root_package(module).to_string();
        Self {
            table,
            module: module.to_string(),
            root,
        }
    }

    /// Resolve a raw dotted path
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Resolution {
        let path = self.table.get(raw).unwrap_or(raw);

        if let Some(rest) = strip_namespace(path, &self.module) {
            return match rest.split_once('.') {
                None => Resolution::Local(rest.to_string()),
                Some((head, _)) => Resolution::Imported {
                    reference: rest.to_string(),
                    namespace: format!("{}.{head}", self.module),
                },
            };
        }

        // Sibling modules of the same package are imported as `from <root> import <sub>`
        if self.root != self.module {
            if let Some(rest) = strip_namespace(path, &self.root) {
                let head = rest.split('.').next().unwrap_or(rest);
                return Resolution::Imported {
                    reference: rest.to_string(),
                    namespace: format!("{}.{head}", self.root),
                };
            }
        }

        match path.rsplit_once('.') {
            Some((namespace, _)) => Resolution::Imported {
                reference: path.to_string(),
                namespace: namespace.to_string(),
            },
            None => Resolution::Verbatim(path.to_string()),
        }
    }
}

/// The top-level package of a dotted module name
#[must_use]
pub fn root_package(module: &str) -> &str {
    module.split('.').next().unwrap_or(module)
}

fn strip_namespace<'p>(path: &'p str, namespace: &str) -> Option<&'p str> {
    path.strip_prefix(namespace)?
        .strip_prefix('.')
        .filter(|rest| !rest.is_empty())
}
