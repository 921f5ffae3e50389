//! Type expression nodes

/// Canonical path of the "unknown" sentinel type
pub const ANY: &str = "typing.Any";

/// A resolved type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A (possibly dotted) type reference: `int`, `time.Epoch`
    Name(String),

    /// A subscripted type: `list[int]`, `dict[str, float]`
    Generic {
        /// Subscripted type reference
        base: String,
        /// Bracketed arguments, in source order (never empty)
        args: Vec<TypeExpr>,
    },

    /// Alternatives joined with `or`
    Union(Vec<TypeExpr>),

    /// Comma-separated types
    Tuple(Vec<TypeExpr>),
}

impl TypeExpr {
    /// Create a name node
    #[must_use]
    pub fn name(path: impl Into<String>) -> Self {
        TypeExpr::Name(path.into())
    }

    /// Create a generic node
    #[must_use]
    pub fn generic(base: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Generic {
            base: base.into(),
            args,
        }
    }

    /// The `typing.Any` sentinel
    #[must_use]
    pub fn any() -> Self {
        TypeExpr::Name(ANY.to_string())
    }

    /// Wrap a type in `typing.Optional[...]`
    #[must_use]
    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::generic("typing.Optional", vec![inner])
    }

    /// The `tuple[str, ...]` type used for slot metadata
    #[must_use]
    pub fn str_tuple() -> Self {
        TypeExpr::generic("tuple", vec![TypeExpr::name("str"), TypeExpr::name("...")])
    }

    /// Returns true if this is the `typing.Any` sentinel
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, TypeExpr::Name(name) if name == ANY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_sentinel() {
        assert!(TypeExpr::any().is_any());
        assert!(!TypeExpr::name("int").is_any());
    }
}
