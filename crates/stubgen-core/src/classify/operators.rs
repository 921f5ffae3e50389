//! Known-operator table
//!
//! Fixed parameter and return shapes for protocol members, plus the members
//! that never appear in a stub.

/// Shape of a protocol member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorShape {
    /// Never emitted
    NotApplicable,
    /// Fixed operand types and return type, as type paths
    Fixed {
        params: &'static [&'static str],
        returns: &'static str,
    },
    /// Arithmetic operator emitted without parameters or return type
    Binary,
}

const ANY: &str = crate::ast::ANY;

/// Protocol members with a known shape
const OPERATORS: &[(&str, OperatorShape)] = &[
    ("__annotations__", OperatorShape::NotApplicable),
    ("__bool__", fixed(&[], "bool")),
    ("__bytes__", fixed(&[], "bytes")),
    ("__class__", OperatorShape::NotApplicable),
    ("__contains__", fixed(&[ANY], "bool")),
    ("__del__", OperatorShape::NotApplicable),
    ("__delattr__", fixed(&["str"], "None")),
    ("__delitem__", fixed(&[ANY], "None")),
    ("__dict__", OperatorShape::NotApplicable),
    ("__dir__", OperatorShape::NotApplicable),
    ("__doc__", OperatorShape::NotApplicable),
    ("__eq__", fixed(&[ANY], "bool")),
    ("__format__", fixed(&["str"], "str")),
    ("__ge__", fixed(&[ANY], "bool")),
    ("__getattribute__", fixed(&["str"], ANY)),
    ("__getitem__", fixed(&[ANY], ANY)),
    ("__gt__", fixed(&[ANY], "bool")),
    ("__hash__", fixed(&[], "int")),
    ("__init__", fixed(&[], "None")),
    ("__init_subclass__", OperatorShape::NotApplicable),
    ("__iter__", fixed(&[], ANY)),
    ("__le__", fixed(&[ANY], "bool")),
    ("__len__", fixed(&[], "int")),
    ("__lt__", fixed(&[ANY], "bool")),
    ("__module__", OperatorShape::NotApplicable),
    ("__ne__", fixed(&[ANY], "bool")),
    ("__new__", OperatorShape::NotApplicable),
    ("__next__", fixed(&[], ANY)),
    ("__int__", fixed(&[], "None")),
    ("__reduce__", OperatorShape::NotApplicable),
    ("__reduce_ex__", OperatorShape::NotApplicable),
    ("__repr__", fixed(&[], "str")),
    ("__setattr__", fixed(&["str", ANY], "None")),
    ("__setitem__", fixed(&[ANY, ANY], "None")),
    ("__sizeof__", OperatorShape::NotApplicable),
    ("__str__", fixed(&[], "str")),
    ("__subclasshook__", OperatorShape::NotApplicable),
    ("__add__", OperatorShape::Binary),
    ("__sub__", OperatorShape::Binary),
    ("__mul__", OperatorShape::Binary),
    ("__div__", OperatorShape::Binary),
    ("__radd__", OperatorShape::Binary),
    ("__rsub__", OperatorShape::Binary),
    ("__rmul__", OperatorShape::Binary),
    ("__rdiv__", OperatorShape::Binary),
    ("__truediv__", fixed(&[ANY], ANY)),
    ("__rtruediv__", fixed(&[ANY], ANY)),
    ("__setstate__", fixed(&[ANY], "None")),
    ("__getnewargs__", fixed(&[], "typing.Tuple")),
];

/// Members every class inherits from the universal base object
pub const BASE_OBJECT_MEMBERS: &[&str] = &[
    "__class__",
    "__delattr__",
    "__dir__",
    "__doc__",
    "__eq__",
    "__format__",
    "__ge__",
    "__getattribute__",
    "__getstate__",
    "__gt__",
    "__hash__",
    "__init__",
    "__init_subclass__",
    "__le__",
    "__lt__",
    "__ne__",
    "__new__",
    "__reduce__",
    "__reduce_ex__",
    "__repr__",
    "__setattr__",
    "__sizeof__",
    "__str__",
    "__subclasshook__",
];

/// Owner name reported for members inherited from the base object
pub const BASE_OBJECT: &str = "object";

/// Instance initializer
pub const INITIALIZER: &str = "__init__";

/// Raw allocator
pub const ALLOCATOR: &str = "__new__";

/// Tuple-of-strings slot metadata
pub const MATCH_ARGS: &str = "__match_args__";

const fn fixed(params: &'static [&'static str], returns: &'static str) -> OperatorShape {
    OperatorShape::Fixed { params, returns }
}

/// Look up the shape of a protocol member
#[must_use]
pub fn shape(name: &str) -> Option<OperatorShape> {
    OPERATORS
        .iter()
        .find(|(operator, _)| *operator == name)
        .map(|(_, shape)| *shape)
}

/// Returns true for a lifecycle (constructor-equivalent) name
#[must_use]
pub fn is_lifecycle(name: &str) -> bool {
    name == INITIALIZER || name == ALLOCATOR
}

/// Returns true if `name` is a base-object member and `owner` is the base object
#[must_use]
pub fn is_inherited_from_base(name: &str, owner: Option<&str>) -> bool {
    owner == Some(BASE_OBJECT) && BASE_OBJECT_MEMBERS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        assert_eq!(
            shape("__eq__"),
            Some(OperatorShape::Fixed {
                params: &[ANY],
                returns: "bool"
            })
        );
        assert_eq!(shape("__add__"), Some(OperatorShape::Binary));
        assert_eq!(shape("__dict__"), Some(OperatorShape::NotApplicable));
        assert_eq!(shape("propagate"), None);
    }

    #[test]
    fn true_division_keeps_its_shape() {
        // Only the classic arithmetic names are special-cased
        assert!(matches!(shape("__truediv__"), Some(OperatorShape::Fixed { .. })));
        assert_eq!(shape("__rdiv__"), Some(OperatorShape::Binary));
    }

    #[test]
    fn table_has_no_duplicates() {
        let mut names: Vec<_> = OPERATORS.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        let total = names.len();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn inherited_members() {
        assert!(is_inherited_from_base("__repr__", Some("object")));
        assert!(!is_inherited_from_base("__repr__", Some("Frame")));
        assert!(!is_inherited_from_base("__repr__", None));
        assert!(!is_inherited_from_base("__len__", Some("object")));
    }
}
