//! Pretty printing for type expressions
//!
//! `Display` writes the documentation mini-language form, so a printed
//! expression parses back to the same tree.

use std::fmt::{self, Display, Formatter};

use super::TypeExpr;

fn write_separated<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Name(path) => f.write_str(path),
            TypeExpr::Generic { base, args } => {
                write!(f, "{base}[")?;
                write_separated(f, args, ", ")?;
                f.write_str("]")
            }
            TypeExpr::Union(items) => write_separated(f, items, " or "),
            TypeExpr::Tuple(items) => write_separated(f, items, ", "),
        }
    }
}
