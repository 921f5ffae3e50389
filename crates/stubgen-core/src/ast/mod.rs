//! Type expression tree produced by the documentation type parser

mod pretty;
mod types;

pub use types::{TypeExpr, ANY};
