//! Stubgen Core - typed stub generation for reflected modules
//!
//! This crate provides the core functionality:
//! - Reflect: the reflected module model and its JSON registry
//! - Lexer/Parser: the documentation type mini-language
//! - Classify: member classification over runtime signatures
//! - Stub: descriptor construction and the stub document
//! - Emit: rendering of the document as `.pyi` text

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reflection model - reflected modules, classes and routines
pub mod reflect;

/// Lexer module - tokenization of documented types
pub mod lexer;

/// Type expressions - parsed representation of documented types
pub mod ast;

/// Parser module - converts documented types into type expressions
pub mod parser;

/// Type-mapping table from informal names to canonical paths
pub mod mapping;

/// Documentation comment field extraction
pub mod doc;

/// Member classification and the known-operator table
pub mod classify;

/// Descriptors and the stub document builder
pub mod stub;

/// Stub rendering and the external formatter
pub mod emit;

/// Non-fatal diagnostics
pub mod diagnostics;

/// Fatal errors
pub mod error;

/// Configuration file loading
pub mod config;

/// Generator facade
pub mod generate;

/// Test utilities - builders for reflected members
#[cfg(test)]
pub(crate) mod testutil;

/// Convenience re-export of the generator
pub use generate::{Generated, Generator};

/// Convenience re-export of error types
pub use error::{StubError, StubResult};

/// Convenience re-export of the configuration
pub use config::StubConfig;

/// Convenience re-export of the registry
pub use reflect::{ModuleInfo, Registry};

/// Convenience re-export of the type parser
pub use parser::TypeParser;

/// Convenience re-export of the mapping table
pub use mapping::TypeMappingTable;

/// Convenience re-export of diagnostics
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};

/// Convenience re-export of the emitter
pub use emit::{write_stub, ExternalFormatter, StubEmitter};
