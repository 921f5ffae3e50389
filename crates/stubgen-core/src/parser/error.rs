//! Parser error types for documented type strings

use crate::lexer::{Span, TokenKind};
use thiserror::Error;

/// A parser error with location information
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The kind of error
    pub kind: ParseErrorKind,
    /// Location of the offending fragment
    pub span: Span,
    /// The complete type string being parsed
    pub source_text: String,
    /// Optional hint for fixing the error
    pub hint: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span, source_text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            source_text: source_text.into(),
            hint: None,
        }
    }

    /// Add a hint to this error
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// The offending fragment of the type string
    #[must_use]
    pub fn fragment(&self) -> &str {
        self.source_text.get(self.span.as_range()).unwrap_or("")
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {} in '{}'", self.kind, self.span, self.source_text)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("unexpected token: found {found}, expected {expected}")]
    UnexpectedToken {
        found: TokenKind,
        expected: &'static str,
    },

    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(String),

    #[error("expected type")]
    ExpectedType,

    #[error("empty type")]
    EmptyType,

    #[error("empty bracket group")]
    EmptyBracket,

    #[error("unclosed bracket")]
    UnclosedBracket,

    #[error("invalid type path '{0}'")]
    InvalidPath(String),
}
