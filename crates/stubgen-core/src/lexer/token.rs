//! Token types for documented type strings

use logos::Logos;

/// The kind of token produced by the lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    /// Union separator
    #[token("or")]
    Or,

    /// Dotted identifier run (letters, digits, underscore, dot)
    #[regex(r"[A-Za-z0-9_.]+")]
    Path,

    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,

    /// Any other single character, reserved for future grammar extensions.
    /// Not matched by logos - produced by the lexer's error recovery
    Other,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Human-readable description used in error messages
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Or => "'or'",
            TokenKind::Path => "type name",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Other => "unexpected character",
            TokenKind::Eof => "end of input",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}
