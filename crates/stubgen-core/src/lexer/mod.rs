//! Lexer for the documentation type mini-language
//!
//! A single left-to-right scan that classifies characters into:
//! - Dotted identifier runs (`anise.time.Epoch`, `int`, `numpy.ndarray`)
//! - The bracket delimiters `[` and `]`
//! - The comma delimiter
//! - The `or` keyword
//!
//! Whitespace is discarded. Any other character becomes a single-character
//! [`TokenKind::Other`] token that the parser rejects.

mod span;
mod token;

pub use span::Span;
pub use token::TokenKind;

use logos::Logos;

/// A token with its kind, span, and source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the type string
    pub span: Span,
    /// The source text of the token
    pub lexeme: String,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }
}

/// The type-string lexer
pub struct Lexer<'source> {
    source: &'source str,
    inner: logos::Lexer<'source, TokenKind>,
    finished: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given type string
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            finished: false,
        }
    }

    /// Tokenize the entire string. The last token is always [`TokenKind::Eof`].
    #[must_use]
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        match self.inner.next() {
            Some(result) => {
                // Unknown characters are kept as single-character tokens
                let kind = result.unwrap_or(TokenKind::Other);
                let span = Span::from_range(self.inner.span());
                Some(Token::new(kind, span, self.inner.slice()))
            }
            None => {
                self.finished = true;
                let end = self.source.len();
                Some(Token::new(TokenKind::Eof, Span::from_range(end..end), ""))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_simple_name() {
        let tokens = Lexer::tokenize("int");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Path);
        assert_eq!(tokens[0].lexeme, "int");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn lex_dotted_path_is_one_token() {
        let tokens = Lexer::tokenize("anise.time.Epoch");
        assert_eq!(tokens[0].kind, TokenKind::Path);
        assert_eq!(tokens[0].lexeme, "anise.time.Epoch");
    }

    #[test]
    fn lex_delimiters() {
        assert_eq!(
            lex_kinds("list[int, str]"),
            vec![
                TokenKind::Path,
                TokenKind::LBracket,
                TokenKind::Path,
                TokenKind::Comma,
                TokenKind::Path,
                TokenKind::RBracket,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lex_or_keyword() {
        assert_eq!(
            lex_kinds("int or None"),
            vec![TokenKind::Path, TokenKind::Or, TokenKind::Path, TokenKind::Eof]
        );
    }

    #[test]
    fn lex_identifier_starting_with_or() {
        // Longest match wins, so `order` is a name and not the keyword
        let tokens = Lexer::tokenize("order");
        assert_eq!(tokens[0].kind, TokenKind::Path);
        assert_eq!(tokens[0].lexeme, "order");
    }

    #[test]
    fn lex_unknown_character() {
        let tokens = Lexer::tokenize("int | str");
        assert_eq!(tokens[1].kind, TokenKind::Other);
        assert_eq!(tokens[1].lexeme, "|");
        assert_eq!(tokens[1].span, Span::new(4, 5));
    }

    #[test]
    fn lex_spans_are_correct() {
        let tokens = Lexer::tokenize("dict[str, int]");
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[1].span, Span::new(4, 5));
        assert_eq!(tokens[2].span, Span::new(5, 8));
        assert_eq!(tokens[4].span, Span::new(10, 13));
        assert_eq!(tokens.last().map(|t| t.span), Some(Span::new(14, 14)));
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex_kinds("   "), vec![TokenKind::Eof]);
    }
}
