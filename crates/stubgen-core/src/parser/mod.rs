//! Parser for the documentation type mini-language
//!
//! Recursive descent over the grammar:
//!
//! ```text
//! Type     := Sequence ("," Sequence)*
//! Sequence := Or ("or" Or)*
//! Or       := NamePath ("[" Type "]")?
//! ```
//!
//! More than one comma group at the top level is a [`TypeExpr::Tuple`]; inside
//! brackets the groups are the arguments of a [`TypeExpr::Generic`]. Empty
//! comma groups (such as a trailing comma) are ignored.
//!
//! # Example
//!
//! ```
//! use stubgen_core::ast::TypeExpr;
//! use stubgen_core::mapping::TypeMappingTable;
//! use stubgen_core::parser::{TypeParser, TypeResolver};
//!
//! let table = TypeMappingTable::builtin();
//! let resolver = TypeResolver::new(&table, "anise.astro");
//! let parsed = TypeParser::parse("list[Epoch] or None", &resolver).unwrap();
//! assert_eq!(parsed.expr.to_string(), "list[time.Epoch] or None");
//! assert!(parsed.namespaces.contains("anise.time"));
//! ```

mod error;
mod resolve;

pub use error::{ParseError, ParseErrorKind};
pub use resolve::{root_package, Resolution, TypeResolver};

use std::collections::BTreeSet;

use crate::ast::TypeExpr;
use crate::lexer::{Lexer, Token, TokenKind};

/// Variadic marker allowed in place of a name (`tuple[float, ...]`)
const ELLIPSIS: &str = "...";

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// A parsed type with the namespaces its names were resolved into
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// The type expression
    pub expr: TypeExpr,
    /// Namespaces that must be imported to use `expr`
    pub namespaces: BTreeSet<String>,
}

/// The type-expression parser
pub struct TypeParser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    position: usize,
    resolver: Option<&'a TypeResolver<'a>>,
    namespaces: BTreeSet<String>,
}

impl<'a> TypeParser<'a> {
    fn new(source: &'a str, resolver: Option<&'a TypeResolver<'a>>) -> Self {
        Self {
            source,
            tokens: Lexer::tokenize(source),
            position: 0,
            resolver,
            namespaces: BTreeSet::new(),
        }
    }

    /// Parse a documented type string, resolving every name through `resolver`
    pub fn parse(source: &'a str, resolver: &'a TypeResolver<'a>) -> ParseResult<Parsed> {
        let mut parser = TypeParser::new(source, Some(resolver));
        let expr = parser.complete()?;
        Ok(Parsed {
            expr,
            namespaces: parser.namespaces,
        })
    }

    /// Parse a type string keeping every name exactly as written
    pub fn parse_raw(source: &'a str) -> ParseResult<TypeExpr> {
        TypeParser::new(source, None).complete()
    }

    // ==================== Token Management ====================

    fn current(&self) -> &Token {
        // The lexer always terminates the stream with EOF
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn error_at_current(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current().span, self.source)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        let kind = if token.kind == TokenKind::Other {
            ParseErrorKind::UnexpectedCharacter(token.lexeme.clone())
        } else {
            ParseErrorKind::UnexpectedToken {
                found: token.kind,
                expected,
            }
        };
        self.error_at_current(kind)
    }

    // ==================== Grammar ====================

    /// Parse a full type and require the input to be consumed
    fn complete(&mut self) -> ParseResult<TypeExpr> {
        let mut groups = self.groups()?;
        if !self.check(TokenKind::Eof) {
            return Err(self.unexpected("end of input"));
        }
        match groups.len() {
            0 => Err(self.error_at_current(ParseErrorKind::EmptyType)),
            1 => Ok(groups.remove(0)),
            _ => Ok(TypeExpr::Tuple(groups)),
        }
    }

    /// Parse comma-separated sequences up to a closing bracket or the end
    fn groups(&mut self) -> ParseResult<Vec<TypeExpr>> {
        let mut groups = Vec::new();
        loop {
            match self.current_kind() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::Eof | TokenKind::RBracket => break,
                _ => {
                    groups.push(self.sequence()?);
                    if !matches!(
                        self.current_kind(),
                        TokenKind::Comma | TokenKind::Eof | TokenKind::RBracket
                    ) {
                        return Err(self.unexpected("',' or 'or'"));
                    }
                }
            }
        }
        Ok(groups)
    }

    /// Parse alternatives separated by `or`
    fn sequence(&mut self) -> ParseResult<TypeExpr> {
        let mut alternatives = vec![self.alternative()?];
        while self.eat(TokenKind::Or).is_some() {
            alternatives.push(self.alternative()?);
        }
        if alternatives.len() == 1 {
            Ok(alternatives.remove(0))
        } else {
            Ok(TypeExpr::Union(alternatives))
        }
    }

    /// Parse a name with an optional bracketed argument list
    fn alternative(&mut self) -> ParseResult<TypeExpr> {
        let token = match self.current_kind() {
            TokenKind::Path => self.advance(),
            TokenKind::Other => return Err(self.unexpected("type name")),
            _ => return Err(self.error_at_current(ParseErrorKind::ExpectedType)),
        };
        if token.lexeme == ELLIPSIS {
            return Ok(TypeExpr::Name(token.lexeme));
        }
        if token.lexeme.split('.').any(str::is_empty) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPath(token.lexeme.clone()),
                token.span,
                self.source,
            ));
        }
        let base = self.resolve(&token.lexeme);

        let Some(open) = self.eat(TokenKind::LBracket) else {
            return Ok(TypeExpr::Name(base));
        };
        let args = self.groups()?;
        if self.eat(TokenKind::RBracket).is_none() {
            return Err(
                ParseError::new(ParseErrorKind::UnclosedBracket, open.span, self.source)
                    .with_hint("add a closing ']'"),
            );
        }
        if args.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyBracket,
                open.span,
                self.source,
            ));
        }
        Ok(TypeExpr::Generic { base, args })
    }

    fn resolve(&mut self, raw: &str) -> String {
        let Some(resolver) = self.resolver else {
            return raw.to_string();
        };
        let resolution = resolver.resolve(raw);
        if let Some(namespace) = resolution.namespace() {
            self.namespaces.insert(namespace.to_string());
        }
        resolution.reference().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::TypeMappingTable;

    fn name(path: &str) -> TypeExpr {
        TypeExpr::name(path)
    }

    fn raw(source: &str) -> TypeExpr {
        TypeParser::parse_raw(source).unwrap()
    }

    fn raw_err(source: &str) -> ParseErrorKind {
        TypeParser::parse_raw(source).unwrap_err().kind
    }

    #[test]
    fn parse_simple_name() {
        assert_eq!(raw("float"), name("float"));
        assert_eq!(raw("  numpy.ndarray "), name("numpy.ndarray"));
    }

    #[test]
    fn parse_generic_with_one_argument() {
        let expr = raw("list[int]");
        assert_eq!(expr, TypeExpr::generic("list", vec![name("int")]));
    }

    #[test]
    fn generic_round_trips_through_display() {
        let expr = raw("list[int]");
        let TypeExpr::Generic { args, .. } = &expr else {
            panic!("expected generic, got {expr:?}");
        };
        assert_eq!(args.len(), 1);
        assert_eq!(args[0], raw("int"));
        assert_eq!(raw(&expr.to_string()), expr);
    }

    #[test]
    fn parse_generic_with_several_arguments() {
        let expr = raw("dict[str, list[float]]");
        assert_eq!(
            expr,
            TypeExpr::generic(
                "dict",
                vec![name("str"), TypeExpr::generic("list", vec![name("float")])]
            )
        );
        assert_eq!(raw(&expr.to_string()), expr);
    }

    #[test]
    fn union_keeps_left_to_right_order() {
        let expr = raw("int or str or None");
        assert_eq!(
            expr,
            TypeExpr::Union(vec![name("int"), name("str"), name("None")])
        );
    }

    #[test]
    fn tuple_arity() {
        let expr = raw("int, int, int");
        assert_eq!(expr, TypeExpr::Tuple(vec![name("int"); 3]));
    }

    #[test]
    fn trailing_comma_adds_no_element() {
        assert_eq!(raw("int, float,"), TypeExpr::Tuple(vec![name("int"), name("float")]));
        assert_eq!(raw("int,"), name("int"));
        assert_eq!(raw("tuple[int,]"), TypeExpr::generic("tuple", vec![name("int")]));
    }

    #[test]
    fn union_inside_tuple_and_generic() {
        let expr = raw("list[Epoch or None], bool");
        assert_eq!(
            expr,
            TypeExpr::Tuple(vec![
                TypeExpr::generic(
                    "list",
                    vec![TypeExpr::Union(vec![name("Epoch"), name("None")])]
                ),
                name("bool"),
            ])
        );
        assert_eq!(raw(&expr.to_string()), expr);
    }

    #[test]
    fn nested_brackets_recurse() {
        let expr = raw("list[tuple[list[int], str]]");
        let inner = TypeExpr::generic(
            "tuple",
            vec![TypeExpr::generic("list", vec![name("int")]), name("str")],
        );
        assert_eq!(expr, TypeExpr::generic("list", vec![inner]));
    }

    #[test]
    fn unclosed_bracket_is_an_error() {
        let err = TypeParser::parse_raw("list[int").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedBracket);
        assert_eq!(err.fragment(), "[");
    }

    #[test]
    fn stray_closing_bracket_is_an_error() {
        assert!(matches!(
            raw_err("int]"),
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::RBracket,
                ..
            }
        ));
    }

    #[test]
    fn empty_inputs_are_errors() {
        assert_eq!(raw_err(""), ParseErrorKind::EmptyType);
        assert_eq!(raw_err(" , "), ParseErrorKind::EmptyType);
        assert_eq!(raw_err("list[]"), ParseErrorKind::EmptyBracket);
        assert_eq!(raw_err("int or"), ParseErrorKind::ExpectedType);
    }

    #[test]
    fn unknown_characters_are_errors() {
        assert_eq!(
            raw_err("int | str"),
            ParseErrorKind::UnexpectedCharacter("|".into())
        );
        assert_eq!(
            raw_err("Callable[(int), str]"),
            ParseErrorKind::UnexpectedCharacter("(".into())
        );
    }

    #[test]
    fn adjacent_names_are_an_error() {
        let err = TypeParser::parse_raw("array of float").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
        assert_eq!(err.fragment(), "of");
    }

    #[test]
    fn malformed_paths_are_errors() {
        assert_eq!(raw_err("anise..Frame"), ParseErrorKind::InvalidPath("anise..Frame".into()));
        assert_eq!(raw_err("Frame."), ParseErrorKind::InvalidPath("Frame.".into()));
    }

    #[test]
    fn ellipsis_is_a_variadic_argument() {
        assert_eq!(
            raw("tuple[float, ...]"),
            TypeExpr::generic("tuple", vec![name("float"), name("...")])
        );
        assert_eq!(raw_err("...."), ParseErrorKind::InvalidPath("....".into()));

        let table = TypeMappingTable::builtin();
        let resolver = TypeResolver::new(&table, "anise.astro");
        let parsed = TypeParser::parse("tuple[float, ...]", &resolver).unwrap();
        assert_eq!(parsed.expr.to_string(), "tuple[float, ...]");
        assert!(parsed.namespaces.is_empty());
    }

    #[test]
    fn resolution_records_namespaces() {
        let table = TypeMappingTable::builtin();
        let resolver = TypeResolver::new(&table, "anise.astro");
        let parsed = TypeParser::parse("dict[Frame, Epoch or np.array]", &resolver).unwrap();
        assert_eq!(
            parsed.expr,
            TypeExpr::generic(
                "dict",
                vec![
                    name("Frame"),
                    TypeExpr::Union(vec![name("time.Epoch"), name("numpy.ndarray")])
                ]
            )
        );
        let namespaces: Vec<_> = parsed.namespaces.iter().map(String::as_str).collect();
        assert_eq!(namespaces, vec!["anise.time", "numpy"]);
    }

    #[test]
    fn every_mapping_entry_parses_to_its_canonical_name() {
        let table = TypeMappingTable::builtin();
        for (informal, canonical) in table.iter() {
            let resolver = TypeResolver::new(&table, "stubs");
            let parsed = TypeParser::parse(informal, &resolver)
                .unwrap_or_else(|e| panic!("{informal} failed to parse: {e}"));
            // Outside of the mapped package every canonical path is kept whole
            assert_eq!(parsed.expr, name(canonical), "entry {informal}");
        }
    }
}
