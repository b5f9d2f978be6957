//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, error recovery and coordination
//! - `declarations`: main class, classes, fields, methods and types
//! - `statements`: statements, including the one backtracking point
//! - `expressions`: expressions with one function per precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! # Error recovery
//!
//! Parsing stops at the first syntax error. Before the error is returned the
//! cursor is resynchronized (panic mode) to the next plausible statement or
//! declaration boundary; no partial tree is ever returned.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// Deepest combined nesting of statements and expressions the parser accepts
const MAX_NESTING_DEPTH: usize = 128;

/// What the parser was looking at when it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Lexeme(String),
    EndOfFile,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Lexeme(lexeme) => write!(f, "'{}'", lexeme),
            Found::EndOfFile => write!(f, "end of file"),
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at {location}: {message}, found {found}")]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
    pub found: Found,
}

impl ParseError {
    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

/// Parse a complete token stream into a [`Program`].
pub fn parse_program(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for MiniJava
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser over a token stream.
    ///
    /// The stream is expected to end with an end-of-input token; one is
    /// appended if it is missing.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens
                .last()
                .map(|t| t.location)
                .unwrap_or_else(|| SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }

        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Tokenize `source` and create a parser over the result.
    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::new(source).tokenize())
    }

    /// Parse the entire program: the main class, then zero or more classes.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        match self.parse_program_body() {
            Ok(program) => Ok(program),
            Err(err) => {
                self.synchronize();
                Err(err)
            }
        }
    }

    fn parse_program_body(&mut self) -> Result<Program, ParseError> {
        let main_class = self.parse_main_class()?;

        let mut classes = Vec::new();
        while self.check(TokenKind::Class) {
            classes.push(self.parse_class_declaration()?);
        }

        if !self.is_at_end() {
            return Err(self.error("Expected 'class' or end of file"));
        }

        Ok(Program {
            main_class,
            classes,
        })
    }

    /// Panic-mode recovery: skip to just after a `;`, or to a token that can
    /// open a new construct, or to end of input.
    pub(crate) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Public
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Return => return,
                _ => {}
            }

            self.advance();
        }
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token and return it. At end of input the cursor
    /// stays on the end-of-input token.
    pub(crate) fn advance(&mut self) -> &Token {
        let current = self.position;
        if !self.is_at_end() {
            self.position += 1;
        }
        &self.tokens[current]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn peek_ahead_is(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_ahead(n).is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Build an error positioned at the current token.
    pub(crate) fn error(&self, message: &str) -> ParseError {
        let token = self.peek();

        let message = match token.lex_error() {
            Some(lex_error) => format!("{}: {}", lex_error, message),
            None => message.to_string(),
        };

        let found = if token.kind == TokenKind::Eof {
            Found::EndOfFile
        } else {
            Found::Lexeme(token.lexeme.clone())
        };

        ParseError {
            message,
            location: token.location,
            found,
        }
    }

    /// Run `parse` one nesting level deeper, failing with `message` once the
    /// nesting limit is reached.
    pub(crate) fn nested<T>(
        &mut self,
        message: &str,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(message));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LParen, &format!("Expected '(' {ctx}"))
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RParen, &format!("Expected ')' {ctx}"))
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LBrace, &format!("Expected '{{' {ctx}"))
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::RBrace, &format!("Expected '}}' {ctx}"))
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Semicolon, &format!("Expected ';' {ctx}"))
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        if self.check(TokenKind::Identifier) {
            Ok(self.advance().lexeme.clone())
        } else {
            Err(self.error(&format!("Expected identifier {ctx}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_program() {
        let source = "class Hello { public static void main() { System.out.println(123); } }";
        let mut parser = Parser::from_source(source);
        let program = parser.parse_program().unwrap();

        assert_eq!(program.main_class.class_name, "Hello");
        assert_eq!(program.main_class.statements.len(), 1);
        assert!(program.classes.is_empty());
    }

    #[test]
    fn test_empty_token_stream_gets_eof() {
        let mut parser = Parser::new(Vec::new());
        let err = parser.parse_program().unwrap_err();

        assert_eq!(err.found, Found::EndOfFile);
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_missing_main_brace_reports_end_of_file() {
        let source = "class M { public static void main() { System.out.println(1);";
        let err = Parser::from_source(source).parse_program().unwrap_err();

        assert!(err.message.contains("'}'"), "message: {}", err.message);
        assert_eq!(err.found, Found::EndOfFile);
        assert!(err.to_string().ends_with("found end of file"));
    }

    #[test]
    fn test_error_reports_offending_lexeme() {
        let source = "class M { public static void main() { return 1 } }";
        let err = Parser::from_source(source).parse_program().unwrap_err();

        assert_eq!(err.message, "Expected ';' after return value");
        assert_eq!(err.found, Found::Lexeme("}".to_string()));
        assert_eq!(err.location, SourceLocation::new(1, 48));
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 48: Expected ';' after return value, found '}'"
        );
    }

    #[test]
    fn test_lexical_error_surfaces_in_parse_error() {
        let source = "class M { public static void main() { x = a & b; } }";
        let err = Parser::from_source(source).parse_program().unwrap_err();

        assert!(err.message.starts_with("expected '&' after '&'"));
        assert_eq!(err.found, Found::Lexeme("&".to_string()));
    }

    #[test]
    fn test_nesting_limit_stops_recursion() {
        let source = format!(
            "class M {{ public static void main() {{ x = {}true; }} }}",
            "!".repeat(200_000)
        );
        let err = Parser::from_source(&source).parse_program().unwrap_err();

        assert_eq!(err.message, "Expression nested too deeply");
        assert_eq!(err.found, Found::Lexeme("!".to_string()));

        let source = format!(
            "class M {{ public static void main() {{ {}{} }} }}",
            "{".repeat(50_000),
            "}".repeat(50_000)
        );
        let err = Parser::from_source(&source).parse_program().unwrap_err();
        assert_eq!(err.message, "Statement nested too deeply");
    }

    #[test]
    fn test_nesting_below_limit_parses() {
        let depth = 100;
        let source = format!(
            "class M {{ public static void main() {{ x = {}1{}; }} }}",
            "(".repeat(depth),
            ")".repeat(depth)
        );
        let program = Parser::from_source(&source).parse_program().unwrap();

        let Statement::Assign(assign) = &program.main_class.statements[0] else {
            panic!("Expected assignment");
        };
        assert_eq!(assign.value, Expression::IntegerLiteral(1));
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        let source = "class M { public static void main() { } } garbage";
        let err = Parser::from_source(source).parse_program().unwrap_err();

        assert_eq!(err.found, Found::Lexeme("garbage".to_string()));
    }

    #[test]
    fn test_synchronize_stops_after_semicolon() {
        // The error is at `)`; recovery skips to just past the next `;`.
        let source = "class M { public static void main() { x = ); y = 2; z = 3; } }";
        let mut parser = Parser::from_source(source);
        assert!(parser.parse_program().is_err());

        assert_eq!(parser.previous().kind, TokenKind::Semicolon);
        assert_eq!(parser.peek().lexeme, "y");
    }

    #[test]
    fn test_synchronize_stops_before_class() {
        let source = "class M { public static void main() { int } } class A { }";
        let mut parser = Parser::from_source(source);
        assert!(parser.parse_program().is_err());

        assert_eq!(parser.peek().kind, TokenKind::Class);
        assert_eq!(parser.peek_ahead(1).map(|t| t.lexeme.as_str()), Some("A"));
    }

    #[test]
    fn test_synchronize_at_end_of_input() {
        let mut parser = Parser::from_source("class");
        assert!(parser.parse_program().is_err());
        assert!(parser.is_at_end());
    }
}
