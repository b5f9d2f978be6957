//! MiniJava source code parser
//!
//! This module transforms MiniJava source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split across [`declarations`],
//!   [`statements`] and [`expressions`]
//! - [`ast`]: AST node definitions
//! - [`visitor`]: double-dispatch traversal over the AST
//!
//! # Supported language
//!
//! - A main class holding `public static void main()`, followed by classes
//!   with single inheritance, fields and methods
//! - Types: `int`, `boolean`, `void`, class names, one-level arrays
//! - Statements: `assert`, local declarations, blocks, `if`/`else`, `while`,
//!   `System.out.println`, assignment, `return`, method calls
//! - Expressions: `&& || < > == + - * / % !`, array indexing and `.length`,
//!   field access, method calls, `new`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one function per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;
pub mod visitor;

mod declarations;
mod expressions;
mod statements;

pub use lexer::{lexical_errors, tokenize, Lexer, Token, TokenKind};
pub use parse::{parse_program, Found, ParseError, Parser};
pub use visitor::{Node, Visitor};
