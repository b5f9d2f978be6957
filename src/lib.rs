//! # Introduction
//!
//! A front end for MiniJava, a small teaching subset of Java. Source text is
//! tokenized, parsed by a hand-written recursive descent parser, and turned
//! into an owned syntax tree that can be traversed with a [`parser::Visitor`].
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Visitor (printer, viewer)
//! ```
//!
//! 1. [`parser`]: tokenizer, parser, AST definitions and the visitor traits.
//!    Lexical problems are kept in the token stream as error tokens; the
//!    parser stops at the first syntax error.
//! 2. [`printer`]: an indented textual rendering of the tree, itself a visitor.
//! 3. [`ui`]: ratatui-based tree viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use minijava::parser::Parser;
//! use minijava::printer::AstPrinter;
//!
//! let source = "class Hello { public static void main() { System.out.println(1); } }";
//! let program = Parser::from_source(source).parse_program().unwrap();
//! assert_eq!(program.main_class.class_name, "Hello");
//!
//! let text = AstPrinter::print_program(&program);
//! assert!(text.starts_with("Program"));
//! ```

pub mod parser;
pub mod printer;
pub mod ui;
