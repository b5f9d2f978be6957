//! Declaration parsing implementation
//!
//! This module handles parsing of the class-level structure of a program:
//!
//! - The main class: `class Name { public static void main() { ... } }`
//! - Class declarations with an optional base class
//! - Fields and methods (an optional leading `public` is accepted)
//! - Types: `int`, `boolean`, `void`, class names, and one-level arrays
//!
//! # Grammar
//!
//! ```text
//! main_class  ::= "class" ID "{" "public" "static" "void" "main" "(" ")" "{" stmt* "}" "}"
//! class_decl  ::= "class" ID ("extends" ID)? "{" member* "}"
//! member      ::= "public"? type ID ( "(" formals? ")" "{" stmt* "}" | ";" )
//! formals     ::= type ID ("," type ID)*
//! var_decl    ::= type ID ";"
//! type        ::= simple_type ("[" "]")?
//! simple_type ::= "int" | "boolean" | "void" | ID
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse the main class holding `public static void main()`
    pub(crate) fn parse_main_class(&mut self) -> Result<MainClass, ParseError> {
        let location = self.current_location();

        self.expect_token(TokenKind::Class, "Expected 'class' to start the main class")?;
        let class_name = self.expect_identifier("for main class name")?;
        self.expect_lbrace("after main class name")?;

        self.expect_token(TokenKind::Public, "Expected 'public' before main method")?;
        self.expect_token(TokenKind::Static, "Expected 'static' after 'public'")?;
        self.expect_token(TokenKind::Void, "Expected 'void' after 'static'")?;
        self.expect_token(TokenKind::Main, "Expected 'main' after 'void'")?;
        self.expect_lparen("after 'main'")?;
        self.expect_rparen("after '(' in main method header")?;
        self.expect_lbrace("before main method body")?;

        let statements = self.parse_block_statements()?;

        self.expect_rbrace("to close main method")?;
        self.expect_rbrace("to close main class")?;

        Ok(MainClass {
            class_name,
            statements,
            location,
        })
    }

    /// Parse class declaration: class Name [extends Base] { members }
    pub(crate) fn parse_class_declaration(&mut self) -> Result<ClassDeclaration, ParseError> {
        let location = self.current_location();

        self.expect_token(TokenKind::Class, "Expected 'class'")?;
        let class_name = self.expect_identifier("for class name")?;

        let base_class = if self.match_token(TokenKind::Extends) {
            Some(self.expect_identifier("after 'extends'")?)
        } else {
            None
        };

        self.expect_lbrace("after class name")?;

        let mut declarations = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            declarations.push(self.parse_member()?);
        }

        self.expect_rbrace("to close class body")?;

        Ok(ClassDeclaration {
            class_name,
            base_class,
            declarations,
            location,
        })
    }

    /// Parse a field or method. `public` always introduces a method; without
    /// it the token after the name decides.
    fn parse_member(&mut self) -> Result<Declaration, ParseError> {
        let location = self.current_location();
        let is_public = self.match_token(TokenKind::Public);

        let member_type = self.parse_type()?;
        let name = self.expect_identifier("after member type")?;

        if is_public || self.check(TokenKind::LParen) {
            let method = self.parse_method_rest(member_type, name, location)?;
            return Ok(Declaration::Method(method));
        }

        self.expect_semicolon("after field declaration")?;

        Ok(Declaration::Variable(VarDecl {
            var_type: member_type,
            name,
            location,
        }))
    }

    /// Parse the rest of a method once its return type and name are known:
    /// (params) { body }
    fn parse_method_rest(
        &mut self,
        return_type: Type,
        name: String,
        location: SourceLocation,
    ) -> Result<MethodDecl, ParseError> {
        self.expect_lparen("after method name")?;

        let params = if self.check(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_formals()?
        };

        self.expect_rparen("after parameters")?;
        self.expect_lbrace("before method body")?;

        let body = self.parse_block_statements()?;

        self.expect_rbrace("to close method body")?;

        Ok(MethodDecl {
            return_type,
            name,
            params,
            body,
            location,
        })
    }

    /// Parse formal parameters: type name, type name, ...
    fn parse_formals(&mut self) -> Result<Vec<VarDecl>, ParseError> {
        let mut params = Vec::new();

        loop {
            let location = self.current_location();
            let var_type = self.parse_type()?;
            let name = self.expect_identifier("for parameter name")?;
            params.push(VarDecl {
                var_type,
                name,
                location,
            });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse variable declaration: type name;
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<VarDecl, ParseError> {
        let location = self.current_location();
        let var_type = self.parse_type()?;
        let name = self.expect_identifier("for variable name")?;
        self.expect_semicolon("after variable declaration")?;

        Ok(VarDecl {
            var_type,
            name,
            location,
        })
    }

    /// Parse type: simple_type [ "[" "]" ]
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        let element = self.parse_simple_type()?;

        if self.match_token(TokenKind::LBracket) {
            self.expect_token(TokenKind::RBracket, "Expected ']' in array type")?;
            return Ok(Type::Array(element));
        }

        Ok(Type::Simple(element))
    }

    pub(crate) fn parse_simple_type(&mut self) -> Result<SimpleType, ParseError> {
        if self.match_token(TokenKind::Int) {
            Ok(SimpleType::Int)
        } else if self.match_token(TokenKind::Boolean) {
            Ok(SimpleType::Boolean)
        } else if self.match_token(TokenKind::Void) {
            Ok(SimpleType::Void)
        } else if self.check(TokenKind::Identifier) {
            Ok(SimpleType::Identifier(self.advance().lexeme.clone()))
        } else {
            Err(self.error("Expected type"))
        }
    }
}
