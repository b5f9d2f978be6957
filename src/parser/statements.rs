//! Statement parsing implementation
//!
//! This module handles parsing of all MiniJava statement types:
//!
//! - Local variable declarations: `int x;`, `Foo[] items;`
//! - Control flow: `if`/`else`, `while`
//! - `assert (cond);` and `System.out.println(expr);`
//! - Compound statements: `{ ... }`
//! - Assignments to the four lvalue forms and method-call statements
//! - `return expr;`
//!
//! # Grammar
//!
//! ```text
//! statement ::= "assert" "(" expr ")" ";"
//!             | var_decl
//!             | "{" statement* "}"
//!             | "if" "(" expr ")" statement ("else" statement)?
//!             | "while" "(" expr ")" statement
//!             | "System" "." "out" "." "println" "(" expr ")" ";"
//!             | "return" expr ";"
//!             | lvalue "=" expr ";"
//!             | postfix_expr "." ID "(" args? ")" ";"
//! lvalue    ::= ID | ID "[" expr "]" | "this" "." ID | "this" "." ID "[" expr "]"
//! ```
//!
//! A statement that starts with an identifier is the one place the parser
//! backtracks: the identifier is consumed, the following token is inspected,
//! and the cursor is rewound unless that token is `=`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.nested("Statement nested too deeply", Self::parse_single_statement)
    }

    fn parse_single_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();

        // Check for keywords first
        if self.match_token(TokenKind::Assert) {
            return self.parse_assert_statement(loc);
        }

        if self.match_token(TokenKind::LBrace) {
            let statements = self.parse_block_statements()?;
            self.expect_rbrace("to close block")?;
            return Ok(Statement::Block(BlockStmt {
                statements,
                location: loc,
            }));
        }

        if self.match_token(TokenKind::If) {
            return self.parse_if_statement(loc);
        }

        if self.match_token(TokenKind::While) {
            return self.parse_while_statement(loc);
        }

        if self.match_token(TokenKind::System) {
            return self.parse_print_statement(loc);
        }

        if self.match_token(TokenKind::Return) {
            let expr = self.parse_expression()?;
            self.expect_semicolon("after return value")?;
            return Ok(Statement::Return(ReturnStmt {
                expr,
                location: loc,
            }));
        }

        if matches!(
            self.peek().kind,
            TokenKind::Int | TokenKind::Boolean | TokenKind::Void
        ) {
            return self.parse_local_variable(loc);
        }

        if self.check(TokenKind::Identifier) {
            return self.parse_identifier_statement(loc);
        }

        if self.check(TokenKind::This) {
            return self.parse_expression_statement(loc);
        }

        Err(self.error("Expected statement"))
    }

    /// Parse assert statement: the `assert` keyword is already consumed
    fn parse_assert_statement(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        self.expect_lparen("after 'assert'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after assert condition")?;
        self.expect_semicolon("after assert")?;

        Ok(Statement::Assert(AssertStmt {
            condition,
            location: loc,
        }))
    }

    /// Parse if statement. A dangling `else` binds to the nearest `if`.
    fn parse_if_statement(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If(IfStmt {
            condition,
            then_branch,
            else_branch,
            location: loc,
        }))
    }

    /// Parse while statement
    fn parse_while_statement(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Statement::While(WhileStmt {
            condition,
            body,
            location: loc,
        }))
    }

    /// Parse `System.out.println(expr);` once `System` is consumed
    fn parse_print_statement(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        self.expect_token(TokenKind::Dot, "Expected '.' after 'System'")?;
        self.expect_token(TokenKind::Out, "Expected 'out' after 'System.'")?;
        self.expect_token(TokenKind::Dot, "Expected '.' after 'out'")?;
        self.expect_token(TokenKind::Println, "Expected 'println' after 'System.out.'")?;
        self.expect_lparen("after 'println'")?;
        let expr = self.parse_expression()?;
        self.expect_rparen("after println argument")?;
        self.expect_semicolon("after println statement")?;

        Ok(Statement::Print(PrintStmt {
            expr,
            location: loc,
        }))
    }

    fn parse_local_variable(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        let declaration = self.parse_variable_declaration()?;
        Ok(Statement::LocalVarDecl(LocalVarDeclStmt {
            declaration,
            location: loc,
        }))
    }

    /// Disambiguate a statement that starts with an identifier.
    ///
    /// `x = e;` commits straight away. `x[e] = ...` and `x.m(...)` rewind and
    /// go through the expression parser. Anything else rewinds and is read as
    /// a declaration whose type is the class named `x`.
    fn parse_identifier_statement(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        let saved_pos = self.position;
        let name = self.advance().lexeme.clone();

        if self.match_token(TokenKind::Eq) {
            let value = self.parse_expression()?;
            self.expect_semicolon("after assignment")?;
            return Ok(Statement::Assign(AssignStmt {
                target: LValue::Identifier(name),
                value,
                location: loc,
            }));
        }

        // `Foo[] x;` declares an array, `x[i] = ...` stores into one
        let is_indexed_store =
            self.check(TokenKind::LBracket) && !self.peek_ahead_is(1, TokenKind::RBracket);
        let is_call = self.check(TokenKind::Dot);

        self.position = saved_pos;

        if is_indexed_store || is_call {
            return self.parse_expression_statement(loc);
        }

        self.parse_local_variable(loc)
    }

    /// Parse an assignment to a compound lvalue or a method-call statement.
    fn parse_expression_statement(&mut self, loc: SourceLocation) -> Result<Statement, ParseError> {
        let expr = self.parse_expression()?;

        if self.check(TokenKind::Eq) {
            let target = self.assignment_target(expr)?;
            self.advance();
            let value = self.parse_expression()?;
            self.expect_semicolon("after assignment")?;
            return Ok(Statement::Assign(AssignStmt {
                target,
                value,
                location: loc,
            }));
        }

        match expr {
            Expression::MethodInvocation(invocation) => {
                self.expect_semicolon("after method call")?;
                Ok(Statement::MethodCall(MethodCallStmt {
                    invocation,
                    location: loc,
                }))
            }
            _ => Err(self.error("Expected '=' or method call")),
        }
    }

    /// Convert a parsed expression into an assignment target. The error is
    /// reported at the `=` that follows it.
    fn assignment_target(&self, expr: Expression) -> Result<LValue, ParseError> {
        match expr {
            Expression::Identifier(name) => Ok(LValue::Identifier(name)),
            Expression::FieldAccess(FieldAccess { receiver, field })
                if matches!(*receiver, Expression::This) =>
            {
                Ok(LValue::Field(FieldInvocation::Simple(field)))
            }
            Expression::ArrayIndex(ArrayIndex { array, index }) => match *array {
                Expression::Identifier(name) => Ok(LValue::ArrayAccess(ArrayAccess {
                    name,
                    index: *index,
                })),
                Expression::FieldAccess(FieldAccess { receiver, field })
                    if matches!(*receiver, Expression::This) =>
                {
                    Ok(LValue::Field(FieldInvocation::ArrayIndexed {
                        field,
                        index: *index,
                    }))
                }
                _ => Err(self.error("Invalid assignment target")),
            },
            _ => Err(self.error("Invalid assignment target")),
        }
    }
}
