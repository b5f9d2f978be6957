//! Expression parsing implementation
//!
//! This module handles parsing of MiniJava expressions, one function per
//! precedence level, and recursive descent for the remaining forms.
//!
//! # Supported Expressions
//!
//! - Literals: integers, `true`, `false`
//! - Identifiers and `this`
//! - Binary operators: `||`, `&&`, `==`, `<`, `>`, `+`, `-`, `*`, `/`, `%`
//! - Unary operator: `!`
//! - Postfix: `[index]`, `.length`, `.field`, `.method(args)`
//! - Object and array creation: `new C()`, `new int[n]`, `new C[n]`
//!
//! # Precedence
//!
//! Lowest to highest; every binary level is left-associative:
//!
//! ```text
//! ||  →  &&  →  ==  →  < >  →  + -  →  * / %  →  !  →  postfix  →  primary
//! ```
//!
//! There is no unary minus: the lexer folds a leading `-` into an integer
//! literal where it cannot be a binary operator.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.nested("Expression nested too deeply", Self::parse_logical_or)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(TokenKind::OrOr) {
            let right = self.parse_logical_and()?;
            left = Expression::binary(left, BinaryOperator::Or, right);
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_equality()?;

        while self.match_token(TokenKind::AndAnd) {
            let right = self.parse_equality()?;
            left = Expression::binary(left, BinaryOperator::And, right);
        }

        Ok(left)
    }

    /// Parse equality (==)
    fn parse_equality(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_relational()?;

        while self.match_token(TokenKind::EqEq) {
            let right = self.parse_relational()?;
            left = Expression::binary(left, BinaryOperator::Equal, right);
        }

        Ok(left)
    }

    /// Parse relational (< >)
    fn parse_relational(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = if self.match_token(TokenKind::Lt) {
                BinaryOperator::Less
            } else if self.match_token(TokenKind::Gt) {
                BinaryOperator::Greater
            } else {
                break;
            };

            let right = self.parse_additive()?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = if self.match_token(TokenKind::Plus) {
                BinaryOperator::Plus
            } else if self.match_token(TokenKind::Minus) {
                BinaryOperator::Minus
            } else {
                break;
            };

            let right = self.parse_multiplicative()?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = if self.match_token(TokenKind::Star) {
                BinaryOperator::Multiply
            } else if self.match_token(TokenKind::Slash) {
                BinaryOperator::Divide
            } else if self.match_token(TokenKind::Percent) {
                BinaryOperator::Modulo
            } else {
                break;
            };

            let right = self.parse_unary()?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse unary (!)
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        if self.match_token(TokenKind::Bang) {
            let operand = self.nested("Expression nested too deeply", Self::parse_unary)?;
            return Ok(Expression::unary(UnaryOperator::Not, operand));
        }

        self.parse_postfix()
    }

    /// Parse postfix chain: [index], .length, .field, .method(args)
    fn parse_postfix(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_token(TokenKind::LBracket) {
                let index = self.parse_expression()?;
                self.expect_token(TokenKind::RBracket, "Expected ']' after array index")?;
                expr = Expression::ArrayIndex(ArrayIndex {
                    array: Box::new(expr),
                    index: Box::new(index),
                });
            } else if self.match_token(TokenKind::Dot) {
                if self.match_token(TokenKind::Length) {
                    expr = Expression::ArrayLength(ArrayLength {
                        array: Box::new(expr),
                    });
                    continue;
                }

                let name = self.expect_identifier("after '.'")?;

                if self.match_token(TokenKind::LParen) {
                    let args = self.parse_arguments()?;
                    self.expect_rparen("after arguments")?;
                    expr = Expression::MethodInvocation(MethodInvocation {
                        receiver: Box::new(expr),
                        method: name,
                        args,
                    });
                } else {
                    expr = Expression::FieldAccess(FieldAccess {
                        receiver: Box::new(expr),
                        field: name,
                    });
                }
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse call arguments up to, but not including, the closing paren
    fn parse_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }

    /// Parse primary expressions
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        match self.peek().kind {
            TokenKind::IntegerLiteral => {
                let value = self
                    .peek()
                    .lexeme
                    .parse::<i32>()
                    .map_err(|_| self.error("Integer literal out of range"))?;
                self.advance();
                Ok(Expression::IntegerLiteral(value))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expression::BooleanLiteral(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expression::BooleanLiteral(false))
            }
            TokenKind::This => {
                self.advance();
                Ok(Expression::This)
            }
            TokenKind::Identifier => {
                let name = self.advance().lexeme.clone();
                Ok(Expression::Identifier(name))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after parenthesized expression")?;
                Ok(expr)
            }
            TokenKind::New => {
                self.advance();
                self.parse_new_expression()
            }
            _ => Err(self.error("Expected expression")),
        }
    }

    /// Parse the part of a creation expression after `new`
    fn parse_new_expression(&mut self) -> Result<Expression, ParseError> {
        if self.match_token(TokenKind::Int) {
            return self.parse_array_size(SimpleType::Int);
        }

        if self.match_token(TokenKind::Boolean) {
            return self.parse_array_size(SimpleType::Boolean);
        }

        if self.check(TokenKind::Identifier) {
            if self.peek_ahead_is(1, TokenKind::LBracket) {
                let name = self.advance().lexeme.clone();
                return self.parse_array_size(SimpleType::Identifier(name));
            }

            if self.peek_ahead_is(1, TokenKind::LParen) {
                let class_name = self.advance().lexeme.clone();
                self.advance(); // consume '('
                self.expect_rparen("in object creation")?;
                return Ok(Expression::NewObject(NewObject { class_name }));
            }
        }

        Err(self.error("Expected type after 'new'"))
    }

    /// Parse `[ size ]` of an array creation
    fn parse_array_size(&mut self, element_type: SimpleType) -> Result<Expression, ParseError> {
        self.expect_token(
            TokenKind::LBracket,
            "Expected '[' after array element type",
        )?;
        let size = self.parse_expression()?;
        self.expect_token(TokenKind::RBracket, "Expected ']' after array size")?;

        Ok(Expression::NewArray(NewArray {
            element_type,
            size: Box::new(size),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};

    fn parse_expr(source: &str) -> Result<Expression, ParseError> {
        Parser::from_source(source).parse_expression()
    }

    fn int(value: i32) -> Expression {
        Expression::IntegerLiteral(value)
    }

    fn ident(name: &str) -> Expression {
        Expression::Identifier(name.to_string())
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expr = parse_expr("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                int(1),
                BinaryOperator::Plus,
                Expression::binary(int(2), BinaryOperator::Multiply, int(3)),
            )
        );
    }

    #[test]
    fn test_comparisons_under_and() {
        let expr = parse_expr("1 < 2 && 3 < 4").unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                Expression::binary(int(1), BinaryOperator::Less, int(2)),
                BinaryOperator::And,
                Expression::binary(int(3), BinaryOperator::Less, int(4)),
            )
        );
    }

    #[test]
    fn test_binary_levels_are_left_associative() {
        let expr = parse_expr("10 - 4 - 3").unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                Expression::binary(int(10), BinaryOperator::Minus, int(4)),
                BinaryOperator::Minus,
                int(3),
            )
        );
    }

    #[test]
    fn test_or_is_lowest_and_equality_below_relational() {
        let expr = parse_expr("a || b && c == d < e").unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                ident("a"),
                BinaryOperator::Or,
                Expression::binary(
                    ident("b"),
                    BinaryOperator::And,
                    Expression::binary(
                        ident("c"),
                        BinaryOperator::Equal,
                        Expression::binary(ident("d"), BinaryOperator::Less, ident("e")),
                    ),
                ),
            )
        );
    }

    #[test]
    fn test_parentheses_and_not() {
        let expr = parse_expr("!(a && b) % 2").unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                Expression::unary(
                    UnaryOperator::Not,
                    Expression::binary(ident("a"), BinaryOperator::And, ident("b")),
                ),
                BinaryOperator::Modulo,
                int(2),
            )
        );
    }

    #[test]
    fn test_postfix_chain() {
        let expr = parse_expr("this.items[i].length").unwrap();
        assert_eq!(
            expr,
            Expression::ArrayLength(ArrayLength {
                array: Box::new(Expression::ArrayIndex(ArrayIndex {
                    array: Box::new(Expression::FieldAccess(FieldAccess {
                        receiver: Box::new(Expression::This),
                        field: "items".to_string(),
                    })),
                    index: Box::new(ident("i")),
                })),
            })
        );
    }

    #[test]
    fn test_call_on_new_object() {
        let expr = parse_expr("new Fac().ComputeFac(10)").unwrap();
        assert_eq!(
            expr,
            Expression::MethodInvocation(MethodInvocation {
                receiver: Box::new(Expression::NewObject(NewObject {
                    class_name: "Fac".to_string(),
                })),
                method: "ComputeFac".to_string(),
                args: vec![int(10)],
            })
        );
    }

    #[test]
    fn test_new_array_forms() {
        let cases = [
            ("new int[n + 1]", SimpleType::Int),
            ("new boolean[2]", SimpleType::Boolean),
            ("new Foo[3]", SimpleType::Identifier("Foo".to_string())),
        ];

        for (source, expected) in cases {
            match parse_expr(source).unwrap() {
                Expression::NewArray(array) => assert_eq!(array.element_type, expected),
                other => panic!("{}: expected array creation, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn test_invalid_new_forms() {
        for source in ["new 5", "new void[3]", "new Foo"] {
            let err = parse_expr(source).unwrap_err();
            assert_eq!(err.message, "Expected type after 'new'", "{}", source);
        }

        let err = parse_expr("new int(3)").unwrap_err();
        assert_eq!(err.message, "Expected '[' after array element type");
    }

    #[test]
    fn test_integer_literal_bounds() {
        assert_eq!(parse_expr("-2147483648").unwrap(), int(i32::MIN));

        let err = parse_expr("2147483648").unwrap_err();
        assert_eq!(err.message, "Integer literal out of range");
    }

    #[test]
    fn test_missing_operand() {
        let err = parse_expr("1 +").unwrap_err();
        assert_eq!(err.message, "Expected expression");
    }
}
