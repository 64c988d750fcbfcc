//! Expression parser
//!
//! Parses rule text into Expression AST nodes.
//!
//! Supported syntax (lowest to highest precedence):
//! - Ternary: `cond ? a : b`
//! - Logical: `||` / `or`, then `&&` / `and` (both short-circuit at run time)
//! - Comparison: `==`, `!=`, `<`, `<=`, `>`, `>=`, `matches`, `contains`,
//!   `startsWith`, `endsWith`, `in`, `not in`
//! - Additive `+`, `-` and multiplicative `*`, `/`, `%`
//! - Unary: `!`, `not`, `-`
//! - Field access: `Exporter.Name`, `Interface.Speed`
//! - Literals: `42`, `3.14`, `"string"`, `'string'`, `` `raw` ``, `true`, `false`, `nil`
//! - Function calls: `classify("core")`, `classifyExternal()`
//! - Arrays: `["a", "b"]`, parentheses for grouping
//!
//! Expressions nested deeper than [`MAX_DEPTH`] levels are rejected, so
//! later passes can walk the tree recursively.

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use flowclass_core::ast::{Expression, Operator, UnaryOperator};
use flowclass_core::Value;

/// Deepest expression tree the parser will build
pub const MAX_DEPTH: usize = 128;

/// Expression parser
pub struct ExpressionParser {
    tokens: Vec<Token>,
    pos: usize,
    /// Current recursion depth of `parse_ternary` / `parse_unary`
    depth: usize,
}

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        if input.trim().is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let tokens = Lexer::new(input).tokenize()?;
        let mut parser = Self {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.parse_ternary()?;
        parser.expect_end()?;

        log::trace!("parsed rule {:?} into {:?}", input, expr);
        Ok(expr)
    }

    fn peek(&self) -> &TokenKind {
        // The lexer always terminates the stream with Eof, and we never advance past it.
        &self.tokens[self.pos].kind
    }

    fn peek_at(&self, offset: usize) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn position(&self) -> usize {
        self.tokens[self.pos].position
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.tokens[self.pos].kind.clone();
        if kind != TokenKind::Eof {
            self.pos += 1;
        }
        kind
    }

    fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), TokenKind::Ident(name) if name == keyword)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            TokenKind::Eof => ParseError::UnexpectedEnd {
                expected: expected.to_string(),
            },
            found => ParseError::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
                position: self.position(),
            },
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<()> {
        if *self.peek() == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_end(&self) -> Result<()> {
        if *self.peek() == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.unexpected("end of expression"))
        }
    }

    fn too_deep(&self) -> ParseError {
        ParseError::InvalidExpression(format!(
            "expression nested deeper than {} levels at position {}",
            MAX_DEPTH,
            self.position()
        ))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Reject `expr` if it grew past `MAX_DEPTH`. Its children are already bounded.
    fn bounded(&self, expr: Expression) -> Result<Expression> {
        if expr.depth() > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok(expr)
    }

    /// cond ? a : b
    fn parse_ternary(&mut self) -> Result<Expression> {
        self.enter()?;
        let expr = self.parse_conditional()?;
        self.leave();
        Ok(expr)
    }

    fn parse_conditional(&mut self) -> Result<Expression> {
        let condition = self.parse_or()?;
        if *self.peek() != TokenKind::Question {
            return Ok(condition);
        }
        self.advance();
        let true_expr = self.parse_ternary()?;
        self.expect(TokenKind::Colon, "':' in ternary expression")?;
        let false_expr = self.parse_ternary()?;
        self.bounded(Expression::ternary(condition, true_expr, false_expr))
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        while *self.peek() == TokenKind::OrOr || self.is_keyword("or") {
            self.advance();
            let right = self.parse_and()?;
            left = self.bounded(Expression::binary(left, Operator::Or, right))?;
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_comparison()?;
        while *self.peek() == TokenKind::AndAnd || self.is_keyword("and") {
            self.advance();
            let right = self.parse_comparison()?;
            left = self.bounded(Expression::binary(left, Operator::And, right))?;
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.comparison_operator() {
            let right = self.parse_additive()?;
            left = self.bounded(Expression::binary(left, op, right))?;
        }
        Ok(left)
    }

    /// Consume a comparison operator if one is next
    fn comparison_operator(&mut self) -> Option<Operator> {
        let (op, width) = match self.peek() {
            TokenKind::EqEq => (Operator::Eq, 1),
            TokenKind::NotEq => (Operator::Ne, 1),
            TokenKind::Lt => (Operator::Lt, 1),
            TokenKind::Le => (Operator::Le, 1),
            TokenKind::Gt => (Operator::Gt, 1),
            TokenKind::Ge => (Operator::Ge, 1),
            TokenKind::Ident(name) => match name.as_str() {
                "matches" => (Operator::Matches, 1),
                "contains" => (Operator::Contains, 1),
                "startsWith" => (Operator::StartsWith, 1),
                "endsWith" => (Operator::EndsWith, 1),
                "in" => (Operator::In, 1),
                "not" if matches!(self.peek_at(1), TokenKind::Ident(next) if next == "in") => {
                    (Operator::NotIn, 2)
                }
                _ => return None,
            },
            _ => return None,
        };
        for _ in 0..width {
            self.advance();
        }
        Some(op)
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => Operator::Add,
                TokenKind::Minus => Operator::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.bounded(Expression::binary(left, op, right))?;
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => Operator::Mul,
                TokenKind::Slash => Operator::Div,
                TokenKind::Percent => Operator::Mod,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_unary()?;
            left = self.bounded(Expression::binary(left, op, right))?;
        }
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        if *self.peek() == TokenKind::Bang || self.is_keyword("not") {
            self.advance();
            let operand = self.parse_nested_unary()?;
            return self.bounded(Expression::unary(UnaryOperator::Not, operand));
        }
        if *self.peek() == TokenKind::Minus {
            self.advance();
            return match self.parse_nested_unary()? {
                Expression::Literal(Value::Number(n)) => Ok(Expression::literal(Value::Number(-n))),
                operand => self.bounded(Expression::unary(UnaryOperator::Negate, operand)),
            };
        }
        self.parse_member()
    }

    fn parse_nested_unary(&mut self) -> Result<Expression> {
        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();
        Ok(operand)
    }

    /// Primary expression followed by `.Field` accessors
    fn parse_member(&mut self) -> Result<Expression> {
        let start = self.position();
        let mut expr = self.parse_primary()?;
        while *self.peek() == TokenKind::Dot {
            self.advance();
            let field = match self.peek() {
                TokenKind::Ident(name) => name.clone(),
                _ => return Err(self.unexpected("field name after '.'")),
            };
            self.advance();
            match &mut expr {
                Expression::FieldAccess(path) => path.push(field),
                _ => {
                    return Err(ParseError::InvalidExpression(format!(
                        "field access '.{}' at position {} is only supported on variables",
                        field, start
                    )))
                }
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let expected = "an expression";
        match self.peek().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expression::literal(Value::Number(n)))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expression::literal(Value::String(s)))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_ternary()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                self.advance();
                let items = self.parse_list(TokenKind::RBracket, "']'")?;
                self.bounded(Expression::Array(items))
            }
            TokenKind::Ident(name) => match name.as_str() {
                "true" => {
                    self.advance();
                    Ok(Expression::literal(Value::Bool(true)))
                }
                "false" => {
                    self.advance();
                    Ok(Expression::literal(Value::Bool(false)))
                }
                "nil" => {
                    self.advance();
                    Ok(Expression::literal(Value::Null))
                }
                "and" | "or" | "in" | "matches" | "contains" | "startsWith" | "endsWith" => {
                    Err(self.unexpected(expected))
                }
                _ => {
                    self.advance();
                    if *self.peek() == TokenKind::LParen {
                        self.advance();
                        let args = self.parse_list(TokenKind::RParen, "')'")?;
                        self.bounded(Expression::function_call(name, args))
                    } else {
                        Ok(Expression::field_access(vec![name]))
                    }
                }
            },
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Comma separated expressions up to `close` (opening token already consumed)
    fn parse_list(&mut self, close: TokenKind, expected_close: &str) -> Result<Vec<Expression>> {
        let mut items = Vec::new();
        if *self.peek() == close {
            self.advance();
            return Ok(items);
        }
        loop {
            items.push(self.parse_ternary()?);
            if *self.peek() == TokenKind::Comma {
                self.advance();
                continue;
            }
            self.expect(close.clone(), expected_close)?;
            return Ok(items);
        }
    }
}
