//! Expression parsing (Pratt parsing)

use crate::ast::*;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::parser::{ParseResult, Parser, Precedence};
use crate::token::{Token, TokenKind};

/// Boolean spellings accepted by the language
const BOOLEAN_VOCABULARY: [(&str, bool); 6] = [
    ("true", true),
    ("True", true),
    ("TRUE", true),
    ("false", false),
    ("False", false),
    ("FALSE", false),
];

impl Parser<'_> {
    /// Parse an expression
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_precedence(Precedence::Lowest)
    }

    /// Parse expression with given precedence
    ///
    /// No operator may follow a closing brace, so an `if` expression is never
    /// the left operand of anything.
    ///
    /// Each operator folded into `left` deepens the tree by one, so it counts
    /// toward the nesting limit like a nested operand does.
    pub(super) fn parse_precedence(&mut self, precedence: Precedence) -> ParseResult<Expr> {
        let outer = self.depth;
        self.descend()?;
        let mut left = self.parse_prefix()?;

        while !self.after_block() && precedence < self.current_precedence() {
            self.descend()?;
            left = self.parse_binary(left)?;
        }

        self.depth = outer;
        Ok(left)
    }

    fn after_block(&self) -> bool {
        self.previous()
            .is_some_and(|t| t.kind == TokenKind::RightBrace)
    }

    /// Parse prefix expression
    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        match self.peek().kind {
            TokenKind::Integer => self.parse_integer(),
            TokenKind::Float => self.parse_float(),
            TokenKind::Boolean => self.parse_bool(),
            TokenKind::String => {
                let token = self.advance();
                Ok(Expr::Literal(Literal::String(token.lexeme.clone()), token.span))
            }
            TokenKind::Pi => Ok(self.parse_constant(Constant::Pi)),
            TokenKind::E => Ok(self.parse_constant(Constant::E)),
            TokenKind::Identifier => self.parse_identifier(),
            TokenKind::LeftParen => self.parse_group(),
            TokenKind::Not => self.parse_not(),
            TokenKind::Abs => self.parse_math(MathFunc::Absolute),
            TokenKind::Sin => self.parse_math(MathFunc::Sin),
            TokenKind::Cos => self.parse_math(MathFunc::Cos),
            TokenKind::Tan => self.parse_math(MathFunc::Tan),
            TokenKind::Pow => self.parse_math(MathFunc::Pow),
            TokenKind::ConsoleInput => self.parse_input(),
            TokenKind::If => self.parse_if(),
            TokenKind::Print | TokenKind::Let | TokenKind::Function => Err(self
                .error("Expected expression")
                .with_help("this keyword starts a statement and cannot be used as a value")),
            _ => Err(self.error("Expected expression")),
        }
    }

    /// Get current token precedence
    pub(super) fn current_precedence(&self) -> Precedence {
        token_precedence(self.peek())
    }

    fn parse_integer(&mut self) -> ParseResult<Expr> {
        let token = self.advance().clone();
        match token.lexeme.parse::<i64>() {
            Ok(value) => Ok(Expr::Literal(Literal::Integer(value), token.span)),
            Err(_) => Err(Diagnostic::error_with_code(
                error_codes::SYNTAX_ERROR,
                format!("Integer literal '{}' is out of range", token.lexeme),
                token.span,
            )
            .with_label("does not fit in 64 bits")),
        }
    }

    fn parse_float(&mut self) -> ParseResult<Expr> {
        let token = self.advance().clone();
        match token.lexeme.parse::<f64>() {
            Ok(value) => Ok(Expr::Literal(Literal::Float(value), token.span)),
            Err(_) => Err(self.error_at(&token, "Malformed float literal")),
        }
    }

    /// Boolean literals must use one of the fixed spellings
    fn parse_bool(&mut self) -> ParseResult<Expr> {
        let token = self.advance().clone();
        BOOLEAN_VOCABULARY
            .iter()
            .find(|(spelling, _)| *spelling == token.lexeme)
            .map(|(_, value)| Expr::Literal(Literal::Boolean(*value), token.span))
            .ok_or_else(|| {
                Diagnostic::error_with_code(
                    error_codes::TYPE_MISMATCH,
                    format!("Invalid boolean literal '{}'", token.lexeme),
                    token.span,
                )
                .with_label("not a boolean")
                .with_help("write true, True, TRUE, false, False or FALSE")
            })
    }

    fn parse_constant(&mut self, constant: Constant) -> Expr {
        let token = self.advance();
        Expr::Constant(NamedConstant {
            constant,
            negated: token.lexeme.contains('-'),
            span: token.span,
        })
    }

    /// Parse a variable reference or a zero-argument call
    fn parse_identifier(&mut self) -> ParseResult<Expr> {
        let name = self.consume_identifier("an identifier")?;

        if !self.match_token(TokenKind::LeftParen) {
            return Ok(Expr::Variable(name));
        }

        let end = self
            .consume(
                TokenKind::RightParen,
                "Expected ')': functions take no arguments",
            )?
            .span;
        let span = name.span.merge(end);
        Ok(Expr::Call(CallExpr { name, span }))
    }

    /// Parenthesized expression; the parentheses only group
    fn parse_group(&mut self) -> ParseResult<Expr> {
        self.consume(TokenKind::LeftParen, "Expected '('")?;
        let expr = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "Expected ')'")?;
        Ok(expr)
    }

    fn parse_not(&mut self) -> ParseResult<Expr> {
        let not_span = self.consume(TokenKind::Not, "Expected 'not'")?.span;
        let operand = self.parse_precedence(Precedence::Not)?;
        let span = not_span.merge(operand.span());

        Ok(Expr::Not(NotExpr {
            operand: Box::new(operand),
            span,
        }))
    }

    /// Parse `abs(x)`, `sin(x)`, `cos(x)`, `tan(x)` or `pow(x, y)`
    fn parse_math(&mut self, func: MathFunc) -> ParseResult<Expr> {
        let keyword = self.advance().clone();
        self.consume(
            TokenKind::LeftParen,
            &format!("Expected '(' after '{}'", func.keyword()),
        )?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        let close = self.consume(TokenKind::RightParen, "Expected ')' after arguments")?;

        if args.len() != func.arity() {
            return Err(self
                .error_at(
                    &close,
                    &format!(
                        "'{}' expects {} argument{}, got {}",
                        func.keyword(),
                        func.arity(),
                        if func.arity() == 1 { "" } else { "s" },
                        args.len()
                    ),
                )
                .with_label("wrong number of arguments"));
        }

        Ok(Expr::Math(MathCall {
            func,
            args,
            span: keyword.span.merge(close.span),
        }))
    }

    /// Parse `input()` or `input(prompt)`
    fn parse_input(&mut self) -> ParseResult<Expr> {
        let input_span = self.advance().span;
        self.consume(TokenKind::LeftParen, "Expected '(' after 'input'")?;

        let prompt = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        let end = self
            .consume(TokenKind::RightParen, "Expected ')': input takes at most one argument")?
            .span;

        Ok(Expr::Input(InputExpr {
            prompt,
            span: input_span.merge(end),
        }))
    }

    /// Parse `if (cond) { block } [else { block }]`
    fn parse_if(&mut self) -> ParseResult<Expr> {
        let if_span = self.consume(TokenKind::If, "Expected 'if'")?.span;
        self.consume(TokenKind::LeftParen, "Expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "Expected ')' after condition")?;

        let then_block = self.parse_block()?;
        let else_block = if self.match_token(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        let end = else_block.as_ref().unwrap_or(&then_block).span;

        Ok(Expr::If(IfExpr {
            condition: Box::new(condition),
            then_block,
            else_block,
            span: if_span.merge(end),
        }))
    }

    /// Parse binary expression
    fn parse_binary(&mut self, left: Expr) -> ParseResult<Expr> {
        let op_token = self.advance().clone();
        let precedence = token_precedence(&op_token);

        let op = match op_token.kind {
            TokenKind::Plus => BinaryOp::Sum,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::EqualEqual => BinaryOp::Equal,
            TokenKind::BangEqual => BinaryOp::NotEqual,
            TokenKind::Greater => BinaryOp::GreaterThan,
            TokenKind::Less => BinaryOp::LessThan,
            TokenKind::GreaterEqual => BinaryOp::GreaterThanEqual,
            TokenKind::LessEqual => BinaryOp::LessThanEqual,
            TokenKind::And => BinaryOp::And,
            TokenKind::Or => BinaryOp::Or,
            _ => return Err(self.error_at(&op_token, "Expected operator")),
        };

        let right = self.parse_precedence(precedence)?;
        let span = left.span().merge(right.span());

        Ok(Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span,
        }))
    }
}

/// Get precedence for a token used as an infix operator
fn token_precedence(token: &Token) -> Precedence {
    match token.kind {
        TokenKind::And | TokenKind::Or => Precedence::Logical,
        TokenKind::EqualEqual
        | TokenKind::BangEqual
        | TokenKind::Greater
        | TokenKind::Less
        | TokenKind::GreaterEqual
        | TokenKind::LessEqual => Precedence::Comparison,
        TokenKind::Plus | TokenKind::Minus => Precedence::Term,
        TokenKind::Star | TokenKind::Slash => Precedence::Factor,
        _ => Precedence::Lowest,
    }
}
