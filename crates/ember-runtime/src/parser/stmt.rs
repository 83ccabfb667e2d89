//! Statement parsing

use crate::ast::*;
use crate::parser::{ParseResult, Parser};
use crate::token::TokenKind;

impl Parser<'_> {
    /// Parse a statement and its terminator
    ///
    /// Statements ending in a closing brace may omit the `;`.
    pub(super) fn parse_statement_full(&mut self) -> ParseResult<Stmt> {
        let stmt = self.parse_statement()?;
        if stmt.ends_with_block() {
            self.match_token(TokenKind::Semicolon);
        } else {
            self.consume(TokenKind::Semicolon, "Expected ';' after statement")?;
        }
        Ok(stmt)
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::Let => self.parse_let(),
            TokenKind::Print => self.parse_print(),
            TokenKind::Function => self.parse_function(),
            _ => Ok(Stmt::Expr(self.parse_expression()?)),
        }
    }

    /// Parse `let name = expr`
    fn parse_let(&mut self) -> ParseResult<Stmt> {
        let let_span = self.consume(TokenKind::Let, "Expected 'let'")?.span;
        let name = self.consume_identifier("a variable name after 'let'")?;
        self.consume(TokenKind::Equal, "Expected '=' after variable name")?;
        let value = self.parse_expression()?;
        let span = let_span.merge(value.span());

        self.state.record_variable(&name.name, &value);

        Ok(Stmt::Let(LetStmt { name, value, span }))
    }

    /// Parse `print()` or `print(expr)`
    fn parse_print(&mut self) -> ParseResult<Stmt> {
        let print_span = self.consume(TokenKind::Print, "Expected 'print'")?.span;
        self.consume(TokenKind::LeftParen, "Expected '(' after 'print'")?;

        let value = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let end = self
            .consume(TokenKind::RightParen, "Expected ')' after print argument")?
            .span;

        Ok(Stmt::Print(PrintStmt {
            value,
            span: print_span.merge(end),
        }))
    }

    /// Parse `function name() { block }` and register it immediately
    fn parse_function(&mut self) -> ParseResult<Stmt> {
        let fn_span = self.consume(TokenKind::Function, "Expected 'function'")?.span;
        let name = self.consume_identifier("a function name")?;

        self.consume(TokenKind::LeftParen, "Expected '(' after function name")?;
        self.consume(
            TokenKind::RightParen,
            "Expected ')': functions take no parameters",
        )?;

        let body = self.parse_block()?;
        let span = fn_span.merge(body.span);

        self.state.register_function(&name.name, body.clone());

        Ok(Stmt::FunctionDecl(FunctionDecl { name, body, span }))
    }

    /// Parse `{ statement_full+ }`
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let open = self.consume(TokenKind::LeftBrace, "Expected '{'")?.span;
        let outer = self.depth;
        self.descend()?;

        if self.check(TokenKind::RightBrace) {
            return Err(self.error("Expected at least one statement in block"));
        }

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement_full()?);
        }

        let close = self
            .consume(TokenKind::RightBrace, "Expected '}' to close block")?
            .span;
        self.depth = outer;

        Ok(Block::new(statements, open.merge(close)))
    }
}
