//! Parsing (tokens to AST)
//!
//! The parser converts a stream of tokens into an Abstract Syntax Tree (AST).
//! Uses Pratt parsing for expressions and recursive descent for statements.
//!
//! Parsing stops at the first syntax error: there is no recovery and no
//! partial program. Function declarations are registered into the
//! [`ParserState`] as soon as they are parsed.

mod expr;
mod stmt;

use crate::ast::*;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::interpreter::MAX_NESTING_DEPTH;
use crate::span::Span;
use crate::symbol::ParserState;
use crate::token::{Token, TokenKind};

/// Result of a parse step; the error is the offending token's diagnostic
pub(super) type ParseResult<T> = Result<T, Diagnostic>;

/// Parser state for building AST from tokens
pub struct Parser<'s> {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    pub(super) state: &'s mut ParserState,
    /// Expression and block nesting at the current position
    pub(super) depth: usize,
}

/// Operator precedence levels for Pratt parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    Lowest,
    Logical,    // and or
    Not,        // not
    Comparison, // == != >= <= > <
    Term,       // + -
    Factor,     // * /
}

impl<'s> Parser<'s> {
    /// Create a new parser for the given tokens
    ///
    /// An `Eof` token is appended if the stream lacks one.
    pub fn new(mut tokens: Vec<Token>, state: &'s mut ParserState) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, "", Span::new(end, end)));
        }
        Self {
            tokens,
            current: 0,
            state,
            depth: 0,
        }
    }

    /// Parse tokens into a program of one or more statements
    pub fn parse(&mut self) -> Result<Program, Diagnostic> {
        if self.is_at_end() {
            return Err(self.error("Expected a statement"));
        }

        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement_full()?);
        }

        tracing::debug!(
            statements = statements.len(),
            functions = self.state.functions.len(),
            "parsed program"
        );
        Ok(Program { statements })
    }

    // === Helper methods ===

    /// Advance to next token and return reference to previous
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        &self.tokens[self.current - 1]
    }

    /// Peek at current token
    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// The most recently consumed token, if any
    pub(super) fn previous(&self) -> Option<&Token> {
        self.current.checked_sub(1).map(|i| &self.tokens[i])
    }

    /// Check if current token matches kind
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Match and consume token if it matches
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) && !self.is_at_end() {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume token of given kind or fail on the current token
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) && !self.is_at_end() {
            Ok(self.advance().clone())
        } else {
            Err(self.error(message))
        }
    }

    /// Consume an identifier token
    pub(super) fn consume_identifier(&mut self, context: &str) -> ParseResult<Identifier> {
        let token = self.consume(TokenKind::Identifier, &format!("Expected {}", context))?;
        Ok(Identifier {
            name: token.lexeme,
            span: token.span,
        })
    }

    /// Enter one more level of nesting
    ///
    /// Callers restore `depth` once the nested construct is parsed.
    pub(super) fn descend(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth <= MAX_NESTING_DEPTH {
            return Ok(());
        }
        Err(Diagnostic::error_with_code(
            error_codes::SYNTAX_ERROR,
            format!("Program nests deeper than {} levels", MAX_NESTING_DEPTH),
            self.peek().span,
        )
        .with_label("nested too deeply")
        .with_help("split long expressions across several let statements"))
    }

    /// Check if at end of token stream
    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Build a syntax error pointing at the current token
    pub(super) fn error(&self, message: &str) -> Diagnostic {
        self.error_at(self.peek(), message)
    }

    /// Build a syntax error pointing at `token`
    pub(super) fn error_at(&self, token: &Token, message: &str) -> Diagnostic {
        Diagnostic::error_with_code(
            error_codes::SYNTAX_ERROR,
            format!("{}, found {}", message, describe(token)),
            token.span,
        )
        .with_label("syntax error")
    }
}

/// Human-readable description of a token for error messages
fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::String => format!("string \"{}\"", token.lexeme),
        _ => format!("'{}'", token.lexeme),
    }
}
