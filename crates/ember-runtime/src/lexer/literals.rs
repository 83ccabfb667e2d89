//! Literal parsing for the lexer

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Scan a string literal opened by `quote`
    ///
    /// No escape sequences; the lexeme is the raw text between the quotes.
    pub(super) fn string(&mut self, quote: char) -> Token {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != quote {
            if self.peek() == '\n' {
                self.line += 1;
            }
            value.push(self.advance());
        }

        if self.is_at_end() {
            return self.error_unterminated_string();
        }

        self.advance(); // closing quote
        self.make_token(TokenKind::String, &value)
    }

    /// Scan an integer or float literal
    ///
    /// The first digit (and a leading `-`, if any) has already been consumed.
    pub(super) fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let mut kind = TokenKind::Integer;
        if self.peek() == '.' && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            kind = TokenKind::Float;
            self.advance(); // .
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let lexeme: String = self.chars[self.start_pos..self.current].iter().collect();
        self.make_token(kind, &lexeme)
    }

    /// Scan an identifier, keyword, boolean or named constant
    pub(super) fn identifier(&mut self) -> Token {
        while is_identifier_char(self.peek()) {
            self.advance();
        }

        let lexeme: String = self.chars[self.start_pos..self.current].iter().collect();
        let kind = TokenKind::is_keyword(&lexeme).unwrap_or(TokenKind::Identifier);

        self.make_token(kind, &lexeme)
    }

    /// Scan `__PI__` or `__E__` directly after a consumed `-`
    pub(super) fn negated_constant(&mut self) -> Option<Token> {
        for (name, kind) in [("__PI__", TokenKind::Pi), ("__E__", TokenKind::E)] {
            let end = self.current + name.len();
            if end > self.chars.len() {
                continue;
            }
            let matches = self.chars[self.current..end].iter().copied().eq(name.chars());
            let followed_by_ident = self.chars.get(end).copied().is_some_and(is_identifier_char);
            if matches && !followed_by_ident {
                self.current = end;
                return Some(self.make_token(kind, &format!("-{}", name)));
            }
        }
        None
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
