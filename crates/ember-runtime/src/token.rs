//! Token types for lexical analysis
//!
//! Defines all token types recognized by the Ember lexer.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Token type produced by the lexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The matched source text (string literals without their quotes)
    pub lexeme: String,
    /// Source location
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

/// Classification of token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    /// String literal ('hi' or "hi")
    String,
    /// Integer literal (42, -7)
    Integer,
    /// Float literal (3.14)
    Float,
    /// Boolean literal, any casing of true/false
    Boolean,
    /// `__PI__` or `-__PI__`
    Pi,
    /// `__E__` or `-__E__`
    E,
    /// Identifier
    Identifier,

    // Keywords
    /// `print`
    Print,
    /// `if`
    If,
    /// `else`
    Else,
    /// `not`
    Not,
    /// `and`
    And,
    /// `or`
    Or,
    /// `let`
    Let,
    /// `function`
    Function,
    /// `input`
    ConsoleInput,
    /// `abs`
    Abs,
    /// `sin`
    Sin,
    /// `cos`
    Cos,
    /// `tan`
    Tan,
    /// `pow`
    Pow,

    // Operators
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `=`
    Equal,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Semicolon,
    Comma,

    // Special
    /// Lexer error placeholder
    Error,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Look up a keyword, returning its kind if `s` is reserved
    pub fn is_keyword(s: &str) -> Option<TokenKind> {
        match s {
            "print" => Some(TokenKind::Print),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "not" => Some(TokenKind::Not),
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            "let" => Some(TokenKind::Let),
            "function" => Some(TokenKind::Function),
            "input" => Some(TokenKind::ConsoleInput),
            "abs" => Some(TokenKind::Abs),
            "sin" => Some(TokenKind::Sin),
            "cos" => Some(TokenKind::Cos),
            "tan" => Some(TokenKind::Tan),
            "pow" => Some(TokenKind::Pow),
            "__PI__" => Some(TokenKind::Pi),
            "__E__" => Some(TokenKind::E),
            _ if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") => {
                Some(TokenKind::Boolean)
            }
            _ => None,
        }
    }

    /// Whether a token of this kind can end an operand
    ///
    /// A `-` right after one of these is subtraction, not a sign.
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Boolean
                | TokenKind::Pi
                | TokenKind::E
                | TokenKind::Identifier
                | TokenKind::RightParen
        )
    }

    /// Readable name used in syntax errors
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::String => "string",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::Boolean => "boolean",
            TokenKind::Pi => "__PI__",
            TokenKind::E => "__E__",
            TokenKind::Identifier => "identifier",
            TokenKind::Print => "print",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Not => "not",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Let => "let",
            TokenKind::Function => "function",
            TokenKind::ConsoleInput => "input",
            TokenKind::Abs => "abs",
            TokenKind::Sin => "sin",
            TokenKind::Cos => "cos",
            TokenKind::Tan => "tan",
            TokenKind::Pow => "pow",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::GreaterEqual => ">=",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::Less => "<",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equal => "=",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Error => "error",
            TokenKind::Eof => "end of input",
        }
    }
}
