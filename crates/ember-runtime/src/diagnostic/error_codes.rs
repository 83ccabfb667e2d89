//! Error code registry with descriptions and help text
//!
//! Ranges:
//! - EM0xxx: Runtime errors (type, undefined, immutability, math, operators, I/O)
//! - EM1xxx: Syntax/lexer errors
//! - EM9xxx: Internal errors

// EM0xxx - Runtime Errors
pub const TYPE_MISMATCH: &str = "EM0001";
pub const UNDEFINED_NAME: &str = "EM0002";
pub const IMMUTABLE_REDECLARATION: &str = "EM0003";
pub const NON_NUMERIC_ARGUMENT: &str = "EM0004";
pub const NATIVE_OPERATOR: &str = "EM0005";
pub const IO_ERROR: &str = "EM0006";

// EM1xxx - Syntax Errors
pub const SYNTAX_ERROR: &str = "EM1000";
pub const UNEXPECTED_CHARACTER: &str = "EM1001";
pub const UNTERMINATED_STRING: &str = "EM1002";

// EM9xxx - Internal Errors
pub const GENERIC_ERROR: &str = "EM9999";

/// Error code descriptor with code, description, and optional help text
#[derive(Debug, Clone)]
pub struct ErrorCodeInfo {
    /// The error code string (e.g., "EM0001")
    pub code: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Optional contextual help text
    pub help: Option<&'static str>,
}

/// Get info for an error code, if known
pub fn lookup(code: &str) -> Option<ErrorCodeInfo> {
    ERROR_CODES.iter().find(|e| e.code == code).cloned()
}

/// Get help text for an error code
pub fn help_for(code: &str) -> Option<&'static str> {
    lookup(code).and_then(|e| e.help)
}

/// All known error codes with descriptions and help
pub static ERROR_CODES: &[ErrorCodeInfo] = &[
    ErrorCodeInfo {
        code: TYPE_MISMATCH,
        description: "Type mismatch",
        help: Some("'not' only accepts booleans; compare the value first."),
    },
    ErrorCodeInfo {
        code: UNDEFINED_NAME,
        description: "Undefined variable or function",
        help: Some("Declare the variable with 'let' before it is read."),
    },
    ErrorCodeInfo {
        code: IMMUTABLE_REDECLARATION,
        description: "Variable declared twice",
        help: Some("Variables are immutable; pick a new name for the new value."),
    },
    ErrorCodeInfo {
        code: NON_NUMERIC_ARGUMENT,
        description: "Non-numeric math argument",
        help: Some("Math functions accept numbers or strings that look like numbers."),
    },
    ErrorCodeInfo {
        code: NATIVE_OPERATOR,
        description: "Operator failure",
        help: None,
    },
    ErrorCodeInfo {
        code: IO_ERROR,
        description: "Console I/O failure",
        help: None,
    },
    ErrorCodeInfo {
        code: SYNTAX_ERROR,
        description: "Syntax error",
        help: None,
    },
    ErrorCodeInfo {
        code: UNEXPECTED_CHARACTER,
        description: "Unexpected character",
        help: None,
    },
    ErrorCodeInfo {
        code: UNTERMINATED_STRING,
        description: "Unterminated string literal",
        help: Some("Close the string with the same quote character that opened it."),
    },
    ErrorCodeInfo {
        code: GENERIC_ERROR,
        description: "Error",
        help: None,
    },
];
