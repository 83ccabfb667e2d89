//! Diagnostic system
//!
//! Lexer, parser and evaluator failures all flow through the unified
//! Diagnostic type, so the CLI and embedders format them one way.

pub mod error_codes;
pub mod formatter;

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic schema version
pub const DIAG_VERSION: u32 = 1;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Fatal error that stops the run
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic schema version
    pub diag_version: u32,
    /// Severity level
    pub level: DiagnosticLevel,
    /// Error code (e.g., "EM0001")
    pub code: String,
    /// Main diagnostic message
    pub message: String,
    /// File path
    pub file: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Length of error span
    pub length: usize,
    /// Character offsets into the source
    pub span: Span,
    /// Source line string
    pub snippet: String,
    /// Short label for caret range
    pub label: String,
    /// Additional notes (optional)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
    /// Suggested fix (optional)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic with code
    ///
    /// Line and column assume single-line source until [`Diagnostic::locate`]
    /// resolves them.
    pub fn error_with_code(
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            diag_version: DIAG_VERSION,
            level: DiagnosticLevel::Error,
            code: code.into(),
            message: message.into(),
            file: "<input>".to_string(),
            line: 1,
            column: span.start + 1,
            length: span.len(),
            span,
            snippet: String::new(),
            label: String::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    /// Create a new error diagnostic (uses generic error code)
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::error_with_code(error_codes::GENERIC_ERROR, message, span)
    }

    /// Set the file path
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Set the line number
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Set the snippet (source line)
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Set the label (caret description)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a help message
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Resolve line, column and snippet from the span against `source`
    ///
    /// The caret length is clipped to the end of the span's first line.
    pub fn locate(mut self, source: &str) -> Self {
        let (line, column) = formatter::offset_to_line_col(source, self.span.start);
        let snippet = formatter::extract_snippet(source, line).unwrap_or_default();
        let remaining = snippet.chars().count().saturating_sub(column - 1);
        self.line = line;
        self.column = column;
        self.length = self.span.len().min(remaining);
        self.snippet = snippet;
        self
    }

    /// Render the annotated snippet form used by `ember` without color
    pub fn to_human_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_human(&mut out);
        out
    }

    fn write_human(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "{}", self)?;
        writeln!(out, "  --> {}:{}:{}", self.file, self.line, self.column)?;

        if !self.snippet.is_empty() {
            writeln!(out, "   |")?;
            writeln!(out, "{:>2} | {}", self.line, self.snippet)?;
            if self.length > 0 {
                let gap = self.column.saturating_sub(1);
                write!(out, "   | {:gap$}{}", "", "^".repeat(self.length))?;
                match self.label.as_str() {
                    "" => writeln!(out)?,
                    label => writeln!(out, " {}", label)?,
                }
            }
        }

        for note in &self.notes {
            writeln!(out, "   = note: {}", note)?;
        }
        if let Some(help) = &self.help {
            writeln!(out, "   = help: {}", help)?;
        }
        Ok(())
    }

    /// Format as JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as compact JSON string
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.level, self.code, self.message)
    }
}

/// Sort diagnostics by location
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.line.cmp(&b.line))
            .then(a.column.cmp(&b.column))
    });
}
