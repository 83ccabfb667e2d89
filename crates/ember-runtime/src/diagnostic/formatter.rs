//! Color-aware diagnostic formatter
//!
//! Formats diagnostics with source snippets, caret indicators, and optional
//! terminal colors. Respects NO_COLOR and EMBER_NO_COLOR.

use crate::diagnostic::Diagnostic;
use std::{fmt, io};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Color mode for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Never use colors
    Never,
    /// Auto-detect terminal capabilities
    Auto,
}

impl ColorMode {
    /// Resolve to a termcolor ColorChoice
    pub fn to_color_choice(self) -> ColorChoice {
        // https://no-color.org
        if std::env::var_os("NO_COLOR").is_some() || std::env::var_os("EMBER_NO_COLOR").is_some()
        {
            return ColorChoice::Never;
        }
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => ColorChoice::Auto,
        }
    }
}

/// Diagnostic formatter with color support
pub struct DiagnosticFormatter {
    color_mode: ColorMode,
}

impl DiagnosticFormatter {
    /// Create a new formatter with the given color mode
    pub fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }

    /// Create a formatter that auto-detects color support
    pub fn auto() -> Self {
        Self::new(ColorMode::Auto)
    }

    /// Create a plain (no color) formatter
    pub fn plain() -> Self {
        Self::new(ColorMode::Never)
    }

    /// Write a diagnostic to stderr
    pub fn emit(&self, diag: &Diagnostic) {
        let mut stream = StandardStream::stderr(self.color_mode.to_color_choice());
        if let Err(err) = self.write_diagnostic(&mut stream, diag) {
            tracing::warn!(error = %err, "failed to write diagnostic");
        }
    }

    /// Write every diagnostic to stderr
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Format a diagnostic with colors to a WriteColor sink
    pub fn write_diagnostic(
        &self,
        w: &mut impl WriteColor,
        diag: &Diagnostic,
    ) -> io::Result<()> {
        self.write_header(w, diag)?;
        self.write_location(w, diag)?;

        if !diag.snippet.is_empty() {
            self.write_snippet(w, diag)?;
        }

        for note in &diag.notes {
            self.write_trailer(w, "note", Color::White, note)?;
        }

        if let Some(help) = &diag.help {
            self.write_trailer(w, "help", Color::Green, help)?;
        }

        writeln!(w)?;
        Ok(())
    }

    fn write_header(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> io::Result<()> {
        paint(w, &accent(Color::Red), format_args!("{}[{}]", diag.level, diag.code))?;
        paint(w, ColorSpec::new().set_bold(true), format_args!(": {}", diag.message))?;
        writeln!(w)
    }

    fn write_location(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> io::Result<()> {
        paint(w, &gutter(), format_args!("  --> "))?;
        writeln!(w, "{}:{}:{}", diag.file, diag.line, diag.column)
    }

    fn write_snippet(&self, w: &mut impl WriteColor, diag: &Diagnostic) -> io::Result<()> {
        let width = diag.line.to_string().len() + 1;

        paint(w, &gutter(), format_args!("{:>width$}|", ""))?;
        writeln!(w)?;
        paint(w, &gutter(), format_args!("{:>width$}| ", diag.line))?;
        writeln!(w, "{}", diag.snippet)?;

        if diag.length == 0 {
            return Ok(());
        }

        // Carets stay on the snippet line, at least one wide
        let col = diag.column.saturating_sub(1);
        let room = diag.snippet.chars().count().saturating_sub(col).max(1);
        let carets = "^".repeat(diag.length.min(room));

        paint(w, &gutter(), format_args!("{:>width$}| ", ""))?;
        write!(w, "{:col$}", "")?;
        if diag.label.is_empty() {
            paint(w, &accent(Color::Red), format_args!("{}", carets))?;
        } else {
            paint(w, &accent(Color::Red), format_args!("{} {}", carets, diag.label))?;
        }
        writeln!(w)
    }

    fn write_trailer(
        &self,
        w: &mut impl WriteColor,
        kind: &str,
        color: Color,
        text: &str,
    ) -> io::Result<()> {
        paint(w, &gutter(), format_args!("   = "))?;
        paint(w, &accent(color), format_args!("{}", kind))?;
        writeln!(w, ": {}", text)
    }

    /// Format a diagnostic to a buffer (for testing)
    pub fn format_to_buffer(&self, diag: &Diagnostic) -> Vec<u8> {
        let mut buf = termcolor::Buffer::no_color();
        if self.write_diagnostic(&mut buf, diag).is_err() {
            return Vec::new();
        }
        buf.into_inner()
    }
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::auto()
    }
}

fn gutter() -> ColorSpec {
    accent(Color::Cyan)
}

fn accent(color: Color) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color)).set_bold(true);
    spec
}

/// Write `text` in `spec`, then reset the sink's color
fn paint(w: &mut impl WriteColor, spec: &ColorSpec, text: fmt::Arguments<'_>) -> io::Result<()> {
    w.set_color(spec)?;
    w.write_fmt(text)?;
    w.reset()
}

/// Source line `line` (1-based), if it exists
pub fn extract_snippet(source: &str, line: usize) -> Option<String> {
    source.lines().nth(line.saturating_sub(1)).map(String::from)
}

/// Compute 1-based line and column from a character offset in source
pub fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for ch in source.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
